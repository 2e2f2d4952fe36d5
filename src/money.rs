use bigdecimal::BigDecimal;

/// Render an amount as a locale-style USD string, e.g. `$1,234.50`.
pub fn usd(amount: &BigDecimal) -> String {
	let fixed = amount.with_scale(2);
	let repr = fixed.to_string();
	let (sign, digits) = match repr.strip_prefix('-') {
		Some(rest) => ("-", rest),
		None => ("", repr.as_str()),
	};
	let (whole, cents) = digits.split_once('.').unwrap_or((digits, "00"));

	let mut grouped = String::new();
	for (i, c) in whole.chars().enumerate() {
		if i > 0 && (whole.len() - i) % 3 == 0 {
			grouped.push(',');
		}
		grouped.push(c);
	}

	format!("{}${}.{}", sign, grouped, cents)
}

/// Masked display form for an account number: last four digits only.
pub fn mask_number(number: &str) -> String {
	if !number.is_ascii() {
		return "****".to_string();
	}
	if number.len() <= 4 {
		return format!("****{}", number);
	}
	format!("****{}", &number[number.len() - 4..])
}
