use rand::Rng;

/// Country code carried by every generated IBAN.
pub const COUNTRY: &str = "US";
/// Literal bank code the fixed-pattern matcher requires.
pub const BANK_CODE: &str = "NOVA";
// Placeholder check value; the mod-97 algorithm is deliberately not applied.
const CHECK_DIGITS: &str = "00";

const COMPACT_LEN: usize = 28;

/// Generate a grouped IBAN: `CC## BBBB#### NNNN NNNN NNNN NNNN`.
/// Uniqueness against existing accounts is the account repo's job.
pub fn generate() -> String {
	let mut rng = rand::thread_rng();
	let mut digits = |n: usize| -> String {
		(0..n).map(|_| char::from(b'0' + rng.gen_range(0..10u8))).collect()
	};
	let branch = digits(4);
	let number = digits(16);
	format(&format!("{}{}{}{}{}", COUNTRY, CHECK_DIGITS, BANK_CODE, branch, number))
}

/// Strip all whitespace and uppercase; two IBANs are compared in this form.
pub fn normalize(iban: &str) -> String {
	iban.chars()
		.filter(|c| !c.is_whitespace())
		.map(|c| c.to_ascii_uppercase())
		.collect()
}

pub fn matches(a: &str, b: &str) -> bool {
	normalize(a) == normalize(b)
}

/// Fixed-pattern match on the normalized form: exact segment lengths,
/// character classes, and the literal bank code. Not a mod-97 check.
pub fn is_valid(iban: &str) -> bool {
	let compact = normalize(iban);
	if compact.len() != COMPACT_LEN || !compact.is_ascii() {
		return false;
	}

	let country_ok = compact[..2].chars().all(|c| c.is_ascii_uppercase());
	let check_ok = compact[2..4].chars().all(|c| c.is_ascii_digit());
	let bank_ok = &compact[4..8] == BANK_CODE;
	let tail_ok = compact[8..].chars().all(|c| c.is_ascii_digit());

	country_ok && check_ok && bank_ok && tail_ok
}

/// Regroup a compact IBAN into its display form:
/// one 4-char header, one 8-char bank/branch block, four 4-digit groups.
pub fn format(iban: &str) -> String {
	let compact = normalize(iban);
	let mut groups = Vec::new();
	let mut rest = compact.as_str();
	for len in [4, 8, 4, 4, 4, 4] {
		if rest.len() < len {
			groups.push(rest);
			break;
		}
		let (head, tail) = rest.split_at(len);
		groups.push(head);
		rest = tail;
	}
	groups.join(" ")
}

/// Presentation-only redaction: everything but the final group is hidden.
pub fn mask(iban: &str) -> String {
	let compact = normalize(iban);
	if !compact.is_ascii() || compact.len() < 4 {
		return "****".to_string();
	}
	format!("**** {}", &compact[compact.len() - 4..])
}
