use bigdecimal::BigDecimal;

/// Which routing path a transfer takes. Internal transfers are addressed by
/// account id, external ones by IBAN.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Route {
	Internal,
	External,
}

/// Display-only fee estimate for a transfer. The transfer engine never
/// deducts this from any balance; it exists for summary screens.
///
/// Internal: 1% of the amount, clamped to [1.00, 5.00].
/// External: 2% of the amount, clamped to [2.00, 15.00].
pub fn estimate(route: Route, amount: &BigDecimal) -> BigDecimal {
	let (divisor, min, max) = match route {
		Route::Internal => (100, 1, 5),
		Route::External => (50, 2, 15),
	};

	let raw = amount / BigDecimal::from(divisor);
	let min = BigDecimal::from(min);
	let max = BigDecimal::from(max);

	let clamped = if raw < min {
		min
	} else if raw > max {
		max
	} else {
		raw
	};
	clamped.with_scale(2)
}
