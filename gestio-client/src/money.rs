//! Money arithmetic using rust_decimal
//!
//! All monetary computation runs on `Decimal` at full precision; values are
//! rounded to 2 fractional digits half-up exactly once, at the presentation
//! boundary.

use rust_decimal::prelude::*;

/// Fractional digits kept at the presentation boundary
pub const DECIMAL_PLACES: u32 = 2;

/// Convert an f64 form value to Decimal; non-representable inputs become zero
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Round a monetary value for display (2 dp, half away from zero)
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Convert a Decimal to f64 after display rounding
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or(0.0)
}
