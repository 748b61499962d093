//! Stock quantity arithmetic
//!
//! Quantities are stored as `f64` and computed with `Decimal`, rounded to
//! two places half away from zero.

use rust_decimal::prelude::*;

const DECIMAL_PLACES: u32 = 2;

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// `max(0, round2(current + delta))`
pub fn apply_delta(current: f64, delta: f64) -> f64 {
    let next = to_f64(to_decimal(current) + to_decimal(delta));
    if next < 0.0 { 0.0 } else { next }
}

/// `round2(guests × per_guest)`
pub fn consumption(guests: u32, per_guest: f64) -> f64 {
    to_f64(Decimal::from(guests) * to_decimal(per_guest))
}

/// Exact difference of two stored quantities
pub fn difference(after: f64, before: f64) -> f64 {
    to_f64(to_decimal(after) - to_decimal(before))
}
