//! Fixed-point helpers.
//!
//! Bonus multipliers are computed in fixed point so bonus damage never
//! depends on the host's float behaviour. Attack-per-cost ratios are compared
//! exactly by cross-multiplication.

use std::cmp::Ordering;

use fixed::types::I32F32;

/// Fixed-point number type for ratios and multipliers.
///
/// Uses 32 bits for integer part and 32 bits for fractional part.
pub type Fixed = I32F32;

/// Convert a percentage (100 = 1.0) to a fixed-point multiplier.
///
/// Percentages beyond the fixed-point range saturate.
#[must_use]
pub fn percent(value: u32) -> Fixed {
    Fixed::saturating_from_num(value) / Fixed::from_num(100)
}

/// Compare the ratios `num_a / den_a` and `num_b / den_b` without division.
///
/// Both denominators must be non-zero.
#[must_use]
pub fn compare_ratios(num_a: u32, den_a: u32, num_b: u32, den_b: u32) -> Ordering {
    (u64::from(num_a) * u64::from(den_b)).cmp(&(u64::from(num_b) * u64::from(den_a)))
}

/// Scale an integer amount by a multiplier, flooring the result at zero.
#[must_use]
pub fn scale(amount: u32, multiplier: Fixed) -> u32 {
    let scaled = Fixed::saturating_from_num(amount).saturating_mul(multiplier);
    scaled.to_num::<i64>().clamp(0, i64::from(u32::MAX)) as u32
}
