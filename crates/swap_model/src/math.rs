//! Wide-integer helpers shared by the invariants and the quotes
//!
//! All pool formulas multiply at most three 128-bit quantities before
//! dividing, so they are evaluated in `U512`; `u128 · u128 · SCALE` needs at
//! most 266 bits. Every step is still checked so that a caller feeding
//! out-of-range values gets `Overflow` rather than a wrapped result.

use crate::uint::U512;
use crate::ModelError;

/// Working width of the pool formulas
pub type Wide = U512;

#[inline]
pub fn wide(value: u128) -> Wide {
    Wide::from_u128(value)
}

/// Multiply two wide values
#[inline]
pub fn mul(a: Wide, b: Wide) -> Result<Wide, ModelError> {
    a.checked_mul(&b).ok_or(ModelError::Overflow)
}

/// Multiply a sequence of `u128` factors
pub fn product(factors: &[u128]) -> Result<Wide, ModelError> {
    factors
        .iter()
        .try_fold(Wide::ONE, |acc, &factor| mul(acc, wide(factor)))
}

#[inline]
pub fn add(a: Wide, b: Wide) -> Result<Wide, ModelError> {
    a.checked_add(&b).ok_or(ModelError::Overflow)
}

/// Divide, rounding down
#[inline]
pub fn div_floor(numerator: Wide, denominator: Wide) -> Result<Wide, ModelError> {
    Ok(numerator.checked_div(&denominator)?)
}

/// Divide, then add one.
///
/// This is the pool-favouring "ceiling" used wherever the trader pays: it
/// rounds up even when the division is exact.
#[inline]
pub fn div_floor_plus_one(numerator: Wide, denominator: Wide) -> Result<Wide, ModelError> {
    add(div_floor(numerator, denominator)?, Wide::ONE)
}

/// Narrow a wide result back to `u128`
#[inline]
pub fn narrow(value: Wide) -> Result<u128, ModelError> {
    value.to_u128().ok_or(ModelError::Overflow)
}

/// `after - before`, failing with `Underflow` when the balance shrank
#[inline]
pub fn increase(before: u128, after: u128) -> Result<u128, ModelError> {
    after.checked_sub(before).ok_or(ModelError::Underflow)
}

/// `before - after`, failing with `Underflow` when the balance grew
#[inline]
pub fn decrease(before: u128, after: u128) -> Result<u128, ModelError> {
    before.checked_sub(after).ok_or(ModelError::Underflow)
}
