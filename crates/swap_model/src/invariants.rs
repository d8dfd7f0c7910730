//! Transition invariants for a pool group
//!
//! Every check takes baseline-adjusted before/after values and recomputes the
//! amount the pool is owed with exact wide arithmetic. Rounding always favours
//! the pool: amounts paid in are rounded up (floor + 1), amounts paid out and
//! liquidity minted are rounded down.

use crate::math::{self, decrease, div_floor, div_floor_plus_one, increase, mul, product, wide};
use crate::{ModelError, SCALE};

/// Before/after value of one reserve or of the liquidity supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Balance {
    pub before: u128,
    pub after: u128,
}

impl Balance {
    pub const fn new(before: u128, after: u128) -> Self {
        Self { before, after }
    }

    /// Amount deposited (`after - before`)
    #[inline]
    pub fn increase(&self) -> Result<u128, ModelError> {
        increase(self.before, self.after)
    }

    /// Amount withdrawn (`before - after`)
    #[inline]
    pub fn decrease(&self) -> Result<u128, ModelError> {
        decrease(self.before, self.after)
    }

    #[inline]
    pub fn is_unchanged(&self) -> bool {
        self.before == self.after
    }
}

/// Verify a swap that pays `input` into the pool and takes `output` out.
///
/// Two formulas are tried:
/// 1. implied input for the observed output,
///    `floor(in0 * SCALE * dout / ((out0 - dout) * fee)) + 1`
/// 2. implied output for the observed input,
///    `floor(din * fee * out0 / (in0 * SCALE + din * fee))`
///
/// The swap is accepted when either reproduces the observed amount, so both
/// exact-input and exact-output transactions pass without declaring which.
pub fn check_swap(input: Balance, output: Balance, fee: u128) -> Result<(), ModelError> {
    let amount_in = input.increase()?;
    let amount_out = output.decrease()?;

    // (out0 - dout) is exactly the after reserve
    let denominator = product(&[output.after, fee])?;
    if denominator.is_zero() {
        return Err(ModelError::DivideByZero);
    }
    let implied_in = div_floor_plus_one(
        product(&[input.before, SCALE, amount_out])?,
        denominator,
    )?;
    let exact_output_matches = implied_in == wide(amount_in);

    let weighted_in = product(&[amount_in, fee])?;
    let denominator = math::add(product(&[input.before, SCALE])?, weighted_in)?;
    if denominator.is_zero() {
        return Err(ModelError::DivideByZero);
    }
    let implied_out = div_floor(mul(weighted_in, wide(output.before))?, denominator)?;
    let exact_input_matches = implied_out == wide(amount_out);

    if exact_output_matches || exact_input_matches {
        Ok(())
    } else {
        Err(ModelError::SwapNotCorrect)
    }
}

/// Verify a proportional deposit into a pool with non-zero liquidity supply.
///
/// Asset A sets the size of the deposit. Asset B must be
/// `floor(rB * amountA / rA) + 1` and the minted liquidity must be
/// `floor(L * amountA / rA)`. The empty-pool bootstrap and the minimum deposit
/// are policies of the caller.
pub fn check_add_liquidity(
    reserve_a: Balance,
    reserve_b: Balance,
    liquidity: Balance,
) -> Result<(), ModelError> {
    let amount_a = reserve_a.increase()?;
    let amount_b = reserve_b.increase()?;
    let minted = liquidity.increase()?;

    if reserve_a.before == 0 {
        return Err(ModelError::DivideByZero);
    }
    let reserve_a_before = wide(reserve_a.before);

    let required_b = div_floor_plus_one(product(&[reserve_b.before, amount_a])?, reserve_a_before)?;
    if required_b != wide(amount_b) {
        return Err(ModelError::AddLiquidityNotCorrect);
    }

    let owed = div_floor(product(&[liquidity.before, amount_a])?, reserve_a_before)?;
    if owed != wide(minted) {
        return Err(ModelError::LiquidityNotCorrect);
    }
    Ok(())
}

/// Verify a withdrawal against the liquidity burned.
///
/// Each asset paid out must equal `floor(burned * reserve / L)`. Asset B is
/// checked first.
pub fn check_remove_liquidity(
    reserve_a: Balance,
    reserve_b: Balance,
    liquidity: Balance,
) -> Result<(), ModelError> {
    let burned = liquidity.decrease()?;
    let withdrawn_a = reserve_a.decrease()?;
    let withdrawn_b = reserve_b.decrease()?;

    if liquidity.before == 0 {
        return Err(ModelError::DivideByZero);
    }
    let supply = wide(liquidity.before);

    for (reserve_before, withdrawn) in [
        (reserve_b.before, withdrawn_b),
        (reserve_a.before, withdrawn_a),
    ] {
        let owed = div_floor(product(&[burned, reserve_before])?, supply)?;
        if owed != wide(withdrawn) {
            return Err(ModelError::RemoveLiquidityNotCorrect);
        }
    }
    Ok(())
}
