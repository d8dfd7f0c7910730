//! Off-chain quotes that reproduce the validator's rounding
//!
//! A transaction built from these numbers is accepted by the pool validator
//! as long as the reserves it was quoted against are still current. Reserves
//! passed here are effective reserves, i.e. with the baseline already removed.

use crate::math::{self, div_floor, div_floor_plus_one, mul, narrow, product, wide};
use crate::{ModelError, SCALE};

/// Amounts required for a deposit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddLiquidityQuote {
    /// Asset B to deposit. `None` for the first deposit into an empty pool,
    /// where the depositor sets the price and any positive amount is accepted.
    pub amount_b: Option<u128>,

    /// Liquidity tokens minted to the depositor
    pub minted: u128,
}

/// Amounts paid out for burning liquidity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveLiquidityQuote {
    pub amount_a: u128,
    pub amount_b: u128,
}

fn check_fee(fee: u128) -> Result<(), ModelError> {
    if fee == 0 || fee > SCALE {
        return Err(ModelError::InvalidAmount);
    }
    Ok(())
}

/// Output received for paying exactly `amount_in`
///
/// `floor(amount_in * fee * out_reserve / (in_reserve * SCALE + amount_in * fee))`
pub fn quote_swap_output(
    in_reserve: u128,
    out_reserve: u128,
    amount_in: u128,
    fee: u128,
) -> Result<u128, ModelError> {
    if in_reserve == 0 || out_reserve == 0 {
        return Err(ModelError::InvalidReserves);
    }
    if amount_in == 0 {
        return Err(ModelError::InvalidAmount);
    }
    check_fee(fee)?;

    let weighted_in = product(&[amount_in, fee])?;
    let denominator = math::add(product(&[in_reserve, SCALE])?, weighted_in)?;
    narrow(div_floor(mul(weighted_in, wide(out_reserve))?, denominator)?)
}

/// Input required to receive exactly `amount_out`
///
/// `floor(in_reserve * SCALE * amount_out / ((out_reserve - amount_out) * fee)) + 1`
pub fn quote_swap_input(
    in_reserve: u128,
    out_reserve: u128,
    amount_out: u128,
    fee: u128,
) -> Result<u128, ModelError> {
    if in_reserve == 0 || out_reserve == 0 {
        return Err(ModelError::InvalidReserves);
    }
    if amount_out == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if amount_out >= out_reserve {
        return Err(ModelError::InsufficientLiquidity);
    }
    check_fee(fee)?;

    let remaining = out_reserve - amount_out;
    narrow(div_floor_plus_one(
        product(&[in_reserve, SCALE, amount_out])?,
        product(&[remaining, fee])?,
    )?)
}

/// Deposit sized by `amount_a`
pub fn quote_add_liquidity(
    reserve_a: u128,
    reserve_b: u128,
    liquidity: u128,
    amount_a: u128,
) -> Result<AddLiquidityQuote, ModelError> {
    if amount_a == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if liquidity == 0 {
        return Ok(AddLiquidityQuote {
            amount_b: None,
            minted: amount_a,
        });
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(ModelError::InvalidReserves);
    }

    let reserve_a = wide(reserve_a);
    let amount_b = narrow(div_floor_plus_one(product(&[reserve_b, amount_a])?, reserve_a)?)?;
    let minted = narrow(div_floor(product(&[liquidity, amount_a])?, reserve_a)?)?;
    Ok(AddLiquidityQuote {
        amount_b: Some(amount_b),
        minted,
    })
}

/// Withdrawal for burning `burned` liquidity tokens
pub fn quote_remove_liquidity(
    reserve_a: u128,
    reserve_b: u128,
    liquidity: u128,
    burned: u128,
) -> Result<RemoveLiquidityQuote, ModelError> {
    if liquidity == 0 {
        return Err(ModelError::InvalidReserves);
    }
    if burned == 0 {
        return Err(ModelError::InvalidAmount);
    }
    if burned >= liquidity {
        return Err(ModelError::InsufficientLiquidity);
    }

    let supply = wide(liquidity);
    Ok(RemoveLiquidityQuote {
        amount_a: narrow(div_floor(product(&[burned, reserve_a])?, supply)?)?,
        amount_b: narrow(div_floor(product(&[burned, reserve_b])?, supply)?)?,
    })
}
