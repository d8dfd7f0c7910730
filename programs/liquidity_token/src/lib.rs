//! UDTswap liquidity token validator
//!
//! Liquidity tokens are plain fungible tokens with one twist: when input 0 is
//! the owning pool (its lock hash equals the owner in the token args), the
//! pool's change in total liquidity may mint or burn tokens.

use udtswap_common::{
    msg, LiquidityTokenArgs, PoolData, ProtocolConfig, ScriptContext, Source, SwapError,
    AMOUNT_SIZE, LIQUIDITY_TOKEN_ARGS_SIZE, POOL_TYPE_SCRIPT_SIZE,
};

/// Position of the pool cell in a liquidity transaction
const POOL_CELL: usize = 0;

/// Sum of the token amounts in the group cells on one side
fn group_total(ctx: &ScriptContext<'_>, source: Source) -> Result<u128, SwapError> {
    let mut total: u128 = 0;
    let mut index = 0;
    loop {
        let data = match ctx.load_data(index, source) {
            Ok(data) => data,
            Err(SwapError::IndexOutOfBound) => return Ok(total),
            Err(err) => return Err(err),
        };
        if data.len() != AMOUNT_SIZE {
            return Err(SwapError::LiquidityTokenDataSize);
        }
        let mut buf = [0u8; AMOUNT_SIZE];
        buf.copy_from_slice(data);
        let amount = u128::from_le_bytes(buf);
        if amount == 0 {
            msg!("Error: Liquidity token cell {} holds nothing", index);
            return Err(SwapError::LiquidityTokenZeroAmount);
        }
        total = total.checked_add(amount).ok_or(SwapError::Overflow)?;
        index += 1;
    }
}

/// Change in total liquidity of the pool spent at input 0
fn pool_supply_change(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    args: &LiquidityTokenArgs,
) -> Result<(u128, u128), SwapError> {
    let pool_type = ctx.load_type(POOL_CELL, Source::Input)?;
    if pool_type.serialized_size() != POOL_TYPE_SCRIPT_SIZE {
        return Err(SwapError::TypeScriptSize);
    }
    if pool_type.code_hash != config.pool_type_code_hash {
        msg!("Error: Owner cell is not a pool");
        return Err(SwapError::ScriptNotMatch);
    }
    if pool_type.args[..] != args.pool_input[..] {
        msg!("Error: Liquidity token belongs to another pool");
        return Err(SwapError::TxInputNotMatch);
    }

    let before = PoolData::from_bytes(ctx.load_data(POOL_CELL, Source::Input)?)?;
    let after = PoolData::from_bytes(ctx.load_data(POOL_CELL, Source::Output)?)?;
    Ok((before.total_liquidity, after.total_liquidity))
}

/// Validate the transaction for the liquidity token type script in `ctx`
pub fn validate(ctx: &ScriptContext<'_>, config: &ProtocolConfig) -> Result<(), SwapError> {
    let script_args = &ctx.script().args;
    if script_args.len() != LIQUIDITY_TOKEN_ARGS_SIZE {
        return Err(SwapError::LiquidityTokenScriptSize);
    }
    let args = LiquidityTokenArgs::from_bytes(script_args)?;

    let owner_mode = ctx.load_lock_hash(POOL_CELL, Source::Input)? == args.owner_lock_hash;

    let input = group_total(ctx, Source::GroupInput)?;
    let output = group_total(ctx, Source::GroupOutput)?;

    let balanced = if owner_mode {
        let (before, after) = pool_supply_change(ctx, config, &args)?;
        if after > before {
            input.checked_add(after - before).ok_or(SwapError::Overflow)? == output
        } else if after < before {
            output.checked_add(before - after).ok_or(SwapError::Overflow)? == input
        } else {
            input == output
        }
    } else {
        input == output
    };

    if !balanced {
        msg!("Error: Liquidity tokens in {} do not match out {}", input, output);
        return Err(SwapError::LiquidityTokenAmountNotMatch);
    }
    Ok(())
}
