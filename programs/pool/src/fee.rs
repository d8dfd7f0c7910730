//! Per-group fee cell

use udtswap_common::{msg, ProtocolConfig, ScriptContext, Source, SwapError};

/// Output `index` pays `per_group_fee * group_count` to the fee lock and
/// carries no type script.
pub fn verify_fee_cell(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    index: usize,
    group_count: usize,
) -> Result<(), SwapError> {
    if ctx.load_lock_hash(index, Source::Output)? != config.fee_lock_hash {
        msg!("Error: Output {} is not the fee cell", index);
        return Err(SwapError::ScriptNotMatch);
    }
    match ctx.load_type_hash(index, Source::Output) {
        Err(SwapError::ItemMissing) => {}
        Err(err) => return Err(err),
        Ok(_) => return Err(SwapError::FeeCellTypeScriptExists),
    }

    let expected = u128::from(config.per_group_fee)
        .checked_mul(group_count as u128)
        .ok_or(SwapError::Overflow)?;
    let paid = u128::from(ctx.load_capacity(index, Source::Output)?);
    if paid != expected {
        msg!("Error: Fee cell pays {} but {} groups owe {}", paid, group_count, expected);
        return Err(SwapError::FeeNotCorrect);
    }
    Ok(())
}
