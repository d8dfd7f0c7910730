//! Pool creation path

use udtswap_common::{
    msg, PoolData, PoolLockArgs, ProtocolConfig, ScriptContext, Source, SwapError,
    POOL_LOCK_SCRIPT_SIZE,
};

use crate::snapshot::{check_reserve_type, reserve_amount};

/// Cell indices of a freshly created pool group
const POOL_CELL: usize = 0;
const RESERVE_A_CELL: usize = 1;
const RESERVE_B_CELL: usize = 2;

/// Verdict of one validation path
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    /// The transaction is not of this shape; try the next path
    NotApplicable,
    Invalid(SwapError),
    Valid,
}

/// A creation consumes no pool cell and produces exactly one, holding only the
/// baseline reserves and no liquidity.
pub fn check_creation(ctx: &ScriptContext<'_>, config: &ProtocolConfig) -> PathOutcome {
    if ctx.group_input_count() > 0 {
        return PathOutcome::NotApplicable;
    }
    match verify_creation(ctx, config) {
        Ok(()) => PathOutcome::Valid,
        Err(err) => {
            msg!("Error: Pool creation rejected: {}", err);
            PathOutcome::Invalid(err)
        }
    }
}

fn verify_creation(ctx: &ScriptContext<'_>, config: &ProtocolConfig) -> Result<(), SwapError> {
    // the type args pin the pool to the first input of this transaction
    let first_input = ctx.load_input(0, Source::Input)?.to_bytes();
    if ctx.script().args[..] != first_input[..] {
        return Err(SwapError::InputNotMatch);
    }

    match ctx.group_output_count() {
        0 => return Err(SwapError::NotEnoughGroupCells),
        1 => {}
        _ => return Err(SwapError::TooManyGroupCells),
    }
    if ctx.load_type_hash(POOL_CELL, Source::Output).ok() != Some(ctx.script_hash()) {
        msg!("Error: Pool cell must be the first output");
        return Err(SwapError::ScriptNotMatch);
    }

    let lock = ctx.load_lock(POOL_CELL, Source::Output)?;
    if lock.serialized_size() != POOL_LOCK_SCRIPT_SIZE {
        return Err(SwapError::LockScriptSize);
    }
    if lock.code_hash != config.pool_lock_code_hash {
        return Err(SwapError::CodeHashNotMatch);
    }
    let assets = PoolLockArgs::from_bytes(&lock.args)?;
    if assets.asset_a >= assets.asset_b {
        msg!("Error: Pool assets must be distinct and ordered");
        return Err(SwapError::SameAssetOrOrder);
    }

    let lock_hash = lock.hash();
    for index in [RESERVE_A_CELL, RESERVE_B_CELL] {
        if ctx.load_lock_hash(index, Source::Output)? != lock_hash {
            return Err(SwapError::ScriptNotMatch);
        }
    }

    check_reserve_type(ctx, config, &assets.asset_a, RESERVE_A_CELL, Source::Output)?;
    check_reserve_type(ctx, config, &assets.asset_b, RESERVE_B_CELL, Source::Output)?;

    let data = PoolData::from_bytes(ctx.load_data(POOL_CELL, Source::Output)?)?;
    let amount_a = reserve_amount(ctx, config, &assets.asset_a, RESERVE_A_CELL, Source::Output)?;
    let amount_b = reserve_amount(ctx, config, &assets.asset_b, RESERVE_B_CELL, Source::Output)?;

    if data.reserve_a != amount_a
        || data.reserve_b != amount_b
        || amount_a != config.baseline(&assets.asset_a)
        || amount_b != config.baseline(&assets.asset_b)
        || data.total_liquidity != 0
    {
        msg!("Error: New pool must hold exactly the baseline reserves");
        return Err(SwapError::ResultNotCorrect);
    }
    Ok(())
}
