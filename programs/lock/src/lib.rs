//! UDTswap pool lock validator
//!
//! The pool lock guards the pool cell and both reserve cells of every pool
//! group. It unlocks only when each group of three cells it guards is spent
//! as a pool group, so the pool type validator gets to check the operation.

use udtswap_common::{msg, ProtocolConfig, ScriptContext, Source, SwapError, POOL_TYPE_SCRIPT_SIZE};

const GROUP_SIZE: usize = 3;

/// Number of pool groups guarded by this lock, from the size of its group
fn guarded_groups(ctx: &ScriptContext<'_>) -> Result<usize, SwapError> {
    let cells = ctx.group_input_count();
    if cells < GROUP_SIZE {
        msg!("Error: Pool lock guards {} cells", cells);
        return Err(SwapError::NotEnoughGroupCells);
    }
    if cells % GROUP_SIZE != 0 {
        msg!("Error: Pool lock guards {} cells", cells);
        return Err(SwapError::TooManyGroupCells);
    }
    Ok(cells / GROUP_SIZE)
}

/// Whether inputs `index..index + 3` form a pool group under this lock
fn is_unlocked_pool(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    index: usize,
) -> Result<bool, SwapError> {
    let pool_type = match ctx.load_type(index, Source::Input) {
        Ok(script) => script,
        Err(SwapError::ItemMissing) => return Ok(false),
        Err(err) => return Err(err),
    };
    if pool_type.serialized_size() != POOL_TYPE_SCRIPT_SIZE
        || pool_type.code_hash != config.pool_type_code_hash
    {
        return Ok(false);
    }
    for offset in 0..GROUP_SIZE {
        match ctx.load_lock_hash(index + offset, Source::Input) {
            Ok(hash) if hash == ctx.script_hash() => {}
            Ok(_) | Err(SwapError::IndexOutOfBound) => return Ok(false),
            Err(err) => return Err(err),
        }
    }
    Ok(true)
}

/// Validate the transaction for the pool lock script in `ctx`
pub fn validate(ctx: &ScriptContext<'_>, config: &ProtocolConfig) -> Result<(), SwapError> {
    let mut remaining = guarded_groups(ctx)?;

    let mut index = 0;
    loop {
        match is_unlocked_pool(ctx, config, index) {
            Ok(true) => {
                remaining -= 1;
                if remaining == 0 {
                    return Ok(());
                }
            }
            Ok(false) => {}
            Err(SwapError::IndexOutOfBound) => break,
            Err(err) => return Err(err),
        }
        index += GROUP_SIZE;
    }

    msg!("Error: {} pool groups left locked", remaining);
    Err(SwapError::CannotUnlock)
}
