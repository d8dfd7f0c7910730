//! Liquidity token cell check for add/remove liquidity

use udtswap_common::{
    msg, LiquidityTokenArgs, ProtocolConfig, ScriptContext, Source, SwapError,
    LIQUIDITY_TOKEN_SCRIPT_SIZE, POOL_TYPE_SCRIPT_SIZE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityDirection {
    /// Tokens are minted to an output
    Mint,
    /// Tokens are burned from an input
    Burn,
}

/// The liquidity token cell touched by the pool at `index` must be a token of
/// this pool: created for the same pool input and owned by the pool lock.
pub fn verify_token_cell(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    index: usize,
    direction: LiquidityDirection,
) -> Result<(), SwapError> {
    let token_type = match direction {
        LiquidityDirection::Mint => ctx.load_type(config.mint_output_index, Source::Output)?,
        LiquidityDirection::Burn => ctx.load_type(config.burn_input_index, Source::Input)?,
    };
    if token_type.serialized_size() != LIQUIDITY_TOKEN_SCRIPT_SIZE {
        msg!("Error: Liquidity token script has the wrong size");
        return Err(SwapError::LiquidityTokenScriptSize);
    }
    if token_type.code_hash != config.liquidity_token_code_hash {
        return Err(SwapError::CodeHashNotMatch);
    }
    let token = LiquidityTokenArgs::from_bytes(&token_type.args)?;

    let pool_type = ctx.load_type(index, Source::Input)?;
    if pool_type.serialized_size() != POOL_TYPE_SCRIPT_SIZE {
        return Err(SwapError::TypeScriptSize);
    }
    if pool_type.args[..] != token.pool_input[..] {
        msg!("Error: Liquidity token belongs to another pool");
        return Err(SwapError::TxInputNotMatch);
    }

    if ctx.load_lock_hash(index, Source::Input)? != token.owner_lock_hash {
        msg!("Error: Liquidity token is not owned by the pool lock");
        return Err(SwapError::ScriptNotMatch);
    }
    Ok(())
}
