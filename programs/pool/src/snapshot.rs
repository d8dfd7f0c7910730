//! Reserve snapshots of pool groups
//!
//! A pool group is three consecutive cells at `i, i+1, i+2` on both the input
//! and the output side: the pool cell holding `PoolData`, then the reserve
//! cells of asset A and asset B. `ReserveSource` is the seam between the scan
//! and the ledger; `LedgerReserves` implements it over a `ScriptContext`.

use swap_model::Balance;
use udtswap_common::{
    msg, read_amount, Hash32, PoolData, PoolLockArgs, ProtocolConfig, ScriptContext, Source,
    SwapError, POOL_LOCK_SCRIPT_SIZE, POOL_TYPE_SCRIPT_SIZE,
};

use crate::fee;
use crate::liquidity::{self, LiquidityDirection};

/// Raw before/after amounts of one pool group (baseline not yet removed)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReserveSnapshot {
    pub reserve_a: Balance,
    pub reserve_b: Balance,
    pub liquidity: Balance,
    pub native_a: bool,
    pub native_b: bool,
}

/// What the ledger holds at a group position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupSnapshot {
    Pool(ReserveSnapshot),
    /// A well-formed group of another pool instance sharing this validator
    Foreign,
}

/// Ledger access needed by the scan
pub trait ReserveSource {
    /// Snapshot of the group starting at cell `index`
    fn snapshot(&self, index: usize) -> Result<GroupSnapshot, SwapError>;

    /// Check the liquidity token cell minted or burned by the group at `index`
    fn verify_liquidity_token(
        &self,
        index: usize,
        direction: LiquidityDirection,
    ) -> Result<(), SwapError>;

    /// Check the fee cell at output `index` pays for `group_count` groups
    fn verify_fee(&self, index: usize, group_count: usize) -> Result<(), SwapError>;
}

/// Check the reserve cell at `index` carries the type script of `asset`
pub(crate) fn check_reserve_type(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    asset: &Hash32,
    index: usize,
    source: Source,
) -> Result<(), SwapError> {
    if config.is_native(asset) {
        return match ctx.load_type_hash(index, source) {
            Err(SwapError::ItemMissing) => Ok(()),
            Err(err) => Err(err),
            Ok(_) => {
                msg!("Error: Native reserve cell {} carries a type script", index);
                Err(SwapError::ScriptNotMatch)
            }
        };
    }
    if &ctx.load_type_hash(index, source)? != asset {
        msg!("Error: Reserve cell {} holds the wrong token", index);
        return Err(SwapError::ScriptNotMatch);
    }
    Ok(())
}

/// Amount of `asset` held by the reserve cell at `index`; the type script
/// must already have passed `check_reserve_type`
pub(crate) fn reserve_amount(
    ctx: &ScriptContext<'_>,
    config: &ProtocolConfig,
    asset: &Hash32,
    index: usize,
    source: Source,
) -> Result<u128, SwapError> {
    if config.is_native(asset) {
        Ok(u128::from(ctx.load_capacity(index, source)?))
    } else {
        read_amount(ctx.load_data(index, source)?)
    }
}

pub struct LedgerReserves<'a, 'tx> {
    ctx: &'a ScriptContext<'tx>,
    config: &'a ProtocolConfig,
}

impl<'a, 'tx> LedgerReserves<'a, 'tx> {
    pub fn new(ctx: &'a ScriptContext<'tx>, config: &'a ProtocolConfig) -> Self {
        Self { ctx, config }
    }

    fn expect_lock_hash(&self, hash: &Hash32, index: usize, source: Source) -> Result<(), SwapError> {
        if &self.ctx.load_lock_hash(index, source)? != hash {
            msg!("Error: Pool group cell {} has a foreign lock", index);
            return Err(SwapError::ScriptNotMatch);
        }
        Ok(())
    }

    fn reserve_balance(
        &self,
        asset: &Hash32,
        index: usize,
        recorded: (u128, u128),
    ) -> Result<Balance, SwapError> {
        let (recorded_before, recorded_after) = recorded;
        let before = reserve_amount(self.ctx, self.config, asset, index, Source::Input)?;
        if before != recorded_before {
            msg!("Error: Pool data does not match input reserve cell {}", index);
            return Err(SwapError::ReserveLockAmountNotMatch);
        }
        let after = reserve_amount(self.ctx, self.config, asset, index, Source::Output)?;
        if after != recorded_after {
            msg!("Error: Pool data does not match output reserve cell {}", index);
            return Err(SwapError::ReserveLockAmountNotMatch);
        }
        Ok(Balance::new(before, after))
    }
}

impl ReserveSource for LedgerReserves<'_, '_> {
    fn snapshot(&self, index: usize) -> Result<GroupSnapshot, SwapError> {
        let ctx = self.ctx;

        let lock = ctx.load_lock(index, Source::Input)?;
        if lock.serialized_size() != POOL_LOCK_SCRIPT_SIZE {
            return Err(SwapError::LockScriptSize);
        }
        if lock.code_hash != self.config.pool_lock_code_hash {
            return Err(SwapError::CodeHashNotMatch);
        }
        let assets = PoolLockArgs::from_bytes(&lock.args)?;

        let lock_hash = lock.hash();
        for offset in 1..3 {
            self.expect_lock_hash(&lock_hash, index + offset, Source::Input)?;
        }
        for offset in 0..3 {
            self.expect_lock_hash(&lock_hash, index + offset, Source::Output)?;
        }

        let before = PoolData::from_bytes(ctx.load_data(index, Source::Input)?)?;
        let after = PoolData::from_bytes(ctx.load_data(index, Source::Output)?)?;

        for (asset, cell) in [(&assets.asset_a, index + 1), (&assets.asset_b, index + 2)] {
            check_reserve_type(ctx, self.config, asset, cell, Source::Input)?;
            check_reserve_type(ctx, self.config, asset, cell, Source::Output)?;
        }

        let reserve_a = self.reserve_balance(
            &assets.asset_a,
            index + 1,
            (before.reserve_a, after.reserve_a),
        )?;
        let reserve_b = self.reserve_balance(
            &assets.asset_b,
            index + 2,
            (before.reserve_b, after.reserve_b),
        )?;

        let output_type = ctx.load_type(index, Source::Output)?;
        if output_type.serialized_size() != POOL_TYPE_SCRIPT_SIZE {
            return Err(SwapError::TypeScriptSize);
        }
        if output_type.code_hash != self.config.pool_type_code_hash {
            return Err(SwapError::CodeHashNotMatch);
        }
        let type_hash = ctx.load_type_hash(index, Source::Input)?;
        if type_hash != output_type.hash() {
            msg!("Error: Pool cell {} changes its type script", index);
            return Err(SwapError::ScriptNotMatch);
        }

        // only after every structural check passed
        if type_hash != ctx.script_hash() {
            return Ok(GroupSnapshot::Foreign);
        }

        Ok(GroupSnapshot::Pool(ReserveSnapshot {
            reserve_a,
            reserve_b,
            liquidity: Balance::new(before.total_liquidity, after.total_liquidity),
            native_a: self.config.is_native(&assets.asset_a),
            native_b: self.config.is_native(&assets.asset_b),
        }))
    }

    fn verify_liquidity_token(
        &self,
        index: usize,
        direction: LiquidityDirection,
    ) -> Result<(), SwapError> {
        liquidity::verify_token_cell(self.ctx, self.config, index, direction)
    }

    fn verify_fee(&self, index: usize, group_count: usize) -> Result<(), SwapError> {
        fee::verify_fee_cell(self.ctx, self.config, index, group_count)
    }
}
