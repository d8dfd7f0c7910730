//! UDTswap pool type validator
//!
//! Runs once per pool type script group. A transaction either creates a new
//! pool (no pool cell consumed) or operates existing pools: the pool groups
//! at cell indices `0, 3, 6, ...` are scanned, each checked as a swap or (in
//! the primary group only) a liquidity change, and a single fee cell pays for
//! every scanned group.

pub mod creation;
pub mod fee;
pub mod group;
pub mod liquidity;
pub mod scan;
pub mod snapshot;

pub use creation::{check_creation, PathOutcome};
pub use group::{check_group, GroupAction};
pub use liquidity::LiquidityDirection;
pub use scan::{transition, GroupRecord, PoolScan, ScanEvent, ScanReport, ScanState};
pub use snapshot::{GroupSnapshot, LedgerReserves, ReserveSnapshot, ReserveSource};

use udtswap_common::{msg, ProtocolConfig, ScriptContext, SwapError};

/// Accepted pool transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Created,
    Operated(ScanReport),
}

/// Validate the transaction for the pool type script in `ctx`
pub fn validate(ctx: &ScriptContext<'_>, config: &ProtocolConfig) -> Result<Verdict, SwapError> {
    match check_creation(ctx, config) {
        PathOutcome::Valid => {
            msg!("Pool created");
            return Ok(Verdict::Created);
        }
        PathOutcome::Invalid(err) => return Err(err),
        PathOutcome::NotApplicable => {}
    }

    check_group_cells(ctx)?;

    let reserves = LedgerReserves::new(ctx, config);
    let report = PoolScan::new(&reserves, config).run().map_err(|err| {
        msg!("Error: Pool scan rejected: {}", err);
        err
    })?;
    msg!("Pool groups accepted: {}", report.groups);
    Ok(Verdict::Operated(report))
}

/// Operating a pool consumes one pool cell and recreates one
fn check_group_cells(ctx: &ScriptContext<'_>) -> Result<(), SwapError> {
    for count in [ctx.group_input_count(), ctx.group_output_count()] {
        match count {
            0 => {
                msg!("Error: Pool group has no cell");
                return Err(SwapError::NotEnoughGroupCells);
            }
            1 => {}
            _ => {
                msg!("Error: Pool group has {} cells", count);
                return Err(SwapError::TooManyGroupCells);
            }
        }
    }
    Ok(())
}
