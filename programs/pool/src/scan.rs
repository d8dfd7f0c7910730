//! Pool group scan
//!
//! The operate path walks pool groups at cell indices `0, 3, 6, ...` as an
//! explicit state machine:
//!
//! ```text
//! Scanning ──swap──────────────▶ Scanning (next group)
//!    │  ──foreign pool─────────▶ Scanning (next group, success flag kept)
//!    │  ──add/remove───────────▶ LiquidityDone ─┐
//!    │  ──no group, after swap─▶ SwapsExhausted ┴─▶ FeeCheck ──▶ Accept
//!    └──any other failure──────────────────────────────────────▶ Reject
//! ```
//!
//! `transition` is the whole table; `PoolScan` performs the ledger work that
//! produces each event.

use arrayvec::ArrayVec;
use udtswap_common::{msg, ProtocolConfig, SwapError, POOL_GROUP_LIMIT};

use crate::group::{check_group, GroupAction};
use crate::snapshot::{GroupSnapshot, ReserveSource};

/// Cells per pool group
pub const GROUP_SIZE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    /// Looking at the group starting at `index`
    Scanning { index: usize, succeeded: bool },
    /// The primary group changed liquidity; nothing else is scanned
    LiquidityDone { index: usize },
    /// No further pool group after at least one swap
    SwapsExhausted { index: usize },
    /// The fee cell is expected at output `index`
    FeeCheck { index: usize },
    Accept { groups: usize },
    Reject(SwapError),
}

impl ScanState {
    pub const START: ScanState = ScanState::Scanning { index: 0, succeeded: false };

    #[inline]
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Accept { .. } | ScanState::Reject(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanEvent {
    /// The group belongs to another pool instance
    Foreign,
    /// The group passed its checks
    Checked(GroupAction),
    /// No readable pool group at this index
    ProviderFailed(SwapError),
    /// The group was read but failed its checks
    GroupFailed(SwapError),
    /// More groups than the configured maximum
    LimitExceeded,
    /// Move from a scan end state to the fee check
    Settle,
    FeePaid,
    FeeRejected(SwapError),
}

/// Transition table of the scan.
///
/// Terminal states absorb every event, and an event that does not apply to a
/// state leaves it unchanged.
pub fn transition(state: ScanState, event: ScanEvent) -> ScanState {
    use ScanEvent::*;
    use ScanState::*;

    match (state, event) {
        (Scanning { index, succeeded }, Foreign) => Scanning {
            index: index + GROUP_SIZE,
            succeeded,
        },
        (Scanning { index, .. }, Checked(GroupAction::Swap)) => Scanning {
            index: index + GROUP_SIZE,
            succeeded: true,
        },
        (Scanning { index, .. }, Checked(_)) => LiquidityDone {
            index: index + GROUP_SIZE,
        },
        (Scanning { index, succeeded: true }, ProviderFailed(_)) => SwapsExhausted { index },
        (Scanning { succeeded: false, .. }, ProviderFailed(err)) => Reject(err),
        (Scanning { .. }, GroupFailed(err)) => Reject(err),
        (Scanning { .. }, LimitExceeded) => Reject(SwapError::TooManyPoolGroups),
        (LiquidityDone { index } | SwapsExhausted { index }, Settle) => FeeCheck { index },
        (FeeCheck { index }, FeePaid) => Accept {
            groups: index / GROUP_SIZE,
        },
        (FeeCheck { .. }, FeeRejected(err)) => Reject(err),
        (state, _) => state,
    }
}

/// One scanned group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupRecord {
    pub index: usize,
    /// `None` for a foreign pool
    pub action: Option<GroupAction>,
}

/// Result of an accepted scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanReport {
    /// Groups paid for, foreign pools included
    pub groups: usize,
    pub trail: ArrayVec<GroupRecord, POOL_GROUP_LIMIT>,
}

pub struct PoolScan<'a, S: ?Sized> {
    source: &'a S,
    config: &'a ProtocolConfig,
    state: ScanState,
    trail: ArrayVec<GroupRecord, POOL_GROUP_LIMIT>,
}

impl<'a, S: ReserveSource + ?Sized> PoolScan<'a, S> {
    pub fn new(source: &'a S, config: &'a ProtocolConfig) -> Self {
        Self {
            source,
            config,
            state: ScanState::START,
            trail: ArrayVec::new(),
        }
    }

    #[inline]
    pub fn state(&self) -> ScanState {
        self.state
    }

    fn record(&mut self, index: usize, action: Option<GroupAction>) -> Option<ScanEvent> {
        if self.trail.try_push(GroupRecord { index, action }).is_err() {
            return Some(ScanEvent::LimitExceeded);
        }
        None
    }

    fn scan_group(&mut self, index: usize) -> ScanEvent {
        let snapshot = match self.source.snapshot(index) {
            Ok(snapshot) => snapshot,
            Err(err) => return ScanEvent::ProviderFailed(err),
        };
        if index / GROUP_SIZE >= self.config.max_pool_groups {
            msg!("Error: More than {} pool groups", self.config.max_pool_groups);
            return ScanEvent::LimitExceeded;
        }
        match snapshot {
            GroupSnapshot::Foreign => self
                .record(index, None)
                .unwrap_or(ScanEvent::Foreign),
            GroupSnapshot::Pool(reserves) => {
                match check_group(&reserves, index, self.source, self.config) {
                    Ok(action) => self
                        .record(index, Some(action))
                        .unwrap_or(ScanEvent::Checked(action)),
                    Err(err) => ScanEvent::GroupFailed(err),
                }
            }
        }
    }

    /// Perform the ledger work for the current state and apply one transition
    pub fn step(&mut self) -> ScanState {
        let event = match self.state {
            ScanState::Scanning { index, .. } => self.scan_group(index),
            ScanState::LiquidityDone { .. } | ScanState::SwapsExhausted { .. } => ScanEvent::Settle,
            ScanState::FeeCheck { index } => {
                match self.source.verify_fee(index, index / GROUP_SIZE) {
                    Ok(()) => ScanEvent::FeePaid,
                    Err(err) => ScanEvent::FeeRejected(err),
                }
            }
            ScanState::Accept { .. } | ScanState::Reject(_) => return self.state,
        };
        self.state = transition(self.state, event);
        self.state
    }

    /// Drive the scan to a verdict
    pub fn run(mut self) -> Result<ScanReport, SwapError> {
        loop {
            match self.step() {
                ScanState::Accept { groups } => {
                    return Ok(ScanReport {
                        groups,
                        trail: self.trail,
                    })
                }
                ScanState::Reject(err) => return Err(err),
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidity::LiquidityDirection;
    use crate::snapshot::ReserveSnapshot;
    use std::cell::RefCell;
    use swap_model::Balance;

    #[test]
    fn test_transition_table() {
        use ScanEvent::*;
        use ScanState::*;
        const START: ScanState = ScanState::START;

        let cases = [
            (START, Foreign, Scanning { index: 3, succeeded: false }),
            (START, Checked(GroupAction::Swap), Scanning { index: 3, succeeded: true }),
            (START, Checked(GroupAction::AddLiquidity), LiquidityDone { index: 3 }),
            (START, Checked(GroupAction::RemoveLiquidity), LiquidityDone { index: 3 }),
            (START, ProviderFailed(SwapError::DataSize), Reject(SwapError::DataSize)),
            (
                Scanning { index: 6, succeeded: true },
                ProviderFailed(SwapError::IndexOutOfBound),
                SwapsExhausted { index: 6 },
            ),
            (
                Scanning { index: 6, succeeded: true },
                Foreign,
                Scanning { index: 9, succeeded: true },
            ),
            (
                Scanning { index: 6, succeeded: true },
                GroupFailed(SwapError::SwapNotCorrect),
                Reject(SwapError::SwapNotCorrect),
            ),
            (START, LimitExceeded, Reject(SwapError::TooManyPoolGroups)),
            (LiquidityDone { index: 3 }, Settle, FeeCheck { index: 3 }),
            (SwapsExhausted { index: 9 }, Settle, FeeCheck { index: 9 }),
            (FeeCheck { index: 9 }, FeePaid, Accept { groups: 3 }),
            (
                FeeCheck { index: 9 },
                FeeRejected(SwapError::FeeNotCorrect),
                Reject(SwapError::FeeNotCorrect),
            ),
            (Accept { groups: 1 }, Foreign, Accept { groups: 1 }),
            (Reject(SwapError::Overflow), FeePaid, Reject(SwapError::Overflow)),
            (START, FeePaid, START),
        ];
        for (state, event, expected) in cases {
            assert_eq!(transition(state, event), expected, "{:?} + {:?}", state, event);
        }
    }

    /// Scripted ledger: one entry per group index, anything past the end fails
    struct Scripted {
        groups: Vec<Result<GroupSnapshot, SwapError>>,
        fee: Result<(), SwapError>,
        fee_asked: RefCell<Option<(usize, usize)>>,
    }

    impl Scripted {
        fn new(groups: Vec<Result<GroupSnapshot, SwapError>>) -> Self {
            Self { groups, fee: Ok(()), fee_asked: RefCell::new(None) }
        }
    }

    impl ReserveSource for Scripted {
        fn snapshot(&self, index: usize) -> Result<GroupSnapshot, SwapError> {
            self.groups
                .get(index / GROUP_SIZE)
                .copied()
                .unwrap_or(Err(SwapError::IndexOutOfBound))
        }

        fn verify_liquidity_token(&self, _: usize, _: LiquidityDirection) -> Result<(), SwapError> {
            Ok(())
        }

        fn verify_fee(&self, index: usize, group_count: usize) -> Result<(), SwapError> {
            *self.fee_asked.borrow_mut() = Some((index, group_count));
            self.fee
        }
    }

    fn pool(a: (u128, u128), b: (u128, u128), l: (u128, u128)) -> Result<GroupSnapshot, SwapError> {
        Ok(GroupSnapshot::Pool(ReserveSnapshot {
            reserve_a: Balance::new(a.0 + 1, a.1 + 1),
            reserve_b: Balance::new(b.0 + 1, b.1 + 1),
            liquidity: Balance::new(l.0, l.1),
            native_a: false,
            native_b: false,
        }))
    }

    fn swap() -> Result<GroupSnapshot, SwapError> {
        pool((1_000, 1_100), (1_000, 910), (1_000, 1_000))
    }

    fn add() -> Result<GroupSnapshot, SwapError> {
        pool((1_000, 2_000), (1_000, 2_001), (1_000, 2_000))
    }

    #[test]
    fn test_swaps_then_fee() {
        let config = ProtocolConfig::default();
        let source = Scripted::new(vec![swap(), Ok(GroupSnapshot::Foreign), swap()]);
        let report = PoolScan::new(&source, &config).run().unwrap();
        assert_eq!(report.groups, 3);
        assert_eq!(report.trail.len(), 3);
        assert_eq!(report.trail[1], GroupRecord { index: 3, action: None });
        assert_eq!(*source.fee_asked.borrow(), Some((9, 3)));
    }

    #[test]
    fn test_liquidity_change_stops_scan() {
        let config = ProtocolConfig::default();
        // the second group is never looked at
        let source = Scripted::new(vec![add(), Err(SwapError::Encoding)]);
        let report = PoolScan::new(&source, &config).run().unwrap();
        assert_eq!(report.groups, 1);
        assert_eq!(*source.fee_asked.borrow(), Some((3, 1)));
    }

    #[test]
    fn test_nothing_scanned_is_rejected() {
        let config = ProtocolConfig::default();
        let source = Scripted::new(vec![Err(SwapError::LockScriptSize)]);
        assert_eq!(PoolScan::new(&source, &config).run(), Err(SwapError::LockScriptSize));

        // foreign pools alone are not a success
        let source = Scripted::new(vec![Ok(GroupSnapshot::Foreign)]);
        assert_eq!(PoolScan::new(&source, &config).run(), Err(SwapError::IndexOutOfBound));
    }

    #[test]
    fn test_failure_after_swap_ends_scan() {
        let config = ProtocolConfig::default();
        let source = Scripted::new(vec![swap(), Err(SwapError::CodeHashNotMatch)]);
        let report = PoolScan::new(&source, &config).run().unwrap();
        assert_eq!(report.groups, 1);
    }

    #[test]
    fn test_invariant_failure_is_fatal_after_swap() {
        let config = ProtocolConfig::default();
        let bad = pool((1_000, 1_200), (1_000, 910), (1_000, 1_000));
        let source = Scripted::new(vec![swap(), bad]);
        assert_eq!(PoolScan::new(&source, &config).run(), Err(SwapError::SwapNotCorrect));
    }

    #[test]
    fn test_group_limit() {
        let config = ProtocolConfig { max_pool_groups: 2, ..ProtocolConfig::default() };
        let source = Scripted::new(vec![swap(), swap(), swap()]);
        assert_eq!(PoolScan::new(&source, &config).run(), Err(SwapError::TooManyPoolGroups));

        let source = Scripted::new(vec![swap(), swap()]);
        assert_eq!(PoolScan::new(&source, &config).run().map(|r| r.groups), Ok(2));
    }

    #[test]
    fn test_fee_failure() {
        let config = ProtocolConfig::default();
        let mut source = Scripted::new(vec![swap()]);
        source.fee = Err(SwapError::FeeNotCorrect);
        assert_eq!(PoolScan::new(&source, &config).run(), Err(SwapError::FeeNotCorrect));
    }

    #[test]
    fn test_step_is_observable() {
        let config = ProtocolConfig::default();
        let source = Scripted::new(vec![add()]);
        let mut scan = PoolScan::new(&source, &config);
        assert_eq!(scan.step(), ScanState::LiquidityDone { index: 3 });
        assert_eq!(scan.step(), ScanState::FeeCheck { index: 3 });
        assert_eq!(scan.step(), ScanState::Accept { groups: 1 });
        assert!(scan.state().is_terminal());
        assert_eq!(scan.step(), ScanState::Accept { groups: 1 });
    }
}
