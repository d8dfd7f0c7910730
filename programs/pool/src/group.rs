//! Classification and invariant check of a single pool group

use swap_model::{check_add_liquidity, check_remove_liquidity, check_swap, Balance};
use udtswap_common::{msg, ProtocolConfig, SwapError};

use crate::liquidity::LiquidityDirection;
use crate::snapshot::{ReserveSnapshot, ReserveSource};

/// What a pool group did, derived from its liquidity supply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupAction {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
}

impl GroupAction {
    pub fn classify(liquidity: &Balance) -> Self {
        use core::cmp::Ordering;
        match liquidity.after.cmp(&liquidity.before) {
            Ordering::Equal => GroupAction::Swap,
            Ordering::Greater => GroupAction::AddLiquidity,
            Ordering::Less => GroupAction::RemoveLiquidity,
        }
    }

    #[inline]
    pub fn changes_liquidity(&self) -> bool {
        !matches!(self, GroupAction::Swap)
    }
}

/// Remove the locked baseline. Before values may sit at the baseline, after
/// values must stay strictly above it.
fn effective(balance: Balance, baseline: u128) -> Result<Balance, SwapError> {
    if balance.before < baseline || balance.after <= baseline {
        msg!("Error: Reserve below baseline {}", baseline);
        return Err(SwapError::ReserveBelowMinimum);
    }
    Ok(Balance::new(balance.before - baseline, balance.after - baseline))
}

fn require_funded(a: &Balance, b: &Balance, liquidity: &Balance) -> Result<(), SwapError> {
    if a.before == 0 || b.before == 0 {
        return Err(SwapError::ReserveBelowMinimum);
    }
    if liquidity.before == 0 {
        return Err(SwapError::LiquidityEmpty);
    }
    Ok(())
}

/// Check the group at `index` and report what it did
pub fn check_group<S: ReserveSource + ?Sized>(
    snapshot: &ReserveSnapshot,
    index: usize,
    source: &S,
    config: &ProtocolConfig,
) -> Result<GroupAction, SwapError> {
    let baseline = |native: bool| {
        if native {
            u128::from(config.native_reserve_baseline)
        } else {
            u128::from(config.token_reserve_baseline)
        }
    };
    let a = effective(snapshot.reserve_a, baseline(snapshot.native_a))?;
    let b = effective(snapshot.reserve_b, baseline(snapshot.native_b))?;
    let liquidity = snapshot.liquidity;

    let action = GroupAction::classify(&liquidity);
    if action.changes_liquidity() && index != 0 {
        msg!("Error: Liquidity changed in pool group {}", index);
        return Err(SwapError::GroupNotPrimary);
    }

    match action {
        GroupAction::Swap => {
            require_funded(&a, &b, &liquidity)?;
            let (input, output) = if a.after > a.before && b.after < b.before {
                (a, b)
            } else if a.after < a.before && b.after > b.before {
                (b, a)
            } else {
                msg!("Error: Swap must move the reserves in opposite directions");
                return Err(SwapError::ResultNotCorrect);
            };
            check_swap(input, output, config.fee())?;
        }
        GroupAction::AddLiquidity => {
            if a.after <= a.before || b.after <= b.before {
                msg!("Error: Deposit must increase both reserves");
                return Err(SwapError::ResultNotCorrect);
            }
            source.verify_liquidity_token(index, LiquidityDirection::Mint)?;

            let amount_a = a.increase()?;
            if amount_a < config.add_liquidity_minimum() {
                msg!("Error: Deposit {} below minimum", amount_a);
                return Err(SwapError::AddLiquidityTooLow);
            }
            if liquidity.before == 0 {
                // first deposit sets the supply to asset A
                if liquidity.increase()? != amount_a {
                    return Err(SwapError::LiquidityNotCorrect);
                }
            } else {
                check_add_liquidity(a, b, liquidity)?;
            }
        }
        GroupAction::RemoveLiquidity => {
            require_funded(&a, &b, &liquidity)?;
            if a.after >= a.before || b.after >= b.before {
                msg!("Error: Withdrawal must decrease both reserves");
                return Err(SwapError::ResultNotCorrect);
            }
            source.verify_liquidity_token(index, LiquidityDirection::Burn)?;
            check_remove_liquidity(a, b, liquidity)?;
        }
    }
    Ok(action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GroupSnapshot;
    use std::cell::Cell;

    /// Source that only answers the liquidity token question
    struct TokenCheck {
        result: Result<(), SwapError>,
        asked: Cell<Option<LiquidityDirection>>,
    }

    impl TokenCheck {
        fn ok() -> Self {
            Self { result: Ok(()), asked: Cell::new(None) }
        }
    }

    impl ReserveSource for TokenCheck {
        fn snapshot(&self, _index: usize) -> Result<GroupSnapshot, SwapError> {
            Err(SwapError::IndexOutOfBound)
        }

        fn verify_liquidity_token(
            &self,
            _index: usize,
            direction: LiquidityDirection,
        ) -> Result<(), SwapError> {
            self.asked.set(Some(direction));
            self.result
        }

        fn verify_fee(&self, _index: usize, _group_count: usize) -> Result<(), SwapError> {
            Ok(())
        }
    }

    fn config() -> ProtocolConfig {
        ProtocolConfig {
            token_reserve_baseline: 1,
            ..ProtocolConfig::default()
        }
    }

    /// Token/token snapshot; amounts are effective (baseline 1 added here)
    fn snapshot(a: (u128, u128), b: (u128, u128), l: (u128, u128)) -> ReserveSnapshot {
        ReserveSnapshot {
            reserve_a: Balance::new(a.0 + 1, a.1 + 1),
            reserve_b: Balance::new(b.0 + 1, b.1 + 1),
            liquidity: Balance::new(l.0, l.1),
            native_a: false,
            native_b: false,
        }
    }

    #[test]
    fn test_swap_either_direction() {
        let source = TokenCheck::ok();
        let a_to_b = snapshot((1_000, 1_100), (1_000, 910), (1_000, 1_000));
        assert_eq!(check_group(&a_to_b, 3, &source, &config()), Ok(GroupAction::Swap));

        let b_to_a = snapshot((1_000, 910), (1_000, 1_100), (1_000, 1_000));
        assert_eq!(check_group(&b_to_a, 3, &source, &config()), Ok(GroupAction::Swap));
        assert_eq!(source.asked.get(), None);
    }

    #[test]
    fn test_swap_monotonicity() {
        let source = TokenCheck::ok();
        let both_up = snapshot((1_000, 1_100), (1_000, 1_100), (1_000, 1_000));
        assert_eq!(check_group(&both_up, 0, &source, &config()), Err(SwapError::ResultNotCorrect));
        let both_down = snapshot((1_000, 900), (1_000, 900), (1_000, 1_000));
        assert_eq!(check_group(&both_down, 0, &source, &config()), Err(SwapError::ResultNotCorrect));
        let unchanged = snapshot((1_000, 1_000), (1_000, 1_000), (1_000, 1_000));
        assert_eq!(check_group(&unchanged, 0, &source, &config()), Err(SwapError::ResultNotCorrect));
    }

    #[test]
    fn test_swap_needs_funded_pool() {
        let source = TokenCheck::ok();
        let empty_reserve = snapshot((0, 100), (1_000, 900), (1_000, 1_000));
        assert_eq!(
            check_group(&empty_reserve, 0, &source, &config()),
            Err(SwapError::ReserveBelowMinimum)
        );
        let empty_supply = snapshot((1_000, 1_100), (1_000, 910), (0, 0));
        assert_eq!(check_group(&empty_supply, 0, &source, &config()), Err(SwapError::LiquidityEmpty));
    }

    #[test]
    fn test_baseline_bounds() {
        let source = TokenCheck::ok();
        let mut below = snapshot((1_000, 1_100), (1_000, 910), (1_000, 1_000));
        below.reserve_b.after = 1;
        assert_eq!(check_group(&below, 0, &source, &config()), Err(SwapError::ReserveBelowMinimum));

        let mut native = snapshot((1_000, 1_100), (1_000, 910), (1_000, 1_000));
        native.native_a = true;
        assert_eq!(check_group(&native, 0, &source, &config()), Err(SwapError::ReserveBelowMinimum));
    }

    #[test]
    fn test_add_liquidity() {
        let source = TokenCheck::ok();
        let add = snapshot((1_000, 2_000), (1_000, 2_001), (1_000, 2_000));
        assert_eq!(check_group(&add, 0, &source, &config()), Ok(GroupAction::AddLiquidity));
        assert_eq!(source.asked.get(), Some(LiquidityDirection::Mint));

        let small = snapshot((1_000, 1_100), (1_000, 1_101), (1_000, 1_100));
        assert_eq!(check_group(&small, 0, &source, &config()), Err(SwapError::AddLiquidityTooLow));

        let one_sided = snapshot((1_000, 2_000), (1_000, 1_000), (1_000, 2_000));
        assert_eq!(check_group(&one_sided, 0, &source, &config()), Err(SwapError::ResultNotCorrect));
    }

    #[test]
    fn test_bootstrap_deposit() {
        let source = TokenCheck::ok();
        let first = snapshot((0, 1_000), (0, 7), (0, 1_000));
        assert_eq!(check_group(&first, 0, &source, &config()), Ok(GroupAction::AddLiquidity));

        let short = snapshot((0, 999), (0, 7), (0, 999));
        assert_eq!(check_group(&short, 0, &source, &config()), Err(SwapError::AddLiquidityTooLow));

        let greedy = snapshot((0, 1_000), (0, 7), (0, 1_001));
        assert_eq!(check_group(&greedy, 0, &source, &config()), Err(SwapError::LiquidityNotCorrect));
    }

    #[test]
    fn test_remove_liquidity() {
        let source = TokenCheck::ok();
        let remove = snapshot((1_100, 1_000), (1_100, 1_000), (1_100, 1_000));
        assert_eq!(check_group(&remove, 0, &source, &config()), Ok(GroupAction::RemoveLiquidity));
        assert_eq!(source.asked.get(), Some(LiquidityDirection::Burn));

        let uneven = snapshot((1_100, 1_000), (1_100, 1_100), (1_100, 1_000));
        assert_eq!(check_group(&uneven, 0, &source, &config()), Err(SwapError::ResultNotCorrect));
    }

    #[test]
    fn test_liquidity_change_only_in_primary_group() {
        let source = TokenCheck::ok();
        let add = snapshot((1_000, 2_000), (1_000, 2_001), (1_000, 2_000));
        assert_eq!(check_group(&add, 3, &source, &config()), Err(SwapError::GroupNotPrimary));
        let remove = snapshot((1_100, 1_000), (1_100, 1_000), (1_100, 1_000));
        assert_eq!(check_group(&remove, 6, &source, &config()), Err(SwapError::GroupNotPrimary));
        assert_eq!(source.asked.get(), None);
    }

    #[test]
    fn test_token_failure_propagates() {
        let source = TokenCheck { result: Err(SwapError::TxInputNotMatch), asked: Cell::new(None) };
        let add = snapshot((1_000, 2_000), (1_000, 2_001), (1_000, 2_000));
        assert_eq!(check_group(&add, 0, &source, &config()), Err(SwapError::TxInputNotMatch));
    }
}
