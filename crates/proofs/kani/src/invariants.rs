//! Kani proofs for the pool invariants
//!
//! - **S1: Quoted swaps are accepted** for both exact-input and exact-output
//! - **S2: A swap never pays out more than formula 2 allows** without the
//!   input formula vouching for it
//! - **S3: Deposits round in the pool's favour**
//! - **S4: Withdrawals never exceed the pro-rata share**
//! - **S5: No panics** on arbitrary balances

use swap_model::{
    check_add_liquidity, check_remove_liquidity, check_swap, quote_swap_input,
    quote_swap_output, Balance, ModelError, DEFAULT_FEE_NUMERATOR,
};

/// S1: the exact-input quote always passes the swap check
#[kani::proof]
#[kani::unwind(600)]
fn s1_quoted_swap_accepted() {
    let reserve_in: u16 = kani::any();
    let reserve_out: u16 = kani::any();
    let amount_in: u16 = kani::any();
    kani::assume(reserve_in > 0 && reserve_out > 0 && amount_in > 0);

    let (rin, rout, din) = (reserve_in as u128, reserve_out as u128, amount_in as u128);
    if let Ok(out) = quote_swap_output(rin, rout, din, DEFAULT_FEE_NUMERATOR) {
        assert!(out < rout, "S1: output must leave a positive reserve");
        let result = check_swap(
            Balance::new(rin, rin + din),
            Balance::new(rout, rout - out),
            DEFAULT_FEE_NUMERATOR,
        );
        assert_eq!(result, Ok(()), "S1: quoted exact-input swap must pass");
    }
}

/// S1: the exact-output quote always passes the swap check
#[kani::proof]
#[kani::unwind(600)]
fn s1_quoted_exact_output_accepted() {
    let reserve_in: u16 = kani::any();
    let reserve_out: u16 = kani::any();
    let amount_out: u16 = kani::any();
    kani::assume(reserve_in > 0 && amount_out > 0 && amount_out < reserve_out);

    let (rin, rout, dout) = (reserve_in as u128, reserve_out as u128, amount_out as u128);
    if let Ok(din) = quote_swap_input(rin, rout, dout, DEFAULT_FEE_NUMERATOR) {
        let result = check_swap(
            Balance::new(rin, rin + din),
            Balance::new(rout, rout - dout),
            DEFAULT_FEE_NUMERATOR,
        );
        assert_eq!(result, Ok(()), "S1: quoted exact-output swap must pass");
    }
}

/// S2: taking one unit more than quoted is only accepted when the input
/// formula independently prices it at the amount paid
#[kani::proof]
#[kani::unwind(600)]
fn s2_no_free_output() {
    let reserve_in: u16 = kani::any();
    let reserve_out: u16 = kani::any();
    let amount_in: u16 = kani::any();
    kani::assume(reserve_in > 0 && reserve_out > 1 && amount_in > 0);

    let (rin, rout, din) = (reserve_in as u128, reserve_out as u128, amount_in as u128);
    if let Ok(out) = quote_swap_output(rin, rout, din, DEFAULT_FEE_NUMERATOR) {
        let greedy = out + 1;
        kani::assume(greedy < rout);
        let result = check_swap(
            Balance::new(rin, rin + din),
            Balance::new(rout, rout - greedy),
            DEFAULT_FEE_NUMERATOR,
        );
        if result.is_ok() {
            assert_eq!(
                quote_swap_input(rin, rout, greedy, DEFAULT_FEE_NUMERATOR),
                Ok(din),
                "S2: extra output needs the input formula's approval"
            );
        }
    }
}

/// S3: an accepted deposit never mints more than the pro-rata share and
/// never takes less than the pro-rata amount of asset B
#[kani::proof]
#[kani::unwind(600)]
fn s3_deposit_favours_pool() {
    let ra: u8 = kani::any();
    let rb: u8 = kani::any();
    let l: u8 = kani::any();
    let da: u8 = kani::any();
    let db: u16 = kani::any();
    let minted: u16 = kani::any();
    kani::assume(ra > 0 && l > 0);

    let (ra, rb, l, da) = (ra as u128, rb as u128, l as u128, da as u128);
    let (db, minted) = (db as u128, minted as u128);
    let result = check_add_liquidity(
        Balance::new(ra, ra + da),
        Balance::new(rb, rb + db),
        Balance::new(l, l + minted),
    );
    if result.is_ok() {
        assert!(db * ra > rb * da, "S3: asset B must be rounded up");
        assert!(minted * ra <= l * da, "S3: minted liquidity must be rounded down");
    }
}

/// S4: an accepted withdrawal never exceeds burned / L of either reserve
#[kani::proof]
#[kani::unwind(600)]
fn s4_withdrawal_bounded() {
    let ra: u8 = kani::any();
    let rb: u8 = kani::any();
    let l: u8 = kani::any();
    let burned: u8 = kani::any();
    let wa: u8 = kani::any();
    let wb: u8 = kani::any();
    kani::assume(burned <= l && wa <= ra && wb <= rb);

    let (ra, rb, l, burned, wa, wb) = (
        ra as u128, rb as u128, l as u128, burned as u128, wa as u128, wb as u128,
    );
    let result = check_remove_liquidity(
        Balance::new(ra, ra - wa),
        Balance::new(rb, rb - wb),
        Balance::new(l, l - burned),
    );
    if l == 0 {
        assert_eq!(result, Err(ModelError::DivideByZero), "S4: empty supply must be rejected");
    } else if result.is_ok() {
        assert!(wa * l <= burned * ra, "S4: asset A must be rounded down");
        assert!(wb * l <= burned * rb, "S4: asset B must be rounded down");
    }
}

/// S5: arbitrary balances either pass or fail, never panic
#[kani::proof]
#[kani::unwind(600)]
fn s5_no_panic() {
    let a = Balance::new(kani::any::<u16>() as u128, kani::any::<u16>() as u128);
    let b = Balance::new(kani::any::<u16>() as u128, kani::any::<u16>() as u128);
    let l = Balance::new(kani::any::<u16>() as u128, kani::any::<u16>() as u128);
    let fee: u16 = kani::any();
    kani::assume(fee > 0 && fee <= 1_000);

    let _ = check_swap(a, b, fee as u128);
    let _ = check_add_liquidity(a, b, l);
    let _ = check_remove_liquidity(a, b, l);
}
