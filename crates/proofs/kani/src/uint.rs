//! Kani proofs for the fixed-width integer engine
//!
//! - **U1: Add/Sub agree with u128** on two-limb values
//! - **U2: Division is floor division** and reports a zero divisor
//! - **U3: Widening multiply never truncates** (div(mul(a, b), b) == a)
//! - **U4: Ordering matches the represented value**

use swap_model::{U128, U256, UintError};

/// U1: add and sub on `U128` match native `u128` arithmetic
#[kani::proof]
#[kani::unwind(4)]
fn u1_add_sub_match_native() {
    let a: u128 = kani::any();
    let b: u128 = kani::any();

    let (sum, carry) = U128::from_u128(a).overflowing_add(&U128::from_u128(b));
    let (expected, expected_carry) = a.overflowing_add(b);
    assert_eq!(sum.to_u128(), Some(expected), "U1: add must match u128");
    assert_eq!(carry, expected_carry, "U1: carry must match u128");

    let (diff, borrow) = U128::from_u128(a).overflowing_sub(&U128::from_u128(b));
    let (expected, expected_borrow) = a.overflowing_sub(b);
    assert_eq!(diff.to_u128(), Some(expected), "U1: sub must match u128");
    assert_eq!(borrow, expected_borrow, "U1: borrow must match u128");
}

/// U2: quotient is the floor and a zero divisor is reported
#[kani::proof]
#[kani::unwind(130)]
fn u2_division_is_floor() {
    let a: u64 = kani::any();
    let b: u64 = kani::any();

    let q = U128::from_u64(a).checked_div(&U128::from_u64(b));
    if b == 0 {
        assert_eq!(q, Err(UintError::DivideByZero), "U2: zero divisor must be reported");
    } else {
        assert_eq!(
            q.ok().and_then(|q| q.to_u128()),
            Some((a / b) as u128),
            "U2: quotient must be floor(a / b)"
        );
    }
}

/// U3: a widened product divided by one factor returns the other
#[kani::proof]
#[kani::unwind(260)]
fn u3_widening_mul_round_trip() {
    let a: u64 = kani::any();
    let b: u64 = kani::any();
    kani::assume(b != 0);

    let product: U256 = U128::from_u64(a).widening_mul(&U128::from_u64(b));
    let back = product.checked_div(&U256::from_u64(b));
    assert_eq!(back, Ok(U256::from_u64(a)), "U3: div(mul(a, b), b) == a");
}

/// U4: comparison order is the integer order
#[kani::proof]
#[kani::unwind(4)]
fn u4_ordering_matches_value() {
    let a: u128 = kani::any();
    let b: u128 = kani::any();

    assert_eq!(
        U128::from_u128(a).cmp(&U128::from_u128(b)),
        a.cmp(&b),
        "U4: cmp must follow the represented value"
    );
}
