//! Kani proofs for the swap model
//!
//! Run with `cargo kani -p proofs-kani`. Outside Kani the crate is empty.

#![cfg(kani)]

mod invariants;
mod uint;
