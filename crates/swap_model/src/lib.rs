//! Swap Model - Pure constant product validation math for UDTswap pools
//!
//! This crate contains the arithmetic core of the pool validator:
//! - a fixed-width unsigned integer engine (`uint`) wide enough to hold the
//!   products of 128-bit reserves without truncation
//! - the three transition invariants (swap, add liquidity, remove liquidity)
//! - off-chain quote helpers that reproduce the validator's rounding exactly
//!
//! No ledger types live here. The validator programs feed plain `u128`
//! before/after balances in and map `ModelError` into their own error codes.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]

#[cfg(kani)]
extern crate kani;

pub mod invariants;
pub mod math;
pub mod quote;
pub mod uint;

pub use invariants::{check_add_liquidity, check_remove_liquidity, check_swap, Balance};
pub use quote::{
    quote_add_liquidity, quote_remove_liquidity, quote_swap_input, quote_swap_output,
    AddLiquidityQuote, RemoveLiquidityQuote,
};
pub use uint::{Uint, UintError, U128, U256, U512};

/// Price scale used by the swap formulas (fee numerators are out of SCALE)
pub const SCALE: u128 = 1_000;

/// Fee-retention numerator of the deployed pools (0.3% fee)
pub const DEFAULT_FEE_NUMERATOR: u128 = 997;

/// Error types for pool math
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    /// A divisor derived from pool state was zero
    DivideByZero,
    /// A before/after difference went negative
    Underflow,
    /// An intermediate exceeded the supported width
    Overflow,
    /// Neither swap formula reproduces the observed amounts
    SwapNotCorrect,
    /// Second asset deposit does not match the pool ratio
    AddLiquidityNotCorrect,
    /// Minted liquidity does not match the deposit
    LiquidityNotCorrect,
    /// Withdrawn amounts do not match the burned liquidity
    RemoveLiquidityNotCorrect,
    /// Invalid reserves (zero) passed to a quote
    InvalidReserves,
    /// Invalid amount (zero) passed to a quote
    InvalidAmount,
    /// Requested amount would drain the pool
    InsufficientLiquidity,
}

impl From<UintError> for ModelError {
    fn from(err: UintError) -> Self {
        match err {
            UintError::DivideByZero => ModelError::DivideByZero,
            UintError::Overflow => ModelError::Overflow,
        }
    }
}
