//! Fixed-width unsigned integers
//!
//! `Uint<N>` stores `N` little-endian 64-bit limbs and represents values in
//! `[0, 2^(64·N) - 1]`. Every operation works on stack values of the same
//! width; nothing allocates.
//!
//! The `wrapping_*` operations wrap modulo `2^(64·N)` exactly like the
//! hardware integer types. Code that handles transaction-supplied amounts
//! uses the `checked_*` forms (or `widening_mul`) so that a value outside the
//! supported magnitude surfaces as an error instead of a silent truncation.

use core::cmp::Ordering;
use core::fmt;
use core::ops::BitOr;

/// 128-bit value (two limbs)
pub type U128 = Uint<2>;
/// 256-bit value, wide enough for the product of two `u128`
pub type U256 = Uint<4>;
/// 512-bit value, wide enough for the product of two `U256`
pub type U512 = Uint<8>;

const LIMB_BITS: u32 = 64;
const HALF_LIMB: u64 = 1 << (LIMB_BITS - 1);

/// Failures of the partial operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UintError {
    /// Division by zero
    DivideByZero,
    /// Result or normalisation step does not fit the width
    Overflow,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Uint<const N: usize>([u64; N]);

impl<const N: usize> Default for Uint<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Uint<N> {
    /// Zero
    pub const ZERO: Self = Self([0; N]);

    /// One
    pub const ONE: Self = {
        let mut limbs = [0u64; N];
        limbs[0] = 1;
        Self(limbs)
    };

    /// Largest representable value
    pub const MAX: Self = Self([u64::MAX; N]);

    /// Width in bits
    pub const BITS: u32 = LIMB_BITS * N as u32;

    /// Build from little-endian limbs
    pub const fn from_limbs(limbs: [u64; N]) -> Self {
        Self(limbs)
    }

    /// Little-endian limbs
    pub const fn limbs(&self) -> &[u64; N] {
        &self.0
    }

    pub const fn from_u64(value: u64) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = value;
        Self(limbs)
    }

    /// Build from a `u128`; the high half is dropped when `N == 1`
    pub const fn from_u128(value: u128) -> Self {
        let mut limbs = [0u64; N];
        limbs[0] = value as u64;
        if N > 1 {
            limbs[1] = (value >> LIMB_BITS) as u64;
        }
        Self(limbs)
    }

    /// Narrow to `u128`, `None` if any limb above the second is set
    pub fn to_u128(&self) -> Option<u128> {
        if self.0.iter().skip(2).any(|&limb| limb != 0) {
            return None;
        }
        let lo = self.0[0] as u128;
        let hi = self.0.get(1).copied().unwrap_or(0) as u128;
        Some(lo | (hi << LIMB_BITS))
    }

    /// Copy into a different width, `None` if the value does not fit
    pub fn resize<const M: usize>(&self) -> Option<Uint<M>> {
        let mut limbs = [0u64; M];
        for (i, &limb) in self.0.iter().enumerate() {
            if i < M {
                limbs[i] = limb;
            } else if limb != 0 {
                return None;
            }
        }
        Some(Uint(limbs))
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|&limb| limb == 0)
    }

    /// Overwrite `self` with `src`
    pub fn assign(&mut self, src: &Self) {
        self.0 = src.0;
    }

    // ========================================================================
    // Addition / subtraction
    // ========================================================================

    /// Limb-wise addition with carry; the flag is the carry out of the top limb
    pub fn overflowing_add(&self, rhs: &Self) -> (Self, bool) {
        let mut out = [0u64; N];
        let mut carry = false;
        for i in 0..N {
            let (sum, c1) = self.0[i].overflowing_add(rhs.0[i]);
            let (sum, c2) = sum.overflowing_add(carry as u64);
            out[i] = sum;
            carry = c1 || c2;
        }
        (Self(out), carry)
    }

    pub fn wrapping_add(&self, rhs: &Self) -> Self {
        self.overflowing_add(rhs).0
    }

    pub fn checked_add(&self, rhs: &Self) -> Option<Self> {
        match self.overflowing_add(rhs) {
            (sum, false) => Some(sum),
            (_, true) => None,
        }
    }

    /// Limb-wise subtraction with borrow; the flag is set when `rhs > self`
    pub fn overflowing_sub(&self, rhs: &Self) -> (Self, bool) {
        let mut out = [0u64; N];
        let mut borrow = false;
        for i in 0..N {
            let (diff, b1) = self.0[i].overflowing_sub(rhs.0[i]);
            let (diff, b2) = diff.overflowing_sub(borrow as u64);
            out[i] = diff;
            borrow = b1 || b2;
        }
        (Self(out), borrow)
    }

    /// Subtraction modulo the width. Callers order operands so that `self >= rhs`.
    pub fn wrapping_sub(&self, rhs: &Self) -> Self {
        self.overflowing_sub(rhs).0
    }

    pub fn checked_sub(&self, rhs: &Self) -> Option<Self> {
        match self.overflowing_sub(rhs) {
            (diff, false) => Some(diff),
            (_, true) => None,
        }
    }

    // ========================================================================
    // Multiplication
    // ========================================================================

    /// Schoolbook multiplication. Each limb pair produces a double-limb
    /// partial product that is accumulated at position `i + j`; partials that
    /// land at or beyond `N` are dropped and reported through the flag.
    pub fn overflowing_mul(&self, rhs: &Self) -> (Self, bool) {
        let mut out = [0u64; N];
        let mut overflow = false;

        for i in 0..N {
            if self.0[i] == 0 {
                continue;
            }
            let mut carry: u128 = 0;
            for j in 0..N {
                let product = (self.0[i] as u128) * (rhs.0[j] as u128);
                let k = i + j;
                if k < N {
                    // (2^64-1) + (2^64-1)^2 + (2^64-1) == 2^128-1, cannot wrap
                    let acc = out[k] as u128 + product + carry;
                    out[k] = acc as u64;
                    carry = acc >> LIMB_BITS;
                } else {
                    if product != 0 || carry != 0 {
                        overflow = true;
                    }
                    carry = 0;
                }
            }
            if carry != 0 {
                overflow = true;
            }
        }

        (Self(out), overflow)
    }

    pub fn wrapping_mul(&self, rhs: &Self) -> Self {
        self.overflowing_mul(rhs).0
    }

    pub fn checked_mul(&self, rhs: &Self) -> Option<Self> {
        match self.overflowing_mul(rhs) {
            (product, false) => Some(product),
            (_, true) => None,
        }
    }

    // ========================================================================
    // Division
    // ========================================================================

    /// Floor division by shift-and-subtract.
    ///
    /// The divisor is doubled until it exceeds the dividend, then walked back
    /// down one bit at a time; each successful subtraction ORs the matching
    /// quotient bit in. Every bit position is visited once, so OR and
    /// addition agree.
    ///
    /// # Errors
    /// * `DivideByZero` if `rhs` is zero
    /// * `Overflow` if normalising the divisor would shift a bit out of the
    ///   top limb, which happens once the dividend reaches `2^(BITS-1)`
    pub fn checked_div(&self, rhs: &Self) -> Result<Self, UintError> {
        if rhs.is_zero() {
            return Err(UintError::DivideByZero);
        }

        let mut current = Self::ONE;
        let mut denom = *rhs;
        while denom <= *self {
            if denom.0[N - 1] >= HALF_LIMB {
                return Err(UintError::Overflow);
            }
            current = current.shl_one_bit();
            denom = denom.shl_one_bit();
        }
        current = current.shr_one_bit();
        denom = denom.shr_one_bit();

        let mut remainder = *self;
        let mut quotient = Self::ZERO;
        while !current.is_zero() {
            if remainder >= denom {
                remainder = remainder.wrapping_sub(&denom);
                quotient = quotient | current;
            }
            current = current.shr_one_bit();
            denom = denom.shr_one_bit();
        }

        Ok(quotient)
    }

    // ========================================================================
    // Shifts
    // ========================================================================

    /// Shift left by whole limbs, zero-filling from the bottom
    pub fn lshift_word(&self, words: usize) -> Self {
        let mut out = [0u64; N];
        if words < N {
            out[words..].copy_from_slice(&self.0[..N - words]);
        }
        Self(out)
    }

    fn shl_one_bit(&self) -> Self {
        let mut out = [0u64; N];
        for i in (1..N).rev() {
            out[i] = (self.0[i] << 1) | (self.0[i - 1] >> (LIMB_BITS - 1));
        }
        out[0] = self.0[0] << 1;
        Self(out)
    }

    fn shr_one_bit(&self) -> Self {
        let mut out = [0u64; N];
        for i in 0..N - 1 {
            out[i] = (self.0[i] >> 1) | (self.0[i + 1] << (LIMB_BITS - 1));
        }
        out[N - 1] = self.0[N - 1] >> 1;
        Self(out)
    }
}

/// Full-width products: the result type is twice as wide as the operands,
/// so the multiplication can never truncate.
macro_rules! impl_widening_mul {
    ($($narrow:literal => $wide:literal),* $(,)?) => {
        $(
            impl Uint<$narrow> {
                pub fn widening_mul(&self, rhs: &Self) -> Uint<$wide> {
                    let mut out = [0u64; $wide];
                    for i in 0..$narrow {
                        let mut carry: u128 = 0;
                        for j in 0..$narrow {
                            let acc = out[i + j] as u128
                                + (self.0[i] as u128) * (rhs.0[j] as u128)
                                + carry;
                            out[i + j] = acc as u64;
                            carry = acc >> LIMB_BITS;
                        }
                        out[i + $narrow] = carry as u64;
                    }
                    Uint(out)
                }
            }
        )*
    };
}

impl_widening_mul!(1 => 2, 2 => 4, 4 => 8);

impl<const N: usize> Ord for Uint<N> {
    /// Most significant limb first
    fn cmp(&self, other: &Self) -> Ordering {
        for i in (0..N).rev() {
            match self.0[i].cmp(&other.0[i]) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        Ordering::Equal
    }
}

impl<const N: usize> PartialOrd for Uint<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<const N: usize> BitOr for Uint<N> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        let mut out = [0u64; N];
        for (i, limb) in out.iter_mut().enumerate() {
            *limb = self.0[i] | rhs.0[i];
        }
        Self(out)
    }
}

impl<const N: usize> From<u64> for Uint<N> {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl<const N: usize> From<u128> for Uint<N> {
    fn from(value: u128) -> Self {
        Self::from_u128(value)
    }
}

impl<const N: usize> fmt::LowerHex for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let top = (0..N).rev().find(|&i| self.0[i] != 0);
        match top {
            None => f.write_str("0"),
            Some(top) => {
                write!(f, "{:x}", self.0[top])?;
                for i in (0..top).rev() {
                    write!(f, "{:016x}", self.0[i])?;
                }
                Ok(())
            }
        }
    }
}

impl<const N: usize> fmt::Debug for Uint<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Uint<{}>(0x{:x})", N, self)
    }
}
