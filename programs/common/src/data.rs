//! Byte layouts of pool cells and script args

use crate::error::SwapError;
use crate::ledger::{Hash32, CELL_INPUT_SIZE, SCRIPT_HEADER_SIZE};

/// Token amount stored at the front of a token cell's data
pub const AMOUNT_SIZE: usize = 16;

/// Pool lock args: asset A id || asset B id
pub const POOL_LOCK_ARGS_SIZE: usize = 64;
pub const POOL_LOCK_SCRIPT_SIZE: usize = SCRIPT_HEADER_SIZE + POOL_LOCK_ARGS_SIZE;

/// Pool type args: the first input of the creating transaction
pub const POOL_TYPE_ARGS_SIZE: usize = CELL_INPUT_SIZE;
pub const POOL_TYPE_SCRIPT_SIZE: usize = SCRIPT_HEADER_SIZE + POOL_TYPE_ARGS_SIZE;

/// Liquidity token args: owner lock hash || pool creation input
pub const LIQUIDITY_TOKEN_ARGS_SIZE: usize = 32 + CELL_INPUT_SIZE;
pub const LIQUIDITY_TOKEN_SCRIPT_SIZE: usize = SCRIPT_HEADER_SIZE + LIQUIDITY_TOKEN_ARGS_SIZE;

#[inline]
fn u128_at(bytes: &[u8], offset: usize) -> u128 {
    let mut buf = [0u8; AMOUNT_SIZE];
    buf.copy_from_slice(&bytes[offset..offset + AMOUNT_SIZE]);
    u128::from_le_bytes(buf)
}

/// Token amount held by a cell (first 16 bytes of data, little-endian)
pub fn read_amount(data: &[u8]) -> Result<u128, SwapError> {
    if data.len() < AMOUNT_SIZE {
        return Err(SwapError::DataSize);
    }
    Ok(u128_at(data, 0))
}

/// State stored in the pool cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolData {
    pub reserve_a: u128,
    pub reserve_b: u128,
    pub total_liquidity: u128,
}

impl PoolData {
    pub const SIZE: usize = 3 * AMOUNT_SIZE;

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SwapError> {
        if bytes.len() != Self::SIZE {
            return Err(SwapError::DataSize);
        }
        Ok(Self {
            reserve_a: u128_at(bytes, 0),
            reserve_b: u128_at(bytes, AMOUNT_SIZE),
            total_liquidity: u128_at(bytes, 2 * AMOUNT_SIZE),
        })
    }

    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut out = [0u8; Self::SIZE];
        out[..16].copy_from_slice(&self.reserve_a.to_le_bytes());
        out[16..32].copy_from_slice(&self.reserve_b.to_le_bytes());
        out[32..].copy_from_slice(&self.total_liquidity.to_le_bytes());
        out
    }
}

/// Asset pair named by a pool lock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolLockArgs {
    pub asset_a: Hash32,
    pub asset_b: Hash32,
}

impl PoolLockArgs {
    pub fn from_bytes(args: &[u8]) -> Result<Self, SwapError> {
        if args.len() != POOL_LOCK_ARGS_SIZE {
            return Err(SwapError::LockScriptSize);
        }
        let mut asset_a = [0u8; 32];
        let mut asset_b = [0u8; 32];
        asset_a.copy_from_slice(&args[..32]);
        asset_b.copy_from_slice(&args[32..]);
        Ok(Self { asset_a, asset_b })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(POOL_LOCK_ARGS_SIZE);
        out.extend_from_slice(&self.asset_a);
        out.extend_from_slice(&self.asset_b);
        out
    }
}

/// Args of a liquidity token type script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiquidityTokenArgs {
    pub owner_lock_hash: Hash32,
    pub pool_input: [u8; CELL_INPUT_SIZE],
}

impl LiquidityTokenArgs {
    pub fn from_bytes(args: &[u8]) -> Result<Self, SwapError> {
        if args.len() != LIQUIDITY_TOKEN_ARGS_SIZE {
            return Err(SwapError::LiquidityTokenScriptSize);
        }
        let mut owner_lock_hash = [0u8; 32];
        let mut pool_input = [0u8; CELL_INPUT_SIZE];
        owner_lock_hash.copy_from_slice(&args[..32]);
        pool_input.copy_from_slice(&args[32..]);
        Ok(Self { owner_lock_hash, pool_input })
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(LIQUIDITY_TOKEN_ARGS_SIZE);
        out.extend_from_slice(&self.owner_lock_hash);
        out.extend_from_slice(&self.pool_input);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_data_layout() {
        let data = PoolData { reserve_a: 1, reserve_b: 2, total_liquidity: u128::MAX };
        let bytes = data.to_bytes();
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[16], 2);
        assert_eq!(&bytes[32..], &[0xff; 16]);
        assert_eq!(PoolData::from_bytes(&bytes), Ok(data));
        assert_eq!(PoolData::from_bytes(&bytes[..47]), Err(SwapError::DataSize));
    }

    #[test]
    fn test_read_amount_ignores_trailing_bytes() {
        let mut data = 500u128.to_le_bytes().to_vec();
        data.extend_from_slice(&[9, 9]);
        assert_eq!(read_amount(&data), Ok(500));
        assert_eq!(read_amount(&data[..15]), Err(SwapError::DataSize));
    }

    #[test]
    fn test_script_sizes() {
        assert_eq!(POOL_LOCK_SCRIPT_SIZE, 97);
        assert_eq!(POOL_TYPE_SCRIPT_SIZE, 77);
        assert_eq!(LIQUIDITY_TOKEN_SCRIPT_SIZE, 109);
    }

    #[test]
    fn test_args_round_trip_and_size() {
        let args = LiquidityTokenArgs { owner_lock_hash: [4; 32], pool_input: [5; 44] };
        assert_eq!(LiquidityTokenArgs::from_bytes(&args.to_bytes()), Ok(args));
        assert_eq!(
            LiquidityTokenArgs::from_bytes(&[0; 75]),
            Err(SwapError::LiquidityTokenScriptSize)
        );
        assert_eq!(PoolLockArgs::from_bytes(&[0; 63]), Err(SwapError::LockScriptSize));
    }
}
