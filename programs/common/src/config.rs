//! Protocol configuration
//!
//! Every constant the validators compare against lives here. The struct is
//! built once (from defaults or a TOML file) and passed by reference.
//!
//! The defaults carry the deployed fee schedule but zeroed code hashes, so
//! they fail `validate()` until a deployment fills the hashes in.

use serde::{Deserialize, Serialize};
use swap_model::{DEFAULT_FEE_NUMERATOR, SCALE};
use thiserror::Error;

use crate::ledger::{hex_hash, Hash32};

/// Hard ceiling for `max_pool_groups`
pub const POOL_GROUP_LIMIT: usize = 64;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse protocol config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid protocol config: {0}")]
    Invalid(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProtocolConfig {
    /// Code hash of the pool type script
    #[serde(with = "hex_hash")]
    pub pool_type_code_hash: Hash32,
    /// Code hash of the pool lock script
    #[serde(with = "hex_hash")]
    pub pool_lock_code_hash: Hash32,
    /// Code hash of the liquidity token type script
    #[serde(with = "hex_hash")]
    pub liquidity_token_code_hash: Hash32,
    /// Asset id standing for the native asset
    #[serde(with = "hex_hash")]
    pub native_asset_id: Hash32,
    /// Lock hash of the cell collecting the per-group fee
    #[serde(with = "hex_hash")]
    pub fee_lock_hash: Hash32,

    /// Fee charged per processed pool group, in native units
    pub per_group_fee: u64,
    /// Reserve permanently locked in a pool for the native asset
    pub native_reserve_baseline: u64,
    /// Reserve permanently locked in a pool for a token asset
    pub token_reserve_baseline: u64,
    /// Fraction of the input kept after the swap fee, out of 1000
    pub fee_numerator: u64,
    /// Smallest accepted asset A deposit
    pub add_liquidity_minimum: u64,

    /// Output index of the minted liquidity token cell
    pub mint_output_index: usize,
    /// Input index of the burned liquidity token cell
    pub burn_input_index: usize,
    /// Most pool groups one transaction may carry
    pub max_pool_groups: usize,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            pool_type_code_hash: [0; 32],
            pool_lock_code_hash: [0; 32],
            liquidity_token_code_hash: [0; 32],
            native_asset_id: [0; 32],
            fee_lock_hash: [0; 32],
            per_group_fee: 6_100_000_000,
            native_reserve_baseline: 30_000_000_000,
            token_reserve_baseline: 1,
            fee_numerator: DEFAULT_FEE_NUMERATOR as u64,
            add_liquidity_minimum: 1_000,
            mint_output_index: 4,
            burn_input_index: 3,
            max_pool_groups: 32,
        }
    }
}

impl ProtocolConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fee_numerator == 0 || u128::from(self.fee_numerator) > SCALE {
            return Err(ConfigError::Invalid("fee_numerator must be in 1..=1000"));
        }
        if self.max_pool_groups == 0 || self.max_pool_groups > POOL_GROUP_LIMIT {
            return Err(ConfigError::Invalid("max_pool_groups must be in 1..=64"));
        }

        let code_hashes = [
            &self.pool_type_code_hash,
            &self.pool_lock_code_hash,
            &self.liquidity_token_code_hash,
        ];
        if code_hashes.iter().any(|hash| **hash == [0; 32]) {
            return Err(ConfigError::Invalid("script code hashes must be set"));
        }
        if code_hashes[0] == code_hashes[1]
            || code_hashes[0] == code_hashes[2]
            || code_hashes[1] == code_hashes[2]
        {
            return Err(ConfigError::Invalid("script code hashes must be distinct"));
        }
        Ok(())
    }

    #[inline]
    pub fn is_native(&self, asset_id: &Hash32) -> bool {
        asset_id == &self.native_asset_id
    }

    /// Baseline reserve for an asset
    #[inline]
    pub fn baseline(&self, asset_id: &Hash32) -> u128 {
        if self.is_native(asset_id) {
            u128::from(self.native_reserve_baseline)
        } else {
            u128::from(self.token_reserve_baseline)
        }
    }

    #[inline]
    pub fn fee(&self) -> u128 {
        u128::from(self.fee_numerator)
    }

    #[inline]
    pub fn add_liquidity_minimum(&self) -> u128 {
        u128::from(self.add_liquidity_minimum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CODE_HASHES: &str = r#"
        pool_type_code_hash = "0x1111111111111111111111111111111111111111111111111111111111111111"
        pool_lock_code_hash = "0x2222222222222222222222222222222222222222222222222222222222222222"
        liquidity_token_code_hash = "0x3333333333333333333333333333333333333333333333333333333333333333"
    "#;

    fn deployed() -> ProtocolConfig {
        ProtocolConfig {
            pool_type_code_hash: [0x11; 32],
            pool_lock_code_hash: [0x22; 32],
            liquidity_token_code_hash: [0x33; 32],
            ..ProtocolConfig::default()
        }
    }

    #[test]
    fn test_defaults() {
        let config = ProtocolConfig::default();
        assert_eq!(config.baseline(&[0; 32]), 30_000_000_000);
        assert_eq!(config.baseline(&[1; 32]), 1);
        // code hashes are deployment specific
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(deployed().validate().is_ok());
    }

    #[test]
    fn test_from_toml_partial() {
        let toml = format!("{}\nfee_numerator = 1000\nmax_pool_groups = 4\n", CODE_HASHES);
        let config = ProtocolConfig::from_toml_str(&toml).unwrap();
        assert_eq!(config.pool_type_code_hash, [0x11; 32]);
        assert_eq!(config.fee(), 1_000);
        assert_eq!(config.max_pool_groups, 4);
        assert_eq!(config.per_group_fee, 6_100_000_000);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        for bad in ["fee_numerator = 0", "fee_numerator = 1001", "max_pool_groups = 0", "max_pool_groups = 65"] {
            let toml = format!("{}\n{}\n", CODE_HASHES, bad);
            assert!(matches!(ProtocolConfig::from_toml_str(&toml), Err(ConfigError::Invalid(_))));
        }
        assert!(matches!(
            ProtocolConfig::from_toml_str("unknown = 1"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validate_rejects_missing_code_hashes() {
        let config = ProtocolConfig { liquidity_token_code_hash: [0; 32], ..deployed() };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let partial = r#"pool_type_code_hash = "0x1111111111111111111111111111111111111111111111111111111111111111""#;
        assert!(matches!(ProtocolConfig::from_toml_str(partial), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_shared_code_hashes() {
        let shared = [
            ProtocolConfig { liquidity_token_code_hash: [0x11; 32], ..deployed() },
            ProtocolConfig { pool_lock_code_hash: [0x11; 32], ..deployed() },
            ProtocolConfig { liquidity_token_code_hash: [0x22; 32], ..deployed() },
        ];
        for config in shared {
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Invalid("script code hashes must be distinct"))
            ));
        }
    }
}
