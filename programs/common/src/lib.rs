//! Common types for the UDTswap validators
//!
//! Ledger snapshot, script context loaders, pool data layout, protocol
//! configuration and the shared error type.

pub mod config;
pub mod context;
pub mod data;
pub mod error;
pub mod ledger;

pub use config::{ConfigError, ProtocolConfig, POOL_GROUP_LIMIT};
pub use context::{ScriptContext, ScriptKind, Source};
pub use data::*;
pub use error::{ErrorKind, SwapError};
pub use ledger::*;

#[doc(hidden)]
pub use log;

/// Log a validator message.
///
/// Rejections are logged as `msg!("Error: ...")` right before the error is
/// returned. Messages go to the `log` facade under the `udtswap` target.
#[macro_export]
macro_rules! msg {
    ($($arg:tt)*) => {
        $crate::log::debug!(target: "udtswap", $($arg)*)
    };
}
