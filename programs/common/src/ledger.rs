//! Ledger snapshot handed to the validators
//!
//! A transaction is a list of resolved inputs (the consumed cells together
//! with the out-point that referenced them) and a list of created outputs.
//! Byte fields serialize as hex strings.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use serde::{Deserialize, Serialize};

use crate::context::ScriptKind;

pub type Hash32 = [u8; 32];

type Blake2b256 = Blake2b<U32>;

/// Size of a serialized `CellInput`
pub const CELL_INPUT_SIZE: usize = 44;

/// Fixed part of a serialized script (code hash + hash type)
pub const SCRIPT_HEADER_SIZE: usize = 33;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    #[serde(with = "hex_hash")]
    pub code_hash: Hash32,
    pub hash_type: u8,
    #[serde(with = "hex_bytes")]
    pub args: Vec<u8>,
}

impl Script {
    pub fn new(code_hash: Hash32, hash_type: u8, args: Vec<u8>) -> Self {
        Self { code_hash, hash_type, args }
    }

    /// Blake2b-256 over `code_hash || hash_type || args`
    pub fn hash(&self) -> Hash32 {
        let mut hasher = Blake2b256::new();
        hasher.update(self.code_hash);
        hasher.update([self.hash_type]);
        hasher.update(&self.args);
        hasher.finalize().into()
    }

    #[inline]
    pub fn serialized_size(&self) -> usize {
        SCRIPT_HEADER_SIZE + self.args.len()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutPoint {
    #[serde(with = "hex_hash")]
    pub tx_hash: Hash32,
    pub index: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellInput {
    pub since: u64,
    pub previous_output: OutPoint,
}

impl CellInput {
    /// `since` (LE) || `tx_hash` || `index` (LE)
    pub fn to_bytes(&self) -> [u8; CELL_INPUT_SIZE] {
        let mut out = [0u8; CELL_INPUT_SIZE];
        out[..8].copy_from_slice(&self.since.to_le_bytes());
        out[8..40].copy_from_slice(&self.previous_output.tx_hash);
        out[40..].copy_from_slice(&self.previous_output.index.to_le_bytes());
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellOutput {
    pub capacity: u64,
    pub lock: Script,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_: Option<Script>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub output: CellOutput,
    #[serde(with = "hex_bytes", default)]
    pub data: Vec<u8>,
}

impl Cell {
    #[inline]
    pub fn lock_hash(&self) -> Hash32 {
        self.output.lock.hash()
    }

    #[inline]
    pub fn type_hash(&self) -> Option<Hash32> {
        self.output.type_.as_ref().map(Script::hash)
    }
}

/// A consumed cell together with the input that referenced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedInput {
    pub input: CellInput,
    pub cell: Cell,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub inputs: Vec<ResolvedInput>,
    #[serde(default)]
    pub outputs: Vec<Cell>,
}

impl Transaction {
    /// Script groups the host runs, in first-seen order: lock scripts of
    /// inputs and type scripts of inputs and outputs
    pub fn script_groups(&self) -> Vec<(ScriptKind, Script)> {
        let mut seen: Vec<(ScriptKind, Script)> = Vec::new();
        let locks = self
            .inputs
            .iter()
            .map(|resolved| (ScriptKind::Lock, &resolved.cell.output.lock));
        let types = self
            .inputs
            .iter()
            .map(|resolved| &resolved.cell)
            .chain(self.outputs.iter())
            .filter_map(|cell| cell.output.type_.as_ref())
            .map(|script| (ScriptKind::Type, script));
        for (kind, script) in locks.chain(types) {
            if !seen.iter().any(|(k, s)| *k == kind && s == script) {
                seen.push((kind, script.clone()));
            }
        }
        seen
    }
}

pub(crate) mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(bytes)))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)
    }
}

pub(crate) mod hex_hash {
    use super::Hash32;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(hash: &Hash32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        super::hex_bytes::serialize(hash, serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Hash32, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let mut out = [0u8; 32];
        hex::decode_to_slice(s.trim_start_matches("0x"), &mut out)
            .map_err(serde::de::Error::custom)?;
        Ok(out)
    }
}
