//! Execution context of one script group
//!
//! Loaders mirror the host syscalls: every lookup names an index and a
//! source, and a missing cell is `IndexOutOfBound` while a missing optional
//! field is `ItemMissing`.

use crate::error::SwapError;
use crate::ledger::{Cell, CellInput, Hash32, Script, Transaction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Input,
    Output,
    /// Inputs carrying the executing script
    GroupInput,
    /// Outputs carrying the executing script (type scripts only)
    GroupOutput,
}

/// Whether the executing script runs as a lock or a type script
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptKind {
    Lock,
    Type,
}

pub struct ScriptContext<'a> {
    tx: &'a Transaction,
    script: Script,
    script_hash: Hash32,
    kind: ScriptKind,
    group_inputs: Vec<usize>,
    group_outputs: Vec<usize>,
}

impl<'a> ScriptContext<'a> {
    /// Build the context for `script` running as `kind` over `tx`
    pub fn new(tx: &'a Transaction, script: Script, kind: ScriptKind) -> Self {
        let script_hash = script.hash();
        let matches = |cell: &Cell| match kind {
            ScriptKind::Lock => cell.lock_hash() == script_hash,
            ScriptKind::Type => cell.type_hash() == Some(script_hash),
        };

        let group_inputs = tx
            .inputs
            .iter()
            .enumerate()
            .filter(|(_, resolved)| matches(&resolved.cell))
            .map(|(i, _)| i)
            .collect();
        // lock scripts only run over inputs
        let group_outputs = match kind {
            ScriptKind::Lock => Vec::new(),
            ScriptKind::Type => tx
                .outputs
                .iter()
                .enumerate()
                .filter(|(_, cell)| matches(cell))
                .map(|(i, _)| i)
                .collect(),
        };

        Self {
            tx,
            script,
            script_hash,
            kind,
            group_inputs,
            group_outputs,
        }
    }

    #[inline]
    pub fn script(&self) -> &Script {
        &self.script
    }

    #[inline]
    pub fn script_hash(&self) -> Hash32 {
        self.script_hash
    }

    #[inline]
    pub fn kind(&self) -> ScriptKind {
        self.kind
    }

    #[inline]
    pub fn transaction(&self) -> &'a Transaction {
        self.tx
    }

    #[inline]
    pub fn group_input_count(&self) -> usize {
        self.group_inputs.len()
    }

    #[inline]
    pub fn group_output_count(&self) -> usize {
        self.group_outputs.len()
    }

    pub fn load_cell(&self, index: usize, source: Source) -> Result<&'a Cell, SwapError> {
        let tx = self.tx;
        let cell = match source {
            Source::Input => tx.inputs.get(index).map(|resolved| &resolved.cell),
            Source::Output => tx.outputs.get(index),
            Source::GroupInput => self
                .group_inputs
                .get(index)
                .and_then(|&i| tx.inputs.get(i))
                .map(|resolved| &resolved.cell),
            Source::GroupOutput => self
                .group_outputs
                .get(index)
                .and_then(|&i| tx.outputs.get(i)),
        };
        cell.ok_or(SwapError::IndexOutOfBound)
    }

    /// Input record (out-point and since) of an input cell
    pub fn load_input(&self, index: usize, source: Source) -> Result<&'a CellInput, SwapError> {
        let position = match source {
            Source::Input => index,
            Source::GroupInput => *self
                .group_inputs
                .get(index)
                .ok_or(SwapError::IndexOutOfBound)?,
            Source::Output | Source::GroupOutput => return Err(SwapError::IndexOutOfBound),
        };
        self.tx
            .inputs
            .get(position)
            .map(|resolved| &resolved.input)
            .ok_or(SwapError::IndexOutOfBound)
    }

    #[inline]
    pub fn load_lock(&self, index: usize, source: Source) -> Result<&'a Script, SwapError> {
        Ok(&self.load_cell(index, source)?.output.lock)
    }

    #[inline]
    pub fn load_lock_hash(&self, index: usize, source: Source) -> Result<Hash32, SwapError> {
        Ok(self.load_cell(index, source)?.lock_hash())
    }

    pub fn load_type(&self, index: usize, source: Source) -> Result<&'a Script, SwapError> {
        self.load_cell(index, source)?
            .output
            .type_
            .as_ref()
            .ok_or(SwapError::ItemMissing)
    }

    pub fn load_type_hash(&self, index: usize, source: Source) -> Result<Hash32, SwapError> {
        self.load_cell(index, source)?
            .type_hash()
            .ok_or(SwapError::ItemMissing)
    }

    #[inline]
    pub fn load_capacity(&self, index: usize, source: Source) -> Result<u64, SwapError> {
        Ok(self.load_cell(index, source)?.output.capacity)
    }

    #[inline]
    pub fn load_data(&self, index: usize, source: Source) -> Result<&'a [u8], SwapError> {
        Ok(&self.load_cell(index, source)?.data)
    }
}
