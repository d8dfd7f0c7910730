//! Transaction fixtures shared by the pool validator tests

#![allow(dead_code)]

use udtswap_common::{
    Cell, CellInput, CellOutput, Hash32, LiquidityTokenArgs, OutPoint, PoolData, PoolLockArgs,
    ProtocolConfig, ResolvedInput, Script, ScriptContext, ScriptKind, SwapError, Transaction,
};
use udtswap_pool::Verdict;

pub const POOL_TYPE_CODE_HASH: Hash32 = [0x11; 32];
pub const POOL_LOCK_CODE_HASH: Hash32 = [0x22; 32];
pub const LIQUIDITY_TOKEN_CODE_HASH: Hash32 = [0x33; 32];
pub const TOKEN_CODE_HASH: Hash32 = [0x44; 32];
pub const HASH_TYPE_TYPE: u8 = 1;

pub const POOL_CAPACITY: u64 = 250_0000_0000;
pub const TOKEN_CELL_CAPACITY: u64 = 142_0000_0000;

pub fn config() -> ProtocolConfig {
    ProtocolConfig {
        pool_type_code_hash: POOL_TYPE_CODE_HASH,
        pool_lock_code_hash: POOL_LOCK_CODE_HASH,
        liquidity_token_code_hash: LIQUIDITY_TOKEN_CODE_HASH,
        fee_lock_hash: fee_lock().hash(),
        ..ProtocolConfig::default()
    }
}

pub fn user_lock() -> Script {
    Script::new([0x55; 32], HASH_TYPE_TYPE, vec![0xaa; 20])
}

pub fn fee_lock() -> Script {
    Script::new([0x66; 32], HASH_TYPE_TYPE, vec![0xfe; 20])
}

pub fn cell_input(seed: u8) -> CellInput {
    CellInput {
        since: 0,
        previous_output: OutPoint {
            tx_hash: [seed; 32],
            index: 0,
        },
    }
}

pub fn user_cell(capacity: u64) -> Cell {
    Cell {
        output: CellOutput {
            capacity,
            lock: user_lock(),
            type_: None,
        },
        data: Vec::new(),
    }
}

/// Fee cell paying for `groups` pool groups
pub fn fee_cell(groups: u64) -> Cell {
    Cell {
        output: CellOutput {
            capacity: config().per_group_fee * groups,
            lock: fee_lock(),
            type_: None,
        },
        data: Vec::new(),
    }
}

#[derive(Debug, Clone)]
pub enum Asset {
    Native,
    Token(u8),
}

impl Asset {
    pub fn type_script(&self) -> Option<Script> {
        match self {
            Asset::Native => None,
            Asset::Token(n) => Some(Script::new(TOKEN_CODE_HASH, HASH_TYPE_TYPE, vec![*n; 32])),
        }
    }

    pub fn id(&self) -> Hash32 {
        self.type_script().map_or([0; 32], |script| script.hash())
    }

    pub fn baseline(&self) -> u128 {
        config().baseline(&self.id())
    }

    /// Cell holding `amount` of this asset under `lock`
    pub fn cell(&self, lock: Script, amount: u128) -> Cell {
        match self {
            Asset::Native => Cell {
                output: CellOutput {
                    capacity: amount as u64,
                    lock,
                    type_: None,
                },
                data: Vec::new(),
            },
            Asset::Token(_) => Cell {
                output: CellOutput {
                    capacity: TOKEN_CELL_CAPACITY,
                    lock,
                    type_: self.type_script(),
                },
                data: amount.to_le_bytes().to_vec(),
            },
        }
    }
}

/// Effective pool amounts, baselines excluded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolState {
    pub a: u128,
    pub b: u128,
    pub liquidity: u128,
}

pub const fn state(a: u128, b: u128, liquidity: u128) -> PoolState {
    PoolState { a, b, liquidity }
}

#[derive(Debug, Clone)]
pub struct Pool {
    pub creation_input: CellInput,
    pub asset_a: Asset,
    pub asset_b: Asset,
}

impl Pool {
    /// Pool over two assets, ordered by asset id
    pub fn new(seed: u8, x: Asset, y: Asset) -> Self {
        let (asset_a, asset_b) = if x.id() < y.id() { (x, y) } else { (y, x) };
        Self {
            creation_input: cell_input(seed),
            asset_a,
            asset_b,
        }
    }

    pub fn tokens(seed: u8) -> Self {
        Self::new(seed, Asset::Token(seed), Asset::Token(seed.wrapping_add(1)))
    }

    pub fn type_script(&self) -> Script {
        Script::new(
            POOL_TYPE_CODE_HASH,
            HASH_TYPE_TYPE,
            self.creation_input.to_bytes().to_vec(),
        )
    }

    pub fn lock_script(&self) -> Script {
        let args = PoolLockArgs {
            asset_a: self.asset_a.id(),
            asset_b: self.asset_b.id(),
        };
        Script::new(POOL_LOCK_CODE_HASH, HASH_TYPE_TYPE, args.to_bytes())
    }

    /// Pool cell and both reserve cells holding raw amounts
    pub fn cells(&self, reserve_a: u128, reserve_b: u128, liquidity: u128) -> [Cell; 3] {
        let data = PoolData {
            reserve_a,
            reserve_b,
            total_liquidity: liquidity,
        };
        [
            Cell {
                output: CellOutput {
                    capacity: POOL_CAPACITY,
                    lock: self.lock_script(),
                    type_: Some(self.type_script()),
                },
                data: data.to_bytes().to_vec(),
            },
            self.asset_a.cell(self.lock_script(), reserve_a),
            self.asset_b.cell(self.lock_script(), reserve_b),
        ]
    }

    /// Pool cells for effective amounts on top of the baselines
    pub fn group(&self, state: PoolState) -> [Cell; 3] {
        self.cells(
            state.a + self.asset_a.baseline(),
            state.b + self.asset_b.baseline(),
            state.liquidity,
        )
    }

    pub fn liquidity_token_type(&self) -> Script {
        let args = LiquidityTokenArgs {
            owner_lock_hash: self.lock_script().hash(),
            pool_input: self.creation_input.to_bytes(),
        };
        Script::new(LIQUIDITY_TOKEN_CODE_HASH, HASH_TYPE_TYPE, args.to_bytes())
    }

    pub fn liquidity_token(&self, amount: u128) -> Cell {
        Cell {
            output: CellOutput {
                capacity: TOKEN_CELL_CAPACITY,
                lock: user_lock(),
                type_: Some(self.liquidity_token_type()),
            },
            data: amount.to_le_bytes().to_vec(),
        }
    }
}

pub struct TxBuilder {
    tx: Transaction,
    seed: u8,
}

impl Default for TxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TxBuilder {
    pub fn new() -> Self {
        Self {
            tx: Transaction::default(),
            seed: 0x80,
        }
    }

    pub fn input(mut self, cell: Cell) -> Self {
        self.seed = self.seed.wrapping_add(1);
        let input = cell_input(self.seed);
        self.input_at(input, cell)
    }

    pub fn input_at(mut self, input: CellInput, cell: Cell) -> Self {
        self.tx.inputs.push(ResolvedInput { input, cell });
        self
    }

    pub fn inputs(self, cells: impl IntoIterator<Item = Cell>) -> Self {
        cells.into_iter().fold(self, |builder, cell| builder.input(cell))
    }

    pub fn output(mut self, cell: Cell) -> Self {
        self.tx.outputs.push(cell);
        self
    }

    pub fn outputs(self, cells: impl IntoIterator<Item = Cell>) -> Self {
        cells.into_iter().fold(self, |builder, cell| builder.output(cell))
    }

    pub fn build(self) -> Transaction {
        self.tx
    }
}

/// Transaction creating `pool`, consuming the pool's creation input
pub fn creation_tx(pool: &Pool) -> Transaction {
    TxBuilder::new()
        .input_at(pool.creation_input, user_cell(1_000_0000_0000))
        .outputs(pool.group(state(0, 0, 0)))
        .output(user_cell(100_0000_0000))
        .build()
}

/// Single-group swap
pub fn swap_tx(pool: &Pool, before: PoolState, after: PoolState) -> Transaction {
    TxBuilder::new()
        .inputs(pool.group(before))
        .input(user_cell(1_000_0000_0000))
        .outputs(pool.group(after))
        .output(fee_cell(1))
        .output(user_cell(900_0000_0000))
        .build()
}

/// Deposit minting to the liquidity token cell at output 4
pub fn add_liquidity_tx(pool: &Pool, before: PoolState, after: PoolState) -> Transaction {
    TxBuilder::new()
        .inputs(pool.group(before))
        .input(user_cell(1_000_0000_0000))
        .outputs(pool.group(after))
        .output(fee_cell(1))
        .output(pool.liquidity_token(after.liquidity - before.liquidity))
        .build()
}

/// Withdrawal burning the liquidity token cell at input 3
pub fn remove_liquidity_tx(pool: &Pool, before: PoolState, after: PoolState) -> Transaction {
    TxBuilder::new()
        .inputs(pool.group(before))
        .input(pool.liquidity_token(before.liquidity - after.liquidity))
        .outputs(pool.group(after))
        .output(fee_cell(1))
        .output(user_cell(900_0000_0000))
        .build()
}

pub fn run_pool(tx: &Transaction, pool: &Pool, config: &ProtocolConfig) -> Result<Verdict, SwapError> {
    let ctx = ScriptContext::new(tx, pool.type_script(), ScriptKind::Type);
    udtswap_pool::validate(&ctx, config)
}

pub fn groups(verdict: Verdict) -> usize {
    match verdict {
        Verdict::Operated(report) => report.groups,
        Verdict::Created => 0,
    }
}
