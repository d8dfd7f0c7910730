//! Error types shared by the pool, lock and liquidity token validators

use swap_model::ModelError;
use thiserror::Error;

/// Coarse classification of a rejection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A record has the wrong shape, size, or is missing
    StructuralMismatch,
    /// A hash or ownership comparison failed
    IdentityMismatch,
    /// A pricing or proportionality rule failed
    ArithmeticViolation,
    Underflow,
    Overflow,
    DivideByZero,
    /// Ordering, cardinality or primary-pool rules were broken
    PolicyViolation,
    FeeNotCorrect,
}

/// Validator error. The discriminant is the script exit code.
#[repr(i8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum SwapError {
    #[error("index out of bound")]
    IndexOutOfBound = 1,
    #[error("item missing")]
    ItemMissing = 2,
    #[error("encoding")]
    Encoding = 4,
    #[error("first transaction input does not match the pool type args")]
    InputNotMatch = 5,
    #[error("too many cells in the script group")]
    TooManyGroupCells = 6,
    #[error("not enough cells in the script group")]
    NotEnoughGroupCells = 7,
    #[error("pool lock script size not correct")]
    LockScriptSize = 8,
    #[error("pool type script size not correct")]
    TypeScriptSize = 9,
    #[error("pool data size not correct")]
    DataSize = 10,
    #[error("liquidity token script size not correct")]
    LiquidityTokenScriptSize = 11,
    #[error("liquidity token data size not correct")]
    LiquidityTokenDataSize = 12,
    #[error("script hash size not correct")]
    ScriptHashSize = 13,
    #[error("code hash does not match")]
    CodeHashNotMatch = 14,
    #[error("script does not match")]
    ScriptNotMatch = 15,
    #[error("transaction input does not match")]
    TxInputNotMatch = 16,
    #[error("pool group belongs to another pool")]
    ForeignPool = 17,
    #[error("pool data reserve does not match the locked amount")]
    ReserveLockAmountNotMatch = 18,
    #[error("assets are identical or out of order")]
    SameAssetOrOrder = 19,
    #[error("reserve below minimum")]
    ReserveBelowMinimum = 20,
    #[error("liquidity is empty")]
    LiquidityEmpty = 21,
    #[error("result not correct")]
    ResultNotCorrect = 22,
    #[error("liquidity can only change in the primary pool group")]
    GroupNotPrimary = 23,
    #[error("added liquidity below minimum")]
    AddLiquidityTooLow = 24,
    #[error("swap amounts not correct")]
    SwapNotCorrect = 25,
    #[error("add liquidity amounts not correct")]
    AddLiquidityNotCorrect = 26,
    #[error("minted liquidity not correct")]
    LiquidityNotCorrect = 27,
    #[error("remove liquidity amounts not correct")]
    RemoveLiquidityNotCorrect = 28,
    #[error("divide by zero")]
    DivideByZero = 29,
    #[error("underflow")]
    Underflow = 30,
    #[error("overflow")]
    Overflow = 31,
    #[error("fee cell carries a type script")]
    FeeCellTypeScriptExists = 32,
    #[error("fee not correct")]
    FeeNotCorrect = 33,
    #[error("too many pool groups in one transaction")]
    TooManyPoolGroups = 34,
    #[error("liquidity token input and output amounts do not match")]
    LiquidityTokenAmountNotMatch = 35,
    #[error("liquidity token cell with zero amount")]
    LiquidityTokenZeroAmount = 36,
    #[error("cannot unlock pool cells")]
    CannotUnlock = 37,
}

impl SwapError {
    /// Script exit code
    #[inline]
    pub fn code(&self) -> i8 {
        *self as i8
    }

    pub fn kind(&self) -> ErrorKind {
        use SwapError::*;
        match self {
            IndexOutOfBound | ItemMissing | Encoding | LockScriptSize | TypeScriptSize
            | DataSize | LiquidityTokenScriptSize | LiquidityTokenDataSize | ScriptHashSize => {
                ErrorKind::StructuralMismatch
            }
            InputNotMatch | CodeHashNotMatch | ScriptNotMatch | TxInputNotMatch | ForeignPool => {
                ErrorKind::IdentityMismatch
            }
            ReserveLockAmountNotMatch | ReserveBelowMinimum | LiquidityEmpty | ResultNotCorrect
            | SwapNotCorrect | AddLiquidityNotCorrect | LiquidityNotCorrect
            | RemoveLiquidityNotCorrect | LiquidityTokenAmountNotMatch
            | LiquidityTokenZeroAmount => ErrorKind::ArithmeticViolation,
            Underflow => ErrorKind::Underflow,
            Overflow => ErrorKind::Overflow,
            DivideByZero => ErrorKind::DivideByZero,
            TooManyGroupCells | NotEnoughGroupCells | SameAssetOrOrder | GroupNotPrimary
            | AddLiquidityTooLow | TooManyPoolGroups | CannotUnlock => ErrorKind::PolicyViolation,
            FeeCellTypeScriptExists | FeeNotCorrect => ErrorKind::FeeNotCorrect,
        }
    }
}

impl From<ModelError> for SwapError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::DivideByZero => SwapError::DivideByZero,
            ModelError::Underflow => SwapError::Underflow,
            ModelError::Overflow => SwapError::Overflow,
            ModelError::SwapNotCorrect => SwapError::SwapNotCorrect,
            ModelError::AddLiquidityNotCorrect => SwapError::AddLiquidityNotCorrect,
            ModelError::LiquidityNotCorrect => SwapError::LiquidityNotCorrect,
            ModelError::RemoveLiquidityNotCorrect => SwapError::RemoveLiquidityNotCorrect,
            ModelError::InvalidReserves
            | ModelError::InvalidAmount
            | ModelError::InsufficientLiquidity => SwapError::ResultNotCorrect,
        }
    }
}
