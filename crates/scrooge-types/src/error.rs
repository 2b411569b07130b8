//! Transaction construction errors

use scrooge_crypto::CryptoError;
use thiserror::Error;

/// Errors raised while building or signing a transaction.
///
/// Validation never produces these; a bad transaction is a rejection, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxError {
    /// Input index past the end of the input list
    #[error("input index {index} out of range ({len} inputs)")]
    InputIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of inputs
        len: usize,
    },

    /// Signing the input failed
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),
}

/// Result type for transaction construction
pub type TxResult<T> = Result<T, TxError>;
