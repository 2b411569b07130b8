//! Rejection reasons and configuration errors

use scrooge_crypto::CryptoError;
use scrooge_primitives::{Amount, HashError};
use scrooge_types::Utxo;
use thiserror::Error;

/// The five validity checks, numbered as they are documented on
/// [`validate_against`](crate::validate_against)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// Every referenced output exists in the pool
    Existence,
    /// Every input is signed by the referenced output's recipient
    Authorization,
    /// No output is claimed twice by the same transaction
    NoDoubleSpend,
    /// No output value is negative
    NonNegativeOutputs,
    /// Inputs cover outputs
    Conservation,
}

/// Why a transaction was not accepted
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Input references an output that is not in the pool
    #[error("input {input} references unknown output {utxo}")]
    MissingUtxo {
        /// Input position
        input: usize,
        /// Claimed output
        utxo: Utxo,
    },

    /// Input carries no signature
    #[error("input {input} is not signed")]
    MissingSignature {
        /// Input position
        input: usize,
    },

    /// Signature does not verify against the referenced recipient
    #[error("invalid signature on input {input}")]
    InvalidSignature {
        /// Input position
        input: usize,
    },

    /// Output already claimed by an earlier input of the same transaction
    #[error("input {input} claims {utxo} a second time")]
    DuplicateInput {
        /// Input position
        input: usize,
        /// Claimed output
        utxo: Utxo,
    },

    /// Output with a negative value
    #[error("output {output} has negative value {value}")]
    NegativeOutput {
        /// Output position
        output: usize,
        /// Offending value
        value: Amount,
    },

    /// Outputs exceed inputs
    #[error("insufficient input value: inputs {input_sum}, outputs {output_sum}")]
    InsufficientInput {
        /// Sum of referenced input values
        input_sum: i128,
        /// Sum of output values
        output_sum: i128,
    },
}

impl Rejection {
    /// The check this rejection failed
    pub fn check(&self) -> Check {
        match self {
            Rejection::MissingUtxo { .. } => Check::Existence,
            Rejection::MissingSignature { .. } | Rejection::InvalidSignature { .. } => {
                Check::Authorization
            }
            Rejection::DuplicateInput { .. } => Check::NoDoubleSpend,
            Rejection::NegativeOutput { .. } => Check::NonNegativeOutputs,
            Rejection::InsufficientInput { .. } => Check::Conservation,
        }
    }
}

/// Errors while turning a genesis configuration into a UTXO set
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON
    #[error("invalid genesis json: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed transaction hash
    #[error("genesis entry {entry}: invalid tx hash: {source}")]
    InvalidHash {
        /// Entry position
        entry: usize,
        /// Parse failure
        source: HashError,
    },

    /// Malformed recipient key
    #[error("genesis entry {entry}: invalid recipient: {source}")]
    InvalidRecipient {
        /// Entry position
        entry: usize,
        /// Parse failure
        source: CryptoError,
    },

    /// Negative genesis value
    #[error("genesis entry {entry}: negative value {value}")]
    NegativeValue {
        /// Entry position
        entry: usize,
        /// Offending value
        value: Amount,
    },

    /// Two entries with the same identifier
    #[error("duplicate genesis utxo {0}")]
    DuplicateUtxo(Utxo),
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;
