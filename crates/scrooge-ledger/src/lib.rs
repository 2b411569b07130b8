//! # scrooge-ledger
//!
//! Single-authority ledger engine for ScroogeLedger.
//!
//! This crate provides:
//! - [`UtxoSet`] - The set of produced but unspent outputs
//! - [`validation`] - The five-check validity predicate with typed rejection reasons
//! - [`TxHandler`] - Epoch processing: greedy, order-dependent batch acceptance
//! - [`SharedTxHandler`] - Mutex-guarded handle for embedding with several callers
//!
//! ## Architecture
//!
//! ```text
//! candidates (slice order)
//!          |
//! +------------------+
//! |    TxHandler     |  validate each against the live set, apply if valid
//! +------------------+
//!          |
//! +------------------+
//! |     UtxoSet      |  spent inputs removed, new outputs keyed (tx hash, index)
//! +------------------+
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use scrooge_ledger::{TxHandler, UtxoSet};
//!
//! let mut handler = TxHandler::new(&genesis);
//! let accepted = handler.process(&candidates);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod config;
mod error;
mod handler;
mod shared;
mod utxo_set;
pub mod validation;

pub use config::{GenesisConfig, GenesisUtxo, HandlerConfig};
pub use error::{Check, ConfigError, ConfigResult, Rejection};
pub use handler::{BatchOutcome, RejectedTx, TxHandler};
pub use shared::SharedTxHandler;
pub use utxo_set::UtxoSet;
pub use validation::{is_valid_against, validate_against, ValidTx};

pub use scrooge_types::{Input, Output, Transaction, Utxo};
