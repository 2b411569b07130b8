//! # scrooge-types
//!
//! Core ledger types for ScroogeLedger.
//!
//! This crate provides:
//! - [`Transaction`](transaction::Transaction) - Inputs, outputs and the content hash
//! - [`Utxo`](utxo::Utxo) - Identifier of an unspent output
//! - [`codec`] - Canonical encodings for hashing and signing

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod error;
pub mod transaction;
pub mod utxo;

pub use error::{TxError, TxResult};
pub use transaction::{Input, Output, Transaction};
pub use utxo::Utxo;
