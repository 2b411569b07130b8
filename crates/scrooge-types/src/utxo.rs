//! Unspent output identifier

use scrooge_primitives::{OutputIndex, H256};
use std::fmt;

/// Identifier of a transaction output: producing transaction hash plus output position.
///
/// Ordered by hash bytes, then by index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Utxo {
    /// Hash of the transaction that produced the output
    pub tx_hash: H256,
    /// Position of the output in that transaction
    pub index: OutputIndex,
}

impl Utxo {
    /// Create a new identifier
    pub fn new(tx_hash: H256, index: OutputIndex) -> Self {
        Self { tx_hash, index }
    }
}

impl fmt::Display for Utxo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.tx_hash.short_hex(), self.index)
    }
}
