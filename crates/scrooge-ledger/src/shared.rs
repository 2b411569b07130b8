//! Mutex-guarded handler for embedding with several callers

use crate::error::Rejection;
use crate::handler::{BatchOutcome, TxHandler};
use crate::utxo_set::UtxoSet;
use crate::validation::ValidTx;
use parking_lot::Mutex;
use scrooge_crypto::{Secp256k1Verifier, SignatureVerifier};
use scrooge_types::Transaction;
use std::sync::Arc;

/// Cloneable handle that serializes every call into one [`TxHandler`].
///
/// Epochs submitted from different threads run one at a time, each seeing
/// the set left by the previous one.
pub struct SharedTxHandler<V = Secp256k1Verifier> {
    inner: Arc<Mutex<TxHandler<V>>>,
}

impl<V> Clone for SharedTxHandler<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V: SignatureVerifier> SharedTxHandler<V> {
    /// Wrap a handler
    pub fn new(handler: TxHandler<V>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(handler)),
        }
    }

    /// See [`TxHandler::process`]
    pub fn process(&self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.inner.lock().process(candidates)
    }

    /// See [`TxHandler::process_with_report`]
    pub fn process_with_report(&self, candidates: &[Transaction]) -> BatchOutcome {
        self.inner.lock().process_with_report(candidates)
    }

    /// See [`TxHandler::is_valid`]
    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.inner.lock().is_valid(tx)
    }

    /// See [`TxHandler::validate`]
    pub fn validate(&self, tx: &Transaction) -> Result<ValidTx, Rejection> {
        self.inner.lock().validate(tx)
    }

    /// Copy of the current UTXO set
    pub fn snapshot(&self) -> UtxoSet {
        self.inner.lock().utxo_pool().clone()
    }

    /// Number of completed epochs
    pub fn epoch(&self) -> u64 {
        self.inner.lock().epoch()
    }
}
