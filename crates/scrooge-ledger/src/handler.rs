//! Epoch processing over an owned UTXO set

use crate::config::HandlerConfig;
use crate::error::Rejection;
use crate::utxo_set::UtxoSet;
use crate::validation::{validate_against, ValidTx};
use scrooge_crypto::{Secp256k1Verifier, SignatureVerifier};
use scrooge_primitives::{OutputIndex, H256};
use scrooge_types::{codec, Transaction, Utxo};

/// A candidate that was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedTx {
    /// Position of the candidate in the submitted batch
    pub position: usize,
    /// Content hash of the candidate
    pub tx_hash: H256,
    /// First failed check
    pub reason: Rejection,
}

/// Result of one epoch
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Accepted transactions, in acceptance order, finalized
    pub accepted: Vec<Transaction>,
    /// Rejected candidates, in batch order
    pub rejected: Vec<RejectedTx>,
}

/// The single validating authority.
///
/// Owns a private copy of the UTXO set and mutates it only in
/// [`process`](Self::process) / [`process_with_report`](Self::process_with_report).
///
/// Conflicts between candidates of one batch are resolved greedily in slice
/// order: a candidate is validated against the set as left by every earlier
/// acceptance in the same batch. No search for a larger or more valuable
/// compatible subset is attempted, so reordering a batch can change which of
/// two conflicting transactions wins.
#[derive(Debug)]
pub struct TxHandler<V = Secp256k1Verifier> {
    pool: UtxoSet,
    verifier: V,
    config: HandlerConfig,
    epoch: u64,
}

impl TxHandler<Secp256k1Verifier> {
    /// Create a handler over a copy of `utxo_pool`, verifying with secp256k1
    pub fn new(utxo_pool: &UtxoSet) -> Self {
        Self::with_verifier(utxo_pool, Secp256k1Verifier)
    }
}

impl<V: SignatureVerifier> TxHandler<V> {
    /// Create a handler over a copy of `utxo_pool` with a custom verifier
    pub fn with_verifier(utxo_pool: &UtxoSet, verifier: V) -> Self {
        Self::with_config(utxo_pool, verifier, HandlerConfig::default())
    }

    /// Create a handler with explicit configuration
    pub fn with_config(utxo_pool: &UtxoSet, verifier: V, config: HandlerConfig) -> Self {
        Self {
            pool: utxo_pool.clone(),
            verifier,
            config,
            epoch: 0,
        }
    }

    /// Check `tx` against the current set
    pub fn is_valid(&self, tx: &Transaction) -> bool {
        self.validate(tx).is_ok()
    }

    /// Check `tx` against the current set, naming the first failed check
    pub fn validate(&self, tx: &Transaction) -> Result<ValidTx, Rejection> {
        validate_against(&self.pool, tx, &self.verifier)
    }

    /// Process one epoch and return the accepted transactions in acceptance order.
    ///
    /// Rejected candidates are dropped silently.
    pub fn process(&mut self, candidates: &[Transaction]) -> Vec<Transaction> {
        self.process_with_report(candidates).accepted
    }

    /// Process one epoch, also reporting why each rejected candidate failed.
    pub fn process_with_report(&mut self, candidates: &[Transaction]) -> BatchOutcome {
        let span = tracing::debug_span!("epoch", epoch = self.epoch);
        let _enter = span.enter();

        let mut outcome = BatchOutcome {
            accepted: Vec::with_capacity(candidates.len()),
            rejected: Vec::new(),
        };

        for (position, tx) in candidates.iter().enumerate() {
            match self.validate(tx) {
                Ok(valid) => {
                    let accepted = self.apply(tx);
                    if let Some(hash) = accepted.hash() {
                        tracing::debug!(
                            "Accepted tx {} at position {} (fee {})",
                            hash.short_hex(),
                            position,
                            valid.fee()
                        );
                    }
                    outcome.accepted.push(accepted);
                }
                Err(reason) => {
                    let tx_hash = tx.hash().unwrap_or_else(|| codec::tx_hash(tx));
                    if self.config.log_rejections {
                        tracing::debug!(
                            "Rejected tx {} at position {}: {}",
                            tx_hash.short_hex(),
                            position,
                            reason
                        );
                    } else {
                        tracing::trace!("Rejected tx {}: {}", tx_hash.short_hex(), reason);
                    }
                    outcome.rejected.push(RejectedTx {
                        position,
                        tx_hash,
                        reason,
                    });
                }
            }
        }

        tracing::info!(
            "Epoch {} processed: {} candidates, {} accepted, {} rejected, {} unspent outputs",
            self.epoch,
            candidates.len(),
            outcome.accepted.len(),
            outcome.rejected.len(),
            self.pool.len()
        );
        self.epoch += 1;
        outcome
    }

    /// Spend the inputs of a validated transaction and record its outputs.
    ///
    /// Outputs are keyed by exactly `0..outputs.len()`.
    fn apply(&mut self, tx: &Transaction) -> Transaction {
        let mut accepted = tx.clone();
        let tx_hash = match accepted.hash() {
            Some(hash) => hash,
            None => accepted.finalize(),
        };

        for input in accepted.inputs() {
            self.pool.remove(&input.utxo());
        }
        for (index, output) in accepted.outputs().iter().enumerate() {
            self.pool
                .add(Utxo::new(tx_hash, index as OutputIndex), output.clone());
        }
        accepted
    }

    /// Current UTXO set
    pub fn utxo_pool(&self) -> &UtxoSet {
        &self.pool
    }

    /// Number of completed epochs
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Handler configuration
    pub fn config(&self) -> &HandlerConfig {
        &self.config
    }

    /// Signature verifier in use
    pub fn verifier(&self) -> &V {
        &self.verifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;
    use scrooge_crypto::{PrivateKey, PublicKey, Signature};
    use scrooge_types::Output;

    fn key() -> PrivateKey {
        PrivateKey::random(&mut OsRng)
    }

    fn pk(key: &PrivateKey) -> PublicKey {
        key.verifying_key().clone()
    }

    fn genesis_hash() -> H256 {
        H256::from_bytes([0x42; 32])
    }

    fn single_utxo_pool(owner: &PrivateKey, value: i64) -> UtxoSet {
        let mut pool = UtxoSet::new();
        pool.add(Utxo::new(genesis_hash(), 0), Output::new(value, pk(owner)));
        pool
    }

    fn spend(from: &PrivateKey, prev: H256, index: u32, outputs: &[(i64, &PrivateKey)]) -> Transaction {
        let mut tx = Transaction::new();
        tx.add_input(prev, index);
        for (value, to) in outputs {
            tx.add_output(*value, pk(to));
        }
        tx.sign_input(0, from).unwrap();
        tx.finalize();
        tx
    }

    #[test]
    fn test_constructor_copies_pool() {
        let k1 = key();
        let mut original = single_utxo_pool(&k1, 10);
        let handler = TxHandler::new(&original);

        original.remove(&Utxo::new(genesis_hash(), 0));
        assert!(handler.utxo_pool().contains(&Utxo::new(genesis_hash(), 0)));
        assert_eq!(handler.epoch(), 0);
    }

    #[test]
    fn test_process_does_not_touch_caller_pool() {
        let k1 = key();
        let k2 = key();
        let original = single_utxo_pool(&k1, 10);
        let mut handler = TxHandler::new(&original);

        let tx = spend(&k1, genesis_hash(), 0, &[(10, &k2)]);
        assert_eq!(handler.process(&[tx]).len(), 1);
        assert!(original.contains(&Utxo::new(genesis_hash(), 0)));
        assert!(!handler.utxo_pool().contains(&Utxo::new(genesis_hash(), 0)));
    }

    #[test]
    fn test_two_spenders_of_one_output() {
        // U1 = 10 to K1. A pays 7 to K2, B pays 10 to K3; A comes first, so B
        // finds U1 already spent.
        let k1 = key();
        let k2 = key();
        let k3 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let tx_a = spend(&k1, genesis_hash(), 0, &[(7, &k2)]);
        let tx_b = spend(&k1, genesis_hash(), 0, &[(10, &k3)]);
        let hash_a = tx_a.hash().unwrap();

        let accepted = handler.process(&[tx_a.clone(), tx_b]);
        assert_eq!(accepted, vec![tx_a]);

        let pool = handler.utxo_pool();
        assert_eq!(pool.len(), 1);
        let out = pool.get(&Utxo::new(hash_a, 0)).unwrap();
        assert_eq!(out.value, 7);
        assert_eq!(out.recipient, pk(&k2));
    }

    #[test]
    fn test_first_of_two_conflicting_wins() {
        let k1 = key();
        let k2 = key();
        let k3 = key();
        let pool = single_utxo_pool(&k1, 10);

        let tx_a = spend(&k1, genesis_hash(), 0, &[(10, &k2)]);
        let tx_b = spend(&k1, genesis_hash(), 0, &[(9, &k3)]);

        let mut forward = TxHandler::new(&pool);
        let outcome = forward.process_with_report(&[tx_a.clone(), tx_b.clone()]);
        assert_eq!(outcome.accepted, vec![tx_a.clone()]);
        assert_eq!(outcome.rejected.len(), 1);
        assert_eq!(outcome.rejected[0].position, 1);
        assert_eq!(outcome.rejected[0].tx_hash, tx_b.hash().unwrap());
        assert!(matches!(
            outcome.rejected[0].reason,
            Rejection::MissingUtxo { input: 0, .. }
        ));

        let mut backward = TxHandler::new(&pool);
        assert_eq!(backward.process(&[tx_b.clone(), tx_a]), vec![tx_b]);
    }

    #[test]
    fn test_fee_scenario() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let tx_c = spend(&k1, genesis_hash(), 0, &[(4, &k2), (5, &k2)]);
        let hash_c = tx_c.hash().unwrap();
        assert_eq!(handler.validate(&tx_c).unwrap().fee(), 1);

        assert_eq!(handler.process(&[tx_c]).len(), 1);
        let pool = handler.utxo_pool();
        assert!(!pool.contains(&Utxo::new(genesis_hash(), 0)));
        assert_eq!(pool.all_utxos(), vec![Utxo::new(hash_c, 0), Utxo::new(hash_c, 1)]);
        assert_eq!(pool.total_value(), 9);
    }

    #[test]
    fn test_chained_spend_within_batch() {
        let k1 = key();
        let k2 = key();
        let k3 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let first = spend(&k1, genesis_hash(), 0, &[(10, &k2)]);
        let second = spend(&k2, first.hash().unwrap(), 0, &[(8, &k3)]);

        let accepted = handler.process(&[first, second.clone()]);
        assert_eq!(accepted.len(), 2);
        let pool = handler.utxo_pool();
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&Utxo::new(second.hash().unwrap(), 0)));
    }

    #[test]
    fn test_child_before_parent_is_rejected() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let parent = spend(&k1, genesis_hash(), 0, &[(10, &k2)]);
        let child = spend(&k2, parent.hash().unwrap(), 0, &[(10, &k1)]);

        let accepted = handler.process(&[child, parent.clone()]);
        assert_eq!(accepted, vec![parent]);
    }

    #[test]
    fn test_cross_epoch_double_spend() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let tx = spend(&k1, genesis_hash(), 0, &[(10, &k2)]);
        assert_eq!(handler.process(&[tx.clone()]).len(), 1);
        assert!(handler.process(&[tx.clone()]).is_empty());
        assert!(!handler.is_valid(&tx));
        assert_eq!(handler.epoch(), 2);
    }

    #[test]
    fn test_output_index_past_end_is_rejected() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let tx = spend(&k1, genesis_hash(), 0, &[(3, &k2), (3, &k2)]);
        let hash = tx.hash().unwrap();
        handler.process(&[tx]);

        // Output 2 of a two-output transaction never existed
        let beyond = spend(&k2, hash, 2, &[(1, &k1)]);
        let outcome = handler.process_with_report(&[beyond]);
        assert!(outcome.accepted.is_empty());
        assert!(!handler.utxo_pool().contains(&Utxo::new(hash, 2)));
    }

    #[test]
    fn test_unfinalized_candidate_is_keyed_by_content_hash() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));

        let mut tx = Transaction::new();
        tx.add_input(genesis_hash(), 0).add_output(10, pk(&k2));
        tx.sign_input(0, &k1).unwrap();
        assert!(!tx.is_finalized());

        let accepted = handler.process(&[tx.clone()]);
        let hash = accepted[0].hash().unwrap();
        assert_eq!(hash, codec::tx_hash(&tx));
        assert!(handler.utxo_pool().contains(&Utxo::new(hash, 0)));
    }

    #[test]
    fn test_all_invalid_batch_leaves_pool_unchanged() {
        let k1 = key();
        let k2 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));
        let before = handler.utxo_pool().clone();

        let overspend = spend(&k1, genesis_hash(), 0, &[(11, &k2)]);
        let wrong_key = spend(&k2, genesis_hash(), 0, &[(1, &k2)]);
        let negative = spend(&k1, genesis_hash(), 0, &[(-1, &k2)]);

        let outcome = handler.process_with_report(&[overspend, wrong_key, negative]);
        assert!(outcome.accepted.is_empty());
        assert_eq!(outcome.rejected.len(), 3);
        assert_eq!(handler.utxo_pool(), &before);
    }

    #[test]
    fn test_empty_batch() {
        let k1 = key();
        let mut handler = TxHandler::new(&single_utxo_pool(&k1, 10));
        let outcome = handler.process_with_report(&[]);
        assert!(outcome.accepted.is_empty());
        assert!(outcome.rejected.is_empty());
        assert_eq!(handler.epoch(), 1);
        assert_eq!(handler.utxo_pool().len(), 1);
    }

    /// Verifier that accepts every signature
    struct AcceptAll;

    impl SignatureVerifier for AcceptAll {
        fn verify(&self, _: &PublicKey, _: &[u8], _: &Signature) -> bool {
            true
        }
    }

    #[test]
    fn test_custom_verifier() {
        let k1 = key();
        let k2 = key();
        let pool = single_utxo_pool(&k1, 10);
        let handler = TxHandler::with_config(
            &pool,
            AcceptAll,
            HandlerConfig {
                log_rejections: false,
            },
        );

        // Signed by the wrong key, still accepted by this verifier
        let tx = spend(&k2, genesis_hash(), 0, &[(10, &k2)]);
        assert!(handler.is_valid(&tx));
        assert!(!handler.config().log_rejections);
    }
}
