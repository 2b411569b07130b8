//! Shared helpers for scrooge-ledger integration tests

#![allow(dead_code)]

use rand::rngs::OsRng;
use scrooge_crypto::{keccak256, public_key_to_bytes, PrivateKey, PublicKey, Signature, SignatureVerifier};
use scrooge_ledger::{Output, Transaction, Utxo, UtxoSet};
use scrooge_primitives::{Amount, H256};

/// Random secp256k1 key
pub fn key() -> PrivateKey {
    PrivateKey::random(&mut OsRng)
}

/// Deterministic key from a small seed (seed must be non-zero)
pub fn fixed_key(seed: u8) -> PrivateKey {
    PrivateKey::from_slice(&[seed; 32]).expect("non-zero scalar below curve order")
}

/// Public key of `key`
pub fn pk(key: &PrivateKey) -> PublicKey {
    key.verifying_key().clone()
}

/// Hash used for genesis outputs in tests
pub fn genesis_hash() -> H256 {
    H256::from_bytes([0x5c; 32])
}

/// Pool holding `(value, owner)` at genesis indices 0, 1, ...
pub fn genesis_pool(entries: &[(Amount, &PrivateKey)]) -> UtxoSet {
    entries
        .iter()
        .enumerate()
        .map(|(index, (value, owner))| {
            (
                Utxo::new(genesis_hash(), index as u32),
                Output::new(*value, pk(owner)),
            )
        })
        .collect()
}

/// Finalized transaction spending each `(prev_hash, index, owner)` and paying `outputs`
pub fn signed_tx(
    inputs: &[(H256, u32, &PrivateKey)],
    outputs: &[(Amount, &PrivateKey)],
) -> Transaction {
    let mut tx = Transaction::new();
    for (prev, index, _) in inputs {
        tx.add_input(*prev, *index);
    }
    for (value, to) in outputs {
        tx.add_output(*value, pk(to));
    }
    for (position, (_, _, owner)) in inputs.iter().enumerate() {
        tx.sign_input(position, owner).unwrap();
    }
    tx.finalize();
    tx
}

/// Verifier for property tests: a signature is `(keccak(message), keccak(key))`.
///
/// Cheap and deterministic, so thousands of generated batches stay fast.
pub struct HashLockVerifier;

impl HashLockVerifier {
    pub fn sign(message: &[u8], public_key: &PublicKey) -> Signature {
        Signature::new(
            *keccak256(message).as_bytes(),
            *keccak256(&public_key_to_bytes(public_key)).as_bytes(),
        )
    }
}

impl SignatureVerifier for HashLockVerifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        *signature == Self::sign(message, public_key)
    }
}
