//! Transaction validity predicate.
//!
//! A transaction is valid against a pool iff:
//!
//! 1. every input references an output present in the pool,
//! 2. every input's signature verifies against that output's recipient over
//!    the transaction's signing payload for the input's position,
//! 3. no output is claimed by two inputs of the transaction,
//! 4. every output value is non-negative,
//! 5. the sum of referenced input values is at least the sum of output values.
//!
//! Inputs are checked in order (existence, duplicate claim, signature), then
//! outputs in order, then conservation. The first failure is reported.
//! The pool is only read.

use crate::error::Rejection;
use crate::utxo_set::UtxoSet;
use scrooge_crypto::SignatureVerifier;
use scrooge_types::{Transaction, Utxo};
use std::collections::HashSet;

/// Value totals of a transaction that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidTx {
    /// Sum of referenced input values
    pub input_sum: i128,
    /// Sum of output values
    pub output_sum: i128,
}

impl ValidTx {
    /// Implicit fee: what the inputs carry beyond the outputs
    pub fn fee(&self) -> i128 {
        self.input_sum - self.output_sum
    }
}

/// Validate `tx` against `pool`, naming the first failed check.
pub fn validate_against<V>(
    pool: &UtxoSet,
    tx: &Transaction,
    verifier: &V,
) -> Result<ValidTx, Rejection>
where
    V: SignatureVerifier + ?Sized,
{
    let mut claimed: HashSet<Utxo> = HashSet::with_capacity(tx.num_inputs());
    let mut input_sum: i128 = 0;

    for (index, input) in tx.inputs().iter().enumerate() {
        let utxo = input.utxo();
        let spent = pool
            .get(&utxo)
            .ok_or(Rejection::MissingUtxo { input: index, utxo })?;

        if !claimed.insert(utxo) {
            return Err(Rejection::DuplicateInput { input: index, utxo });
        }

        let signature = input
            .signature
            .as_ref()
            .ok_or(Rejection::MissingSignature { input: index })?;
        let payload = tx
            .signing_payload(index)
            .ok_or(Rejection::InvalidSignature { input: index })?;
        if !verifier.verify(&spent.recipient, &payload, signature) {
            return Err(Rejection::InvalidSignature { input: index });
        }

        input_sum += i128::from(spent.value);
    }

    let mut output_sum: i128 = 0;
    for (index, output) in tx.outputs().iter().enumerate() {
        if output.value < 0 {
            return Err(Rejection::NegativeOutput {
                output: index,
                value: output.value,
            });
        }
        output_sum += i128::from(output.value);
    }

    if input_sum < output_sum {
        return Err(Rejection::InsufficientInput {
            input_sum,
            output_sum,
        });
    }

    Ok(ValidTx {
        input_sum,
        output_sum,
    })
}

/// Boolean view of [`validate_against`]
pub fn is_valid_against<V>(pool: &UtxoSet, tx: &Transaction, verifier: &V) -> bool
where
    V: SignatureVerifier + ?Sized,
{
    validate_against(pool, tx, verifier).is_ok()
}
