//! Canonical transaction encodings.
//!
//! Both encodings leave signatures out so that a signature can authenticate them.
//! Integers are little-endian; counts are `u32`.
//!
//! ```text
//! unsigned   = inputs || outputs
//! signing(i) = inputs || i:u32 || outputs
//! inputs     = count:u32 || (prev_tx_hash:32 || output_index:u32)*
//! outputs    = count:u32 || (value:i64 || recipient:33)*
//! ```

use crate::transaction::Transaction;
use scrooge_crypto::{keccak256, public_key_to_bytes, PUBLIC_KEY_LENGTH};
use scrooge_primitives::H256;

const INPUT_LEN: usize = 32 + 4;
const OUTPUT_LEN: usize = 8 + PUBLIC_KEY_LENGTH;

fn put_inputs(buf: &mut Vec<u8>, tx: &Transaction) {
    buf.extend_from_slice(&(tx.num_inputs() as u32).to_le_bytes());
    for input in tx.inputs() {
        buf.extend_from_slice(input.prev_tx_hash.as_bytes());
        buf.extend_from_slice(&input.output_index.to_le_bytes());
    }
}

fn put_outputs(buf: &mut Vec<u8>, tx: &Transaction) {
    buf.extend_from_slice(&(tx.num_outputs() as u32).to_le_bytes());
    for output in tx.outputs() {
        buf.extend_from_slice(&output.value.to_le_bytes());
        buf.extend_from_slice(&public_key_to_bytes(&output.recipient));
    }
}

fn encoded_len(tx: &Transaction) -> usize {
    4 + tx.num_inputs() * INPUT_LEN + 4 + 4 + tx.num_outputs() * OUTPUT_LEN
}

/// Encode a transaction's content without signatures.
pub fn encode_unsigned(tx: &Transaction) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(tx));
    put_inputs(&mut buf, tx);
    put_outputs(&mut buf, tx);
    buf
}

/// Bytes the signature of input `input_index` must cover.
///
/// Returns `None` when `input_index` is out of range.
pub fn signing_payload(tx: &Transaction, input_index: usize) -> Option<Vec<u8>> {
    if input_index >= tx.num_inputs() {
        return None;
    }
    let index = u32::try_from(input_index).ok()?;

    let mut buf = Vec::with_capacity(encoded_len(tx));
    put_inputs(&mut buf, tx);
    buf.extend_from_slice(&index.to_le_bytes());
    put_outputs(&mut buf, tx);
    Some(buf)
}

/// Content hash: Keccak-256 of the unsigned encoding.
pub fn tx_hash(tx: &Transaction) -> H256 {
    keccak256(&encode_unsigned(tx))
}
