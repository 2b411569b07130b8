//! Transaction types for ScroogeLedger

use crate::codec;
use crate::error::{TxError, TxResult};
use crate::utxo::Utxo;
use scrooge_crypto::{sign_message, PrivateKey, PublicKey, Signature};
use scrooge_primitives::{Amount, OutputIndex, H256};

/// A coin amount locked to a recipient key
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Output {
    /// Value of the output. Negative values are representable and rejected at validation.
    pub value: Amount,
    /// Key allowed to spend this output
    pub recipient: PublicKey,
}

impl Output {
    /// Create a new output
    pub fn new(value: Amount, recipient: PublicKey) -> Self {
        Self { value, recipient }
    }
}

/// A claim on an output of an earlier transaction
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Input {
    /// Hash of the transaction whose output is spent
    pub prev_tx_hash: H256,
    /// Index of the spent output in that transaction
    pub output_index: OutputIndex,
    /// Signature over the signing payload for this input; `None` until signed
    pub signature: Option<Signature>,
}

impl Input {
    /// Create an unsigned input
    pub fn new(prev_tx_hash: H256, output_index: OutputIndex) -> Self {
        Self {
            prev_tx_hash,
            output_index,
            signature: None,
        }
    }

    /// Identifier of the output this input claims
    pub fn utxo(&self) -> Utxo {
        Utxo::new(self.prev_tx_hash, self.output_index)
    }
}

/// Transaction: ordered inputs, ordered outputs, and a cached content hash.
///
/// The hash covers inputs and outputs but not signatures. It is computed by
/// [`finalize`](Self::finalize); every structural mutation clears it again.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Transaction {
    inputs: Vec<Input>,
    outputs: Vec<Output>,
    /// Cached transaction hash
    hash: Option<H256>,
}

impl Transaction {
    /// Create an empty transaction
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unsigned input
    pub fn add_input(&mut self, prev_tx_hash: H256, output_index: OutputIndex) -> &mut Self {
        self.inputs.push(Input::new(prev_tx_hash, output_index));
        self.hash = None;
        self
    }

    /// Append an output
    pub fn add_output(&mut self, value: Amount, recipient: PublicKey) -> &mut Self {
        self.outputs.push(Output::new(value, recipient));
        self.hash = None;
        self
    }

    /// Remove the input at `index`
    pub fn remove_input(&mut self, index: usize) -> Option<Input> {
        if index >= self.inputs.len() {
            return None;
        }
        self.hash = None;
        Some(self.inputs.remove(index))
    }

    /// Remove the first input claiming `utxo`
    pub fn remove_input_for(&mut self, utxo: &Utxo) -> Option<Input> {
        let position = self.inputs.iter().position(|input| input.utxo() == *utxo)?;
        self.remove_input(position)
    }

    /// Attach a signature to the input at `index`. Does not change the hash.
    pub fn add_signature(&mut self, index: usize, signature: Signature) -> TxResult<()> {
        let len = self.inputs.len();
        let input = self
            .inputs
            .get_mut(index)
            .ok_or(TxError::InputIndexOutOfRange { index, len })?;
        input.signature = Some(signature);
        Ok(())
    }

    /// Sign the input at `index` with `private_key` over its signing payload
    pub fn sign_input(&mut self, index: usize, private_key: &PrivateKey) -> TxResult<()> {
        let payload = self
            .signing_payload(index)
            .ok_or(TxError::InputIndexOutOfRange {
                index,
                len: self.inputs.len(),
            })?;
        let signature = sign_message(&payload, private_key)?;
        self.add_signature(index, signature)
    }

    /// Compute and cache the content hash
    pub fn finalize(&mut self) -> H256 {
        let hash = codec::tx_hash(self);
        self.hash = Some(hash);
        hash
    }

    /// Cached content hash, `None` if not finalized since the last mutation
    pub fn hash(&self) -> Option<H256> {
        self.hash
    }

    /// Check whether the transaction has been finalized
    pub fn is_finalized(&self) -> bool {
        self.hash.is_some()
    }

    /// Bytes the input at `input_index` must be signed over
    pub fn signing_payload(&self, input_index: usize) -> Option<Vec<u8>> {
        codec::signing_payload(self, input_index)
    }

    /// All inputs
    pub fn inputs(&self) -> &[Input] {
        &self.inputs
    }

    /// All outputs
    pub fn outputs(&self) -> &[Output] {
        &self.outputs
    }

    /// Input at `index`
    pub fn input(&self, index: usize) -> Option<&Input> {
        self.inputs.get(index)
    }

    /// Output at `index`
    pub fn output(&self, index: usize) -> Option<&Output> {
        self.outputs.get(index)
    }

    /// Number of inputs
    pub fn num_inputs(&self) -> usize {
        self.inputs.len()
    }

    /// Number of outputs
    pub fn num_outputs(&self) -> usize {
        self.outputs.len()
    }
}
