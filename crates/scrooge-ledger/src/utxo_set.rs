//! The set of unspent transaction outputs

use scrooge_types::{Output, Utxo};
use std::collections::HashMap;

/// Mapping from unspent output identifier to the output it names.
///
/// Every key is an output that has been produced and not yet consumed.
/// `Clone` yields a fully independent copy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UtxoSet {
    utxos: HashMap<Utxo, Output>,
}

impl UtxoSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `utxo` is unspent
    pub fn contains(&self, utxo: &Utxo) -> bool {
        self.utxos.contains_key(utxo)
    }

    /// Output named by `utxo`, if unspent
    pub fn get(&self, utxo: &Utxo) -> Option<&Output> {
        self.utxos.get(utxo)
    }

    /// Insert or overwrite the entry for `utxo`
    pub fn add(&mut self, utxo: Utxo, output: Output) {
        self.utxos.insert(utxo, output);
    }

    /// Remove the entry for `utxo`. Removing an absent key is a no-op.
    pub fn remove(&mut self, utxo: &Utxo) -> Option<Output> {
        self.utxos.remove(utxo)
    }

    /// Number of unspent outputs
    pub fn len(&self) -> usize {
        self.utxos.len()
    }

    /// Check if there are no unspent outputs
    pub fn is_empty(&self) -> bool {
        self.utxos.is_empty()
    }

    /// All identifiers, sorted
    pub fn all_utxos(&self) -> Vec<Utxo> {
        let mut utxos: Vec<Utxo> = self.utxos.keys().copied().collect();
        utxos.sort();
        utxos
    }

    /// Iterate over `(identifier, output)` pairs in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&Utxo, &Output)> {
        self.utxos.iter()
    }

    /// Sum of all unspent values
    pub fn total_value(&self) -> i128 {
        self.utxos.values().map(|o| i128::from(o.value)).sum()
    }
}

impl FromIterator<(Utxo, Output)> for UtxoSet {
    fn from_iter<I: IntoIterator<Item = (Utxo, Output)>>(iter: I) -> Self {
        Self {
            utxos: iter.into_iter().collect(),
        }
    }
}

impl Extend<(Utxo, Output)> for UtxoSet {
    fn extend<I: IntoIterator<Item = (Utxo, Output)>>(&mut self, iter: I) {
        self.utxos.extend(iter);
    }
}
