//! Configuration types for the ledger

use crate::error::{ConfigError, ConfigResult};
use crate::utxo_set::UtxoSet;
use scrooge_crypto::public_key_from_hex;
use scrooge_primitives::{Amount, OutputIndex, H256};
use scrooge_types::{Output, Utxo};
use serde::{Deserialize, Serialize};

/// Handler configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandlerConfig {
    /// Log each rejection at debug level; when off they are logged at trace level
    #[serde(default = "default_log_rejections")]
    pub log_rejections: bool,
}

fn default_log_rejections() -> bool {
    true
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            log_rejections: default_log_rejections(),
        }
    }
}

/// Genesis configuration: the outputs the ledger starts from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenesisConfig {
    /// Initial unspent outputs
    #[serde(default)]
    pub utxos: Vec<GenesisUtxo>,
}

/// One initial unspent output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenesisUtxo {
    /// Producing transaction hash (hex, `0x` prefix optional)
    pub tx_hash: String,
    /// Output position
    #[serde(default)]
    pub index: OutputIndex,
    /// Output value
    pub value: Amount,
    /// Recipient public key (hex SEC1, compressed or uncompressed)
    pub recipient: String,
}

impl GenesisConfig {
    /// Parse from JSON
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the initial UTXO set.
    ///
    /// Rejects malformed hashes or keys, negative values and repeated identifiers.
    pub fn build_utxo_set(&self) -> ConfigResult<UtxoSet> {
        let mut set = UtxoSet::new();

        for (entry, genesis) in self.utxos.iter().enumerate() {
            let tx_hash = H256::from_hex(&genesis.tx_hash)
                .map_err(|source| ConfigError::InvalidHash { entry, source })?;
            let recipient = public_key_from_hex(&genesis.recipient)
                .map_err(|source| ConfigError::InvalidRecipient { entry, source })?;
            if genesis.value < 0 {
                return Err(ConfigError::NegativeValue {
                    entry,
                    value: genesis.value,
                });
            }

            let utxo = Utxo::new(tx_hash, genesis.index);
            if set.contains(&utxo) {
                return Err(ConfigError::DuplicateUtxo(utxo));
            }
            set.add(utxo, Output::new(genesis.value, recipient));
        }

        tracing::debug!(
            "Built genesis UTXO set: {} outputs, total value {}",
            set.len(),
            set.total_value()
        );
        Ok(set)
    }
}
