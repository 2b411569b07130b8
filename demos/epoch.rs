//! One epoch end to end: genesis config, a contested batch, the resulting set.
//!
//! Run with `RUST_LOG=debug cargo run --example epoch` to see per-candidate decisions.

use anyhow::Result;
use rand::rngs::OsRng;
use scrooge_crypto::{public_key_to_bytes, PrivateKey};
use scrooge_ledger::{GenesisConfig, GenesisUtxo, Transaction, TxHandler};
use scrooge_primitives::H256;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let scrooge = PrivateKey::random(&mut OsRng);
    let alice = PrivateKey::random(&mut OsRng);
    let bob = PrivateKey::random(&mut OsRng);

    let genesis_hash = H256::from_bytes([0x01; 32]);
    let genesis = GenesisConfig {
        utxos: vec![GenesisUtxo {
            tx_hash: genesis_hash.to_hex(),
            index: 0,
            value: 10,
            recipient: hex::encode(public_key_to_bytes(scrooge.verifying_key())),
        }],
    };
    let pool = genesis.build_utxo_set()?;
    println!("Genesis: {} outputs, total value {}", pool.len(), pool.total_value());

    // Two spends of the same output: only the first in the batch can win
    let mut to_alice = Transaction::new();
    to_alice
        .add_input(genesis_hash, 0)
        .add_output(7, alice.verifying_key().clone())
        .add_output(2, scrooge.verifying_key().clone());
    to_alice.sign_input(0, &scrooge)?;
    let to_alice_hash = to_alice.finalize();

    let mut to_bob = Transaction::new();
    to_bob
        .add_input(genesis_hash, 0)
        .add_output(10, bob.verifying_key().clone());
    to_bob.sign_input(0, &scrooge)?;
    to_bob.finalize();

    // Alice forwards part of her new output within the same epoch
    let mut alice_to_bob = Transaction::new();
    alice_to_bob
        .add_input(to_alice_hash, 0)
        .add_output(5, bob.verifying_key().clone());
    alice_to_bob.sign_input(0, &alice)?;
    alice_to_bob.finalize();

    let mut handler = TxHandler::new(&pool);
    let outcome = handler.process_with_report(&[to_alice, to_bob, alice_to_bob]);

    for tx in &outcome.accepted {
        if let Some(hash) = tx.hash() {
            println!("accepted {}", hash);
        }
    }
    for rejected in &outcome.rejected {
        println!(
            "rejected #{} {}: {}",
            rejected.position, rejected.tx_hash, rejected.reason
        );
    }

    let set = handler.utxo_pool();
    println!(
        "After epoch {}: {} outputs, total value {}",
        handler.epoch(),
        set.len(),
        set.total_value()
    );
    for (utxo, output) in set.iter() {
        println!("  {} -> {}", utxo, output.value);
    }

    Ok(())
}
