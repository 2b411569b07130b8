//! # scrooge-crypto
//!
//! Cryptographic primitives for ScroogeLedger.
//!
//! - Keccak-256 hashing
//! - ECDSA signing/verification (secp256k1)
//! - The [`SignatureVerifier`] seam the validator authenticates inputs through

#![warn(missing_docs)]
#![warn(clippy::all)]

mod error;
mod hash;
mod signature;
mod verifier;

pub use error::{CryptoError, CryptoResult};
pub use hash::keccak256;
pub use signature::{
    public_key_from_hex, public_key_from_slice, public_key_to_bytes, sign, sign_message,
    verify, PrivateKey, PublicKey, Signature, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH,
};
pub use verifier::{Secp256k1Verifier, SignatureVerifier};
