//! Signature verification seam used by the validator

use crate::{keccak256, verify, PublicKey, Signature};

/// Verifies that `signature` over `message` was produced by the holder of `public_key`.
///
/// Implementations must be deterministic and side-effect free. Any malformed
/// input is a failed verification, never a panic.
pub trait SignatureVerifier {
    /// Return `true` iff the signature authenticates `message` for `public_key`
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool;
}

impl<V: SignatureVerifier + ?Sized> SignatureVerifier for &V {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        (**self).verify(public_key, message, signature)
    }
}

/// Keccak-256 digest followed by secp256k1 ECDSA prehash verification
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Verifier;

impl SignatureVerifier for Secp256k1Verifier {
    fn verify(&self, public_key: &PublicKey, message: &[u8], signature: &Signature) -> bool {
        verify(&keccak256(message), signature, public_key).unwrap_or(false)
    }
}
