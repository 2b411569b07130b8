//! ECDSA signature operations using secp256k1

use crate::{keccak256, CryptoError, CryptoResult};
use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature as K256Signature, SigningKey, VerifyingKey};
use scrooge_primitives::H256;

/// Half of the secp256k1 curve order (n/2), big-endian
const SECP256K1_N_DIV_2: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D,
    0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Length of an encoded signature (r || s)
pub const SIGNATURE_LENGTH: usize = 64;

/// Length of a SEC1-compressed public key
pub const PUBLIC_KEY_LENGTH: usize = 33;

/// ECDSA signature in (r, s) form
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Signature {
    /// r component (32 bytes)
    pub r: [u8; 32],
    /// s component (32 bytes)
    pub s: [u8; 32],
}

/// Public key: the identity an output is locked to
pub type PublicKey = VerifyingKey;

/// Private key (32 bytes)
pub type PrivateKey = SigningKey;

impl Signature {
    /// Create signature from r, s components
    pub fn new(r: [u8; 32], s: [u8; 32]) -> Self {
        Signature { r, s }
    }

    /// Convert to 64-byte representation (r || s)
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        bytes[..32].copy_from_slice(&self.r);
        bytes[32..].copy_from_slice(&self.s);
        bytes
    }

    /// Parse from 64-byte representation
    pub fn from_bytes(bytes: &[u8; SIGNATURE_LENGTH]) -> Self {
        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[..32]);
        s.copy_from_slice(&bytes[32..]);
        Signature { r, s }
    }

    /// Check if signature has low-s value.
    ///
    /// Fixed-size arrays compare lexicographically, which is big-endian order here.
    pub fn is_low_s(&self) -> bool {
        self.s <= SECP256K1_N_DIV_2
    }
}

/// Sign a message hash with a private key, normalized to low-s
pub fn sign(message_hash: &H256, private_key: &PrivateKey) -> CryptoResult<Signature> {
    let signature: K256Signature = private_key
        .sign_prehash(message_hash.as_bytes())
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
    let signature = signature.normalize_s().unwrap_or(signature);

    Ok(Signature {
        r: signature.r().to_bytes().into(),
        s: signature.s().to_bytes().into(),
    })
}

/// Hash `message` with Keccak-256 and sign the digest
pub fn sign_message(message: &[u8], private_key: &PrivateKey) -> CryptoResult<Signature> {
    sign(&keccak256(message), private_key)
}

/// Verify a signature against a message hash and public key
///
/// Malformed scalars surface as `Err`, a well-formed signature that does not
/// match surfaces as `Ok(false)`.
pub fn verify(
    message_hash: &H256,
    signature: &Signature,
    public_key: &PublicKey,
) -> CryptoResult<bool> {
    if !signature.is_low_s() {
        return Ok(false);
    }

    let r: k256::FieldBytes = signature.r.into();
    let s: k256::FieldBytes = signature.s.into();
    let k256_sig = K256Signature::from_scalars(r, s)
        .map_err(|e| CryptoError::InvalidSignature(e.to_string()))?;

    Ok(public_key
        .verify_prehash(message_hash.as_bytes(), &k256_sig)
        .is_ok())
}

/// Encode a public key in SEC1 compressed form
pub fn public_key_to_bytes(public_key: &PublicKey) -> [u8; PUBLIC_KEY_LENGTH] {
    let encoded = public_key.to_encoded_point(true);
    let mut bytes = [0u8; PUBLIC_KEY_LENGTH];
    bytes.copy_from_slice(encoded.as_bytes());
    bytes
}

/// Parse a SEC1-encoded public key (compressed or uncompressed)
pub fn public_key_from_slice(bytes: &[u8]) -> CryptoResult<PublicKey> {
    VerifyingKey::from_sec1_bytes(bytes).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))
}

/// Parse a hex-encoded SEC1 public key, with or without `0x` prefix
pub fn public_key_from_hex(s: &str) -> CryptoResult<PublicKey> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| CryptoError::InvalidPublicKey(e.to_string()))?;
    public_key_from_slice(&bytes)
}
