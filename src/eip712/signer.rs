//! EIP-712 Signing
//!
//! ECDSA signing, verification and signer recovery over the typed-data
//! digest.

use super::types::{Eip712Error, Eip712Signature, TypedMessage};
use crate::utils::crypto::{keccak256, to_checksum_address};
use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};

/// Sign a typed message with a 32-byte secp256k1 private key
pub fn sign_typed_message(
    message: &TypedMessage,
    private_key: &[u8],
) -> Result<Eip712Signature, Eip712Error> {
    let digest = message.signing_hash()?;
    sign_digest(&digest, private_key)
}

/// Sign a pre-computed 32-byte digest
pub fn sign_digest(digest: &[u8; 32], private_key: &[u8]) -> Result<Eip712Signature, Eip712Error> {
    if private_key.len() != 32 {
        return Err(Eip712Error::SigningError(format!(
            "invalid private key length: expected 32, got {}",
            private_key.len()
        )));
    }

    let secp = Secp256k1::new();

    let secret_key = SecretKey::from_slice(private_key)
        .map_err(|e| Eip712Error::SigningError(e.to_string()))?;

    let msg = Message::from_digest_slice(digest)
        .map_err(|e| Eip712Error::SigningError(e.to_string()))?;

    let (recovery_id, signature) = secp
        .sign_ecdsa_recoverable(&msg, &secret_key)
        .serialize_compact();

    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&signature[0..32]);
    s.copy_from_slice(&signature[32..64]);

    // v is recovery_id + 27 (Ethereum convention)
    Ok(Eip712Signature::new(r, s, recovery_id.to_i32() as u8 + 27))
}

/// Verify a signature over a typed message against an expected address
pub fn verify_typed_message(
    message: &TypedMessage,
    signature: &Eip712Signature,
    expected_address: &str,
) -> Result<bool, Eip712Error> {
    let digest = message.signing_hash()?;
    verify_signature(&digest, signature, expected_address)
}

/// Verify a signature over a digest against an expected address
pub fn verify_signature(
    digest: &[u8; 32],
    signature: &Eip712Signature,
    expected_address: &str,
) -> Result<bool, Eip712Error> {
    let recovered = recover_address(digest, signature)?;
    Ok(normalize_address(expected_address) == normalize_address(&recovered))
}

/// Recover the checksummed signer address from a signature
pub fn recover_address(
    digest: &[u8; 32],
    signature: &Eip712Signature,
) -> Result<String, Eip712Error> {
    let secp = Secp256k1::new();

    let recovery_id =
        secp256k1::ecdsa::RecoveryId::from_i32(signature.v.wrapping_sub(27) as i32)
            .map_err(|e| Eip712Error::InvalidSignature(e.to_string()))?;

    let mut compact = [0u8; 64];
    compact[0..32].copy_from_slice(&signature.r);
    compact[32..64].copy_from_slice(&signature.s);

    let recoverable =
        secp256k1::ecdsa::RecoverableSignature::from_compact(&compact, recovery_id)
            .map_err(|e| Eip712Error::InvalidSignature(e.to_string()))?;

    let msg = Message::from_digest_slice(digest)
        .map_err(|e| Eip712Error::SigningError(e.to_string()))?;

    let public_key = secp
        .recover_ecdsa(&msg, &recoverable)
        .map_err(|e| Eip712Error::InvalidSignature(e.to_string()))?;

    Ok(to_checksum_address(&public_key_to_address(&public_key)))
}

/// Derive the Ethereum address from a secp256k1 public key
fn public_key_to_address(public_key: &PublicKey) -> [u8; 20] {
    // keccak of the uncompressed key without the 0x04 tag, last 20 bytes
    let uncompressed = public_key.serialize_uncompressed();
    let hash = keccak256(&uncompressed[1..]);

    let mut address = [0u8; 20];
    address.copy_from_slice(&hash[12..32]);
    address
}

fn normalize_address(address: &str) -> String {
    address.trim_start_matches("0x").to_ascii_lowercase()
}
