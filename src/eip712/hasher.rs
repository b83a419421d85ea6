//! EIP-712 Hashing
//!
//! Struct hashing and the final domain-separated digest.

use super::encoder::encode_data;
use super::types::{Eip712Error, TypeDefinitions, EIP712_DOMAIN_TYPE};
use crate::utils::crypto::keccak256;

/// Envelope prefix for the final digest (EIP-191 version 0x01)
const EIP712_PREFIX: &[u8] = b"\x19\x01";

/// Hash a struct according to EIP-712
///
/// hashStruct(s) = keccak256(typeHash || encodeData(s))
pub fn hash_struct(
    primary_type: &str,
    data: &serde_json::Value,
    types: &TypeDefinitions,
) -> Result<[u8; 32], Eip712Error> {
    let encoded = encode_data(primary_type, data, types)?;
    Ok(keccak256(&encoded))
}

/// Compute the final signable digest
///
/// hash = keccak256("\x19\x01" || hashStruct(domain) || hashStruct(message)).
/// `types` must carry an `EIP712Domain` entry for the domain side.
pub fn eip712_hash(
    primary_type: &str,
    message: &serde_json::Value,
    types: &TypeDefinitions,
    domain: &serde_json::Value,
) -> Result<[u8; 32], Eip712Error> {
    Ok(signing_pre_image(primary_type, message, types, domain)?.digest)
}

/// The intermediate hashes a caller needs when signing externally
#[derive(Debug, Clone, Copy)]
pub struct SigningPreImage {
    pub domain_separator: [u8; 32],
    pub struct_hash: [u8; 32],
    pub digest: [u8; 32],
}

/// Compute the pre-image components alongside the final digest
pub fn signing_pre_image(
    primary_type: &str,
    message: &serde_json::Value,
    types: &TypeDefinitions,
    domain: &serde_json::Value,
) -> Result<SigningPreImage, Eip712Error> {
    let domain_separator = hash_struct(EIP712_DOMAIN_TYPE, domain, types)?;
    let struct_hash = hash_struct(primary_type, message, types)?;

    let mut parts = Vec::with_capacity(2 + 32 + 32);
    parts.extend_from_slice(EIP712_PREFIX);
    parts.extend_from_slice(&domain_separator);
    parts.extend_from_slice(&struct_hash);

    Ok(SigningPreImage {
        domain_separator,
        struct_hash,
        digest: keccak256(&parts),
    })
}
