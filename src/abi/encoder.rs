//! Restricted ABI value codec
//!
//! Encodes a single primitive value into the fixed 32-byte slot used by
//! typed-data struct encoding. The dynamic head/tail layout of the full
//! contract-call ABI does not apply here: string and bytes values are
//! represented by their keccak256 digest.

use super::types::{AbiError, PrimitiveKind, U256};
use crate::utils::crypto::keccak256;

/// Encode a primitive value into its 32-byte slot, dispatching on the type name
pub fn encode_field(type_name: &str, value: &str) -> Result<[u8; 32], AbiError> {
    let kind = PrimitiveKind::resolve(type_name)
        .ok_or_else(|| AbiError::UnsupportedType(type_name.to_string()))?;

    match kind {
        PrimitiveKind::Uint256 => encode_uint256(value),
        PrimitiveKind::Bool => Ok(encode_bool(value == "true")),
        PrimitiveKind::Address => encode_address(value),
        PrimitiveKind::Str => Ok(encode_string(value)),
        PrimitiveKind::Bytes => encode_bytes(value),
    }
}

/// Encode a base-10 unsigned integer, big-endian, zero-padded to 32 bytes
pub fn encode_uint256(value: &str) -> Result<[u8; 32], AbiError> {
    Ok(U256::from_dec(value)?.to_be_bytes())
}

/// Encode a boolean: 32 zero bytes with the final byte set for `true`
pub fn encode_bool(value: bool) -> [u8; 32] {
    let mut slot = [0u8; 32];
    slot[31] = value as u8;
    slot
}

/// Encode an address literal by zero-padding its hex digits to a full slot.
///
/// The literal is not hashed; short addresses are extended with leading
/// `'0'` characters before decoding.
pub fn encode_address(value: &str) -> Result<[u8; 32], AbiError> {
    let digits = strip_hex_prefix(value);
    if digits.len() > 64 {
        return Err(malformed("address", value));
    }

    let padded = format!("{:0>64}", digits);
    let bytes = hex::decode(&padded).map_err(|_| malformed("address", value))?;

    let mut slot = [0u8; 32];
    slot.copy_from_slice(&bytes);
    Ok(slot)
}

/// Encode a string as the keccak256 digest of its UTF-8 bytes
pub fn encode_string(value: &str) -> [u8; 32] {
    keccak256(value.as_bytes())
}

/// Encode a bytes value as the keccak256 digest of its hex-decoded payload
pub fn encode_bytes(value: &str) -> Result<[u8; 32], AbiError> {
    let payload =
        hex::decode(strip_hex_prefix(value)).map_err(|_| malformed("bytes", value))?;
    Ok(keccak256(&payload))
}

/// Strip a leading `0x`/`0X` or bare `x` prefix from a hex literal
fn strip_hex_prefix(value: &str) -> &str {
    if let Some(rest) = value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        rest
    } else if let Some(rest) = value.strip_prefix('x') {
        rest
    } else {
        value
    }
}

fn malformed(type_name: &str, value: &str) -> AbiError {
    AbiError::MalformedValue {
        type_name: type_name.to_string(),
        value: value.to_string(),
    }
}
