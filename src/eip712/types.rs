//! EIP-712 Type Definitions
//!
//! Core data structures for EIP-712 typed data hashing and signing.

use crate::abi::{AbiError, PrimitiveKind};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use zeroize::Zeroize;

/// Name of the reserved domain struct type
pub const EIP712_DOMAIN_TYPE: &str = "EIP712Domain";

/// A field in a struct type definition
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TypedDataField {
    /// The name of the field
    pub name: String,
    /// The declared type: a primitive keyword or another struct type name
    #[serde(rename = "type")]
    pub type_name: String,
}

impl TypedDataField {
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_name: type_name.into(),
        }
    }
}

/// Struct type definitions: type name to ordered field list.
///
/// Field order is semantically significant. It fixes both the canonical
/// type signature and the struct encoding order.
pub type TypeDefinitions = HashMap<String, Vec<TypedDataField>>;

/// A complete typed-data signing request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedMessage {
    /// Type definitions, including the `EIP712Domain` entry
    pub types: TypeDefinitions,

    /// The name of the struct type being signed
    pub primary_type: String,

    /// The domain struct value, hashed against `types["EIP712Domain"]`
    pub domain: serde_json::Value,

    /// The message struct value, hashed against the primary type
    pub message: serde_json::Value,
}

impl TypedMessage {
    /// Parse a typed message from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Eip712Error> {
        serde_json::from_str(json).map_err(|e| Eip712Error::InvalidJson(e.to_string()))
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, Eip712Error> {
        serde_json::to_string(self).map_err(|e| Eip712Error::InvalidJson(e.to_string()))
    }

    /// Validate the type graph before hashing.
    ///
    /// The primary type and the domain type must be defined, and every
    /// field type must be either a supported primitive or a defined struct.
    pub fn validate(&self) -> Result<(), Eip712Error> {
        if !self.types.contains_key(&self.primary_type) {
            return Err(Eip712Error::UnknownType(self.primary_type.clone()));
        }
        if !self.types.contains_key(EIP712_DOMAIN_TYPE) {
            return Err(Eip712Error::UnknownType(EIP712_DOMAIN_TYPE.to_string()));
        }

        for fields in self.types.values() {
            for field in fields {
                if !self.types.contains_key(&field.type_name)
                    && PrimitiveKind::resolve(&field.type_name).is_none()
                {
                    return Err(Eip712Error::UnknownType(field.type_name.clone()));
                }
            }
        }

        Ok(())
    }

    /// Validate and compute the final signable digest
    pub fn signing_hash(&self) -> Result<[u8; 32], Eip712Error> {
        self.validate()?;
        super::hasher::eip712_hash(&self.primary_type, &self.message, &self.types, &self.domain)
    }
}

/// Builder for the `EIP712Domain` side of a signing request.
///
/// Only populated fields appear in the generated type definition and value,
/// in the canonical field order (name, version, chainId, verifyingContract,
/// salt).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Eip712Domain {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub verifying_contract: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,
}

impl Eip712Domain {
    /// The `EIP712Domain` field list matching the populated fields
    pub fn type_fields(&self) -> Vec<TypedDataField> {
        let mut fields = Vec::new();

        if self.name.is_some() {
            fields.push(TypedDataField::new("name", "string"));
        }
        if self.version.is_some() {
            fields.push(TypedDataField::new("version", "string"));
        }
        if self.chain_id.is_some() {
            fields.push(TypedDataField::new("chainId", "uint256"));
        }
        if self.verifying_contract.is_some() {
            fields.push(TypedDataField::new("verifyingContract", "address"));
        }
        if self.salt.is_some() {
            fields.push(TypedDataField::new("salt", "bytes"));
        }

        fields
    }

    /// The domain struct value matching the populated fields
    pub fn to_value(&self) -> Result<serde_json::Value, Eip712Error> {
        serde_json::to_value(self).map_err(|e| Eip712Error::InvalidJson(e.to_string()))
    }

    /// Insert this domain's type definition into a type set
    pub fn register(&self, types: &mut TypeDefinitions) {
        types.insert(EIP712_DOMAIN_TYPE.to_string(), self.type_fields());
    }
}

/// ECDSA signature over a typed-data digest
#[derive(Debug, Clone, Zeroize)]
#[zeroize(drop)]
pub struct Eip712Signature {
    /// r component (32 bytes)
    pub r: [u8; 32],
    /// s component (32 bytes)
    pub s: [u8; 32],
    /// v component (recovery id, typically 27 or 28)
    pub v: u8,
}

impl Eip712Signature {
    /// Create from raw components
    pub fn new(r: [u8; 32], s: [u8; 32], v: u8) -> Self {
        Self { r, s, v }
    }

    /// Create from a 65-byte signature (r || s || v)
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Eip712Error> {
        if bytes.len() != 65 {
            return Err(Eip712Error::InvalidSignature(
                "expected 65 bytes".to_string(),
            ));
        }

        let mut r = [0u8; 32];
        let mut s = [0u8; 32];
        r.copy_from_slice(&bytes[0..32]);
        s.copy_from_slice(&bytes[32..64]);
        let v = bytes[64];

        Ok(Self { r, s, v })
    }

    /// Convert to the 65-byte representation (r || s || v)
    pub fn to_bytes(&self) -> [u8; 65] {
        let mut bytes = [0u8; 65];
        bytes[0..32].copy_from_slice(&self.r);
        bytes[32..64].copy_from_slice(&self.s);
        bytes[64] = self.v;
        bytes
    }

    /// Convert to hex string
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.to_bytes()))
    }
}

/// Errors from typed-data hashing and signing
#[derive(Debug, Clone, thiserror::Error)]
pub enum Eip712Error {
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Missing field: {0}")]
    MissingField(String),

    #[error("Invalid value for type {type_name}: {value}")]
    InvalidValue { type_name: String, value: String },

    #[error(transparent)]
    Abi(#[from] AbiError),

    #[error("Invalid signature: {0}")]
    InvalidSignature(String),

    #[error("Signing error: {0}")]
    SigningError(String),
}
