//! EIP-712 Typed Data Hashing Library
//!
//! Computes the canonical 32-byte signing digest of typed structured data
//! following the EIP-712 scheme, together with the restricted ABI value
//! codec the scheme relies on and ECDSA signing over the resulting digest.
//!
//! # Architecture
//!
//! This crate provides:
//! - **eip712**: type-dependency resolution, canonical type signatures,
//!   recursive struct encoding, the domain-separated digest and signing
//! - **abi**: fixed 32-byte encoding of the primitive subset
//!   (uint256, bool, address, string, bytes)
//! - **utils**: keccak-256 and Ethereum address helpers
//!
//! The pipeline is a pure synchronous computation over borrowed inputs:
//! no global state, safe to call concurrently on distinct inputs.
//!
//! # Example
//!
//! ```rust,ignore
//! use eip712_hash::TypedMessage;
//!
//! let message = TypedMessage::from_json(json_string)?;
//! let digest = message.signing_hash()?;
//! ```

pub mod abi;
pub mod eip712;
pub mod utils;

// Re-export the pipeline surface for convenience
pub use eip712::{
    dependencies, encode_data, encode_type, eip712_hash, hash_struct, signing_pre_image,
    type_hash, Eip712Domain, Eip712Error, Eip712Signature, SigningPreImage, TypeDefinitions,
    TypedDataField, TypedMessage, EIP712_DOMAIN_TYPE,
};

// Re-export signing operations
pub use eip712::{
    recover_address, sign_digest, sign_typed_message, verify_signature, verify_typed_message,
};

// Re-export the value codec and crypto primitives
pub use abi::{encode_field, AbiError, PrimitiveKind, U256};
pub use utils::crypto::{keccak256, to_checksum_address};
