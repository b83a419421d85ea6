//! EIP-712 Typed Data Hashing
//!
//! Implementation of EIP-712 typed structured data hashing and signing:
//! type-dependency resolution, canonical type signatures, recursive struct
//! encoding and the final domain-separated digest.
//!
//! # Reference
//! - <https://eips.ethereum.org/EIPS/eip-712>
//!
//! # Example
//! ```rust,ignore
//! use eip712_hash::eip712::{sign_typed_message, TypedMessage};
//!
//! let message = TypedMessage::from_json(json_string)?;
//! let digest = message.signing_hash()?;
//! let signature = sign_typed_message(&message, &private_key)?;
//! ```

pub mod types;
pub mod encoder;
pub mod hasher;
pub mod signer;

pub use types::*;
pub use encoder::*;
pub use hasher::*;
pub use signer::*;
