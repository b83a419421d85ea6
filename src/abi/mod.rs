//! Restricted ABI encoding for typed-data primitives
//!
//! Fixed 32-byte-per-value encoding of the primitive subset used by the
//! typed-data hashing pipeline: uint256, bool, address, string and bytes.
//! This is deliberately not the full contract-call ABI; there is no
//! offset-based layout and no array or tuple support.

pub mod types;
pub mod encoder;


pub use types::*;
pub use encoder::*;
