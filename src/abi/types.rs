//! Primitive type definitions for the restricted ABI value codec

/// The closed set of primitive types the value codec understands.
///
/// A type-name string is resolved into a kind once, at the dispatch
/// boundary; everything past that point matches exhaustively on the enum.
/// Arrays, tuples and fixed-width numeric variants are not part of the set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Uint256,
    Bool,
    Address,
    Str,
    Bytes,
}

impl PrimitiveKind {
    /// Resolve a type-name string into a primitive kind
    pub fn resolve(type_name: &str) -> Option<Self> {
        match type_name {
            "uint256" | "uint" => Some(PrimitiveKind::Uint256),
            "bool" => Some(PrimitiveKind::Bool),
            "address" => Some(PrimitiveKind::Address),
            "string" => Some(PrimitiveKind::Str),
            "bytes" => Some(PrimitiveKind::Bytes),
            _ => None,
        }
    }
}

/// Errors from the restricted value codec
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AbiError {
    /// Type name outside the supported primitive set
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// Value text cannot be parsed as its declared primitive type
    #[error("Malformed {type_name} value: {value}")]
    MalformedValue { type_name: String, value: String },

    /// Numeric value does not fit in 256 bits
    #[error("Numeric overflow: {0}")]
    Overflow(String),
}

/// 256-bit unsigned integer, four little-endian u64 limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct U256(pub [u64; 4]);

impl U256 {
    pub const ZERO: U256 = U256([0, 0, 0, 0]);
    pub const MAX: U256 = U256([u64::MAX, u64::MAX, u64::MAX, u64::MAX]);

    /// Create from u64
    pub fn from_u64(value: u64) -> Self {
        U256([value, 0, 0, 0])
    }

    /// Create from bytes (big-endian, at most 32)
    pub fn from_be_bytes(bytes: &[u8]) -> Self {
        let mut padded = [0u8; 32];
        let take = bytes.len().min(32);
        padded[32 - take..].copy_from_slice(&bytes[..take]);

        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let offset = (3 - i) * 8;
            limbs[i] = u64::from_be_bytes(padded[offset..offset + 8].try_into().unwrap());
        }
        U256(limbs)
    }

    /// Convert to bytes (big-endian, 32 bytes)
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        for i in 0..4 {
            let offset = (3 - i) * 8;
            bytes[offset..offset + 8].copy_from_slice(&self.0[i].to_be_bytes());
        }
        bytes
    }

    /// Parse from a non-negative base-10 string
    pub fn from_dec(s: &str) -> Result<Self, AbiError> {
        if s.is_empty() {
            return Err(AbiError::MalformedValue {
                type_name: "uint256".to_string(),
                value: s.to_string(),
            });
        }

        let mut result = U256::ZERO;
        for c in s.chars() {
            let digit = c.to_digit(10).ok_or_else(|| AbiError::MalformedValue {
                type_name: "uint256".to_string(),
                value: s.to_string(),
            })?;
            result = result
                .checked_mul_u64(10)
                .and_then(|r| r.checked_add(U256::from_u64(digit as u64)))
                .ok_or_else(|| AbiError::Overflow(s.to_string()))?;
        }
        Ok(result)
    }

    /// Checked addition
    pub fn checked_add(&self, other: U256) -> Option<U256> {
        let mut result = [0u64; 4];
        let mut carry = 0u64;

        for i in 0..4 {
            let (sum1, c1) = self.0[i].overflowing_add(other.0[i]);
            let (sum2, c2) = sum1.overflowing_add(carry);
            result[i] = sum2;
            carry = (c1 as u64) + (c2 as u64);
        }

        if carry != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Checked multiplication by u64
    pub fn checked_mul_u64(&self, other: u64) -> Option<U256> {
        let mut result = [0u64; 4];
        let mut carry = 0u128;

        for i in 0..4 {
            let prod = (self.0[i] as u128) * (other as u128) + carry;
            result[i] = prod as u64;
            carry = prod >> 64;
        }

        if carry != 0 {
            None
        } else {
            Some(U256(result))
        }
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.0 == [0, 0, 0, 0]
    }
}
