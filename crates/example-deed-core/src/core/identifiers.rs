// crates/example-deed-core/src/core/identifiers.rs
// ============================================================================
// Module: Example Deed Identifiers
// Description: Deed identifiers and payment amounts.
// Purpose: Provide strongly typed uint256 wrappers with stable wire forms.
// Dependencies: alloy-primitives, serde
// ============================================================================

//! ## Overview
//! Deed identifiers and payment amounts are uint256 values on the contract
//! ABI. They serialize transparently and parse from decimal or `0x`-prefixed
//! hexadecimal text.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;
use std::str::FromStr;

use alloy_primitives::U256;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised when parsing identifiers from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentifierParseError {
    /// Input was empty after trimming.
    #[error("{0} must not be empty")]
    Empty(&'static str),
    /// Input was not a valid uint256 literal.
    #[error("{0} must be a decimal or 0x-prefixed hex uint256")]
    Invalid(&'static str),
}

// ============================================================================
// SECTION: Identifier Types
// ============================================================================

/// Deed identifier assigned by the contract.
///
/// # Invariants
/// - Stable once created; never reassigned to a different deed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeedId(U256);

impl DeedId {
    /// Creates a deed identifier from a uint256 value.
    #[must_use]
    pub const fn new(id: U256) -> Self {
        Self(id)
    }

    /// Returns the raw uint256 value.
    #[must_use]
    pub const fn get(self) -> U256 {
        self.0
    }
}

impl From<u64> for DeedId {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for DeedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for DeedId {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uint256("deed id", s).map(Self)
    }
}

/// Payment amount attached to a contract call, in wei.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Wei(U256);

impl Wei {
    /// Zero payment.
    pub const ZERO: Self = Self(U256::ZERO);

    /// Creates an amount from a uint256 value.
    #[must_use]
    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    /// Returns the raw uint256 value.
    #[must_use]
    pub const fn get(self) -> U256 {
        self.0
    }

    /// Returns true when no value is attached.
    #[must_use]
    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    /// Adds two amounts, saturating at `U256::MAX`.
    #[must_use]
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl From<u128> for Wei {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl fmt::Display for Wei {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Wei {
    type Err = IdentifierParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_uint256("wei amount", s).map(Self)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses decimal or `0x`-prefixed hexadecimal uint256 text.
fn parse_uint256(field: &'static str, raw: &str) -> Result<U256, IdentifierParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IdentifierParseError::Empty(field));
    }
    let parsed = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
        Some("") => return Err(IdentifierParseError::Invalid(field)),
        Some(hex) => U256::from_str_radix(hex, 16),
        None => U256::from_str_radix(trimmed, 10),
    };
    parsed.map_err(|_| IdentifierParseError::Invalid(field))
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "Test-only assertions.")]

    use super::*;

    #[test]
    fn deed_id_parses_decimal_and_hex() {
        assert_eq!("999".parse::<DeedId>().unwrap(), DeedId::from(999));
        assert_eq!("0x3e7".parse::<DeedId>().unwrap(), DeedId::from(999));
    }

    #[test]
    fn deed_id_rejects_garbage() {
        assert_eq!("".parse::<DeedId>(), Err(IdentifierParseError::Empty("deed id")));
        assert_eq!("0x".parse::<DeedId>(), Err(IdentifierParseError::Invalid("deed id")));
        assert_eq!("-1".parse::<DeedId>(), Err(IdentifierParseError::Invalid("deed id")));
    }

    #[test]
    fn wei_displays_decimal() {
        assert_eq!(Wei::from(1_000_000_000_000_000_000_u128).to_string(), "1000000000000000000");
        assert!(Wei::ZERO.is_zero());
    }
}
