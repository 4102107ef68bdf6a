//! Household code generation.
//!
//! A household code is the base62 encoding of the household id plus a fixed
//! offset. Codes are never stored independently of the id: they can always be
//! recomputed from it, and two households can only share a code if they share
//! an id.

use common::HouseholdId;
use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Base62 alphabet: digits, then lowercase, then uppercase.
const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Added to the id before encoding so every code has at least two characters.
pub const CODE_OFFSET: u64 = 1000;

/// Short, shareable code identifying a household during RSVP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HouseholdCode(String);

impl HouseholdCode {
    /// Parses a code, checking it is non-empty and uses only the base62 alphabet.
    pub fn parse(code: impl Into<String>) -> Result<Self, ValidationError> {
        let code = code.into();
        if code.is_empty() || !code.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ValidationError::InvalidHouseholdCode { code });
        }
        Ok(Self(code))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Recovers the household id this code was generated from.
    ///
    /// Returns None for codes below the offset or beyond the id range.
    pub fn household_id(&self) -> Option<HouseholdId> {
        let value = decode(&self.0)?;
        let id = value.checked_sub(CODE_OFFSET)?;
        u32::try_from(id).ok().map(HouseholdId::new)
    }
}

impl std::fmt::Display for HouseholdCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for HouseholdCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Derives the household code for an id.
///
/// Deterministic and injective over all ids.
pub fn household_code(id: HouseholdId) -> HouseholdCode {
    HouseholdCode(encode(u64::from(id.as_u32()) + CODE_OFFSET))
}

fn encode(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while value > 0 {
        digits.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    digits.reverse();

    digits.into_iter().map(char::from).collect()
}

fn decode(code: &str) -> Option<u64> {
    code.bytes().try_fold(0u64, |acc, byte| {
        let digit = ALPHABET.iter().position(|&b| b == byte)? as u64;
        acc.checked_mul(62)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn first_household_code() {
        assert_eq!(household_code(HouseholdId::first()).as_str(), "g9");
    }

    #[test]
    fn code_is_deterministic() {
        let id = HouseholdId::new(42);
        assert_eq!(household_code(id), household_code(id));
    }

    #[test]
    fn codes_are_injective_up_to_a_million() {
        let mut seen = HashSet::new();
        for raw in 0..=1_000_000u32 {
            let code = household_code(HouseholdId::new(raw));
            assert!(seen.insert(code), "duplicate code for id {raw}");
        }
    }

    #[test]
    fn code_decodes_back_to_id() {
        for raw in [0u32, 1, 61, 62, 999, 3844, 1_000_000, u32::MAX] {
            let id = HouseholdId::new(raw);
            assert_eq!(household_code(id).household_id(), Some(id));
        }
    }

    #[test]
    fn encode_zero() {
        assert_eq!(encode(0), "0");
        assert_eq!(decode("0"), Some(0));
    }

    #[test]
    fn parse_rejects_empty_and_foreign_characters() {
        assert!(matches!(
            HouseholdCode::parse(""),
            Err(ValidationError::InvalidHouseholdCode { .. })
        ));
        assert!(matches!(
            HouseholdCode::parse("some-wrong-code"),
            Err(ValidationError::InvalidHouseholdCode { .. })
        ));
        assert_eq!(HouseholdCode::parse("g9").unwrap().as_str(), "g9");
    }

    #[test]
    fn codes_below_offset_have_no_household() {
        let code = HouseholdCode::parse("a").unwrap();
        assert_eq!(code.household_id(), None);
    }
}
