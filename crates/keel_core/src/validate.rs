use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// A 20-byte hex account or contract address, shape-checked and normalized
/// to lowercase so equality is plain string equality.
///
/// Serde goes through [`Address::parse`], so a malformed address in a config
/// file fails at load time instead of reaching a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Parse and normalize an address. Accepts exactly `0x` plus 40 hex
    /// digits in any case.
    pub fn parse(input: &str) -> Result<Self, IntentError> {
        let trimmed = input.trim();
        let hex = trimmed
            .strip_prefix("0x")
            .or_else(|| trimmed.strip_prefix("0X"));
        match hex {
            Some(hex) if hex.len() == 40 && hex.bytes().all(|b| b.is_ascii_hexdigit()) => {
                Ok(Self(trimmed.to_ascii_lowercase()))
            }
            _ => Err(IntentError::InvalidIdentifier(format!(
                "`{trimmed}` is not a 0x-prefixed 20-byte hex address"
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Address {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = IntentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

/// Check that every listed `(name, value)` pair has a non-blank value.
/// The first blank field wins, named in the error.
pub fn validate_required(fields: &[(&str, &str)]) -> Result<(), IntentError> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(IntentError::MissingField((*name).to_string()));
        }
    }
    Ok(())
}

/// Reject amounts that are certainly not positive: anything with a leading
/// minus sign, and any well-formed decimal whose digits are all zeros.
///
/// Well-formedness itself is not this function's job; a string like `"abc"`
/// passes here and is rejected by [`crate::units::to_base_units`], still
/// before anything leaves the process.
pub fn validate_positive_amount(amount: &str) -> Result<(), IntentError> {
    let trimmed = amount.trim();
    if trimmed.starts_with('-') || is_zero_decimal(trimmed) {
        return Err(IntentError::NonPositiveAmount);
    }
    Ok(())
}

fn is_zero_decimal(s: &str) -> bool {
    let (whole, frac) = match s.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (s, ""),
    };
    if whole.is_empty() && frac.is_empty() {
        return false;
    }
    whole.bytes().chain(frac.bytes()).all(|b| b == b'0')
}

/// Parse a campaign id: a bare non-negative integer, `"0"` included.
pub fn validate_campaign_id(id: &str) -> Result<u64, IntentError> {
    let trimmed = id.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntentError::InvalidIdentifier(format!(
            "campaign id `{trimmed}` is not a non-negative integer"
        )));
    }
    trimmed.parse().map_err(|_| {
        IntentError::InvalidIdentifier(format!("campaign id `{trimmed}` is out of range"))
    })
}

/// Parse an address field, wrapping [`Address::parse`] for use alongside the
/// other validators.
pub fn validate_address(input: &str) -> Result<Address, IntentError> {
    Address::parse(input)
}

/// Parse a duration field as a whole number of seconds. Zero is allowed
/// (a schedule may have no cliff).
pub fn validate_duration_secs(field: &str, value: &str) -> Result<u64, IntentError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(IntentError::InvalidAmount(format!(
            "{field} must be a whole number of seconds"
        )));
    }
    trimmed
        .parse()
        .map_err(|_| IntentError::InvalidAmount(format!("{field} is out of range")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_address_parses_and_lowercases() {
        let addr = Address::parse("0xAbCd000000000000000000000000000000001234").unwrap();
        assert_eq!(addr.as_str(), "0xabcd000000000000000000000000000000001234");
    }

    #[test]
    fn test_address_rejects_bad_shapes() {
        for bad in [
            "",
            "abcd000000000000000000000000000000001234",   // no prefix
            "0xabcd",                                      // too short
            "0xabcd0000000000000000000000000000000012345", // 41 digits
            "0xzzcd000000000000000000000000000000001234",  // not hex
        ] {
            let err = Address::parse(bad).unwrap_err();
            assert!(
                matches!(err, IntentError::InvalidIdentifier(_)),
                "expected InvalidIdentifier for {bad:?}"
            );
        }
    }

    #[test]
    fn test_address_serde_rejects_malformed_input() {
        let ok: Result<Address, _> =
            serde_json::from_str("\"0xabcd000000000000000000000000000000001234\"");
        assert!(ok.is_ok());
        let bad: Result<Address, _> = serde_json::from_str("\"not-an-address\"");
        assert!(bad.is_err());
    }

    #[test]
    fn test_address_from_str_round_trip() {
        let addr: Address = "0x00000000000000000000000000000000000000ff".parse().unwrap();
        assert_eq!(addr.to_string(), "0x00000000000000000000000000000000000000ff");
    }

    #[test]
    fn test_validate_required_names_first_blank_field() {
        let err = validate_required(&[("title", "Fund the park"), ("goal", "  ")]).unwrap_err();
        assert_eq!(err, IntentError::MissingField("goal".into()));
    }

    #[test]
    fn test_validate_required_passes_when_all_present() {
        assert!(validate_required(&[("title", "x"), ("goal", "1")]).is_ok());
    }

    #[test]
    fn test_validate_positive_amount_accepts_positive() {
        for good in ["1", "0.5", "1.5", "0.0001", ".01", "100."] {
            assert!(validate_positive_amount(good).is_ok(), "rejected {good:?}");
        }
    }

    #[test]
    fn test_validate_positive_amount_rejects_zero_and_negative() {
        for bad in ["0", "0.0", "000", ".0", "0.", "-1", "-0.5"] {
            assert_eq!(
                validate_positive_amount(bad).unwrap_err(),
                IntentError::NonPositiveAmount,
                "expected NonPositiveAmount for {bad:?}"
            );
        }
    }

    #[test]
    fn test_validate_positive_amount_leaves_malformed_to_conversion() {
        // Not provably non-positive; to_base_units rejects it instead.
        assert!(validate_positive_amount("abc").is_ok());
        assert!(validate_positive_amount("0..0").is_ok());
    }

    #[test]
    fn test_validate_campaign_id_accepts_zero() {
        assert_eq!(validate_campaign_id("0").unwrap(), 0);
        assert_eq!(validate_campaign_id(" 17 ").unwrap(), 17);
    }

    #[test]
    fn test_validate_campaign_id_rejects_non_integers() {
        for bad in ["-1", "abc", "1.5", "", "0x10"] {
            let err = validate_campaign_id(bad).unwrap_err();
            assert!(
                matches!(err, IntentError::InvalidIdentifier(_)),
                "expected InvalidIdentifier for {bad:?}"
            );
        }
    }

    #[test]
    fn test_validate_duration_allows_zero_cliff() {
        assert_eq!(validate_duration_secs("cliff", "0").unwrap(), 0);
        assert_eq!(validate_duration_secs("duration", "86400").unwrap(), 86_400);
    }

    #[test]
    fn test_validate_duration_rejects_negative_and_fractional() {
        for bad in ["-5", "1.5", "soon"] {
            let err = validate_duration_secs("cliff", bad).unwrap_err();
            assert!(
                matches!(err, IntentError::InvalidAmount(_)),
                "expected InvalidAmount for {bad:?}"
            );
        }
    }
}
