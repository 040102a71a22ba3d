//! Loosely typed numeric and hex inputs for color channel editing.
//!
//! Service calls and config files carry numbers as JSON/TOML integers, floats
//! or strings. [`ChannelInput`] accepts all three and coerces on demand.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// A raw channel value as it arrived on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChannelInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ChannelInput {
    /// Coerce to an integer. Floats are truncated toward zero, strings must
    /// hold an integer literal.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidFormat`] for non-numeric text or non-finite floats.
    pub fn to_int(&self) -> Result<i64, ColorError> {
        match self {
            ChannelInput::Integer(value) => Ok(*value),
            ChannelInput::Float(value) if value.is_finite() => Ok(value.trunc() as i64),
            ChannelInput::Float(_) => Err(ColorError::invalid_format(self.to_string())),
            ChannelInput::Text(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ColorError::invalid_format(text.as_str())),
        }
    }

    /// Coerce to a float.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidFormat`] for text that is not a number.
    pub fn to_float(&self) -> Result<f64, ColorError> {
        match self {
            ChannelInput::Integer(value) => Ok(*value as f64),
            ChannelInput::Float(value) => Ok(*value),
            ChannelInput::Text(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|_| ColorError::invalid_format(text.as_str())),
        }
    }
}

impl fmt::Display for ChannelInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChannelInput::Integer(value) => write!(f, "{value}"),
            ChannelInput::Float(value) => write!(f, "{value}"),
            ChannelInput::Text(text) => f.write_str(text),
        }
    }
}

impl From<i64> for ChannelInput {
    fn from(value: i64) -> Self {
        ChannelInput::Integer(value)
    }
}

impl From<f64> for ChannelInput {
    fn from(value: f64) -> Self {
        ChannelInput::Float(value)
    }
}

impl From<&str> for ChannelInput {
    fn from(value: &str) -> Self {
        ChannelInput::Text(value.to_string())
    }
}

/// Normalize user hex input: uppercase, and prepend `#` if missing.
///
/// Does not validate; pass the result to [`ColorValue::from_hex`](crate::ColorValue::from_hex).
pub(crate) fn normalize_hex(hex: &str) -> String {
    let upper = hex.to_uppercase();
    if upper.starts_with('#') {
        upper
    } else {
        format!("#{upper}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test_case(ChannelInput::Integer(42), 42)]
    #[test_case(ChannelInput::Float(12.9), 12)]
    #[test_case(ChannelInput::Float(-0.5), 0)]
    #[test_case(ChannelInput::Text(" 200 ".into()), 200)]
    fn coerces_to_int(input: ChannelInput, expected: i64) {
        assert_eq!(input.to_int(), Ok(expected));
    }

    #[test_case(ChannelInput::Text("12.5".into()))]
    #[test_case(ChannelInput::Text("red".into()))]
    #[test_case(ChannelInput::Float(f64::INFINITY))]
    fn rejects_non_integers(input: ChannelInput) {
        assert!(matches!(input.to_int(), Err(ColorError::InvalidFormat { .. })));
    }

    #[test]
    fn coerces_to_float() {
        assert_eq!(ChannelInput::Integer(1).to_float(), Ok(1.0));
        assert_eq!(ChannelInput::from("0.25").to_float(), Ok(0.25));
        assert!(ChannelInput::from("half").to_float().is_err());
    }

    #[test]
    fn deserializes_any_json_scalar() {
        let parsed: Vec<ChannelInput> = serde_json::from_str(r#"[1, 0.5, "7"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                ChannelInput::Integer(1),
                ChannelInput::Float(0.5),
                ChannelInput::Text("7".into()),
            ]
        );
    }

    #[test_case("00ff00", "#00FF00")]
    #[test_case("#abcdef", "#ABCDEF")]
    #[test_case("#", "#")]
    fn normalizes_hex(input: &str, expected: &str) {
        assert_eq!(normalize_hex(input), expected);
    }
}
