//! Error types for color parsing and mutation.

use std::fmt;

use thiserror::Error;

/// One scalar component of the RGB or HSV color space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
    Hue,
    Saturation,
    Value,
}

impl Channel {
    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
            Channel::Hue => "hue",
            Channel::Saturation => "saturation",
            Channel::Value => "value",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Why a color input was rejected.
///
/// Every variant is raised before any stored value is touched.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ColorError {
    /// Malformed hex string or a value that cannot be coerced to a number.
    #[error("invalid color format: {input}")]
    InvalidFormat { input: String },

    #[error("{channel} must be between {min} and {max}, got {value}")]
    OutOfRange {
        channel: Channel,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A composite object (`rgb_value`, `hsv_value`) lacks a sub-field.
    #[error("{field} must contain {missing:?}")]
    IncompleteInput {
        field: &'static str,
        missing: Vec<&'static str>,
    },

    #[error("no valid color format provided")]
    NoInputProvided,
}

impl ColorError {
    pub(crate) fn invalid_format(input: impl Into<String>) -> Self {
        ColorError::InvalidFormat {
            input: input.into(),
        }
    }

    pub(crate) fn out_of_range(channel: Channel, value: f64, min: f64, max: f64) -> Self {
        ColorError::OutOfRange {
            channel,
            value,
            min,
            max,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn messages_name_the_offending_input() {
        assert_eq!(
            ColorError::out_of_range(Channel::Red, 300.0, 0.0, 255.0).to_string(),
            "red must be between 0 and 255, got 300"
        );
        assert_eq!(
            ColorError::IncompleteInput {
                field: "rgb_value",
                missing: vec!["blue"],
            }
            .to_string(),
            "rgb_value must contain [\"blue\"]"
        );
        assert_eq!(
            ColorError::invalid_format("#GGGGGG").to_string(),
            "invalid color format: #GGGGGG"
        );
    }
}
