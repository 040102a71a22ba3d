//! ColorValue — the canonical stored color.
//!
//! Stores 8-bit RGB and derives hex and HSV on read. HSV here is always on the
//! 0.0–1.0 scale; the degree/percent scale only exists for configured initial
//! values (see [`InitialColor`](crate::InitialColor)).

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{Channel, ColorError};
use crate::math;

static HEX_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#[0-9A-F]{6}$").unwrap());

/// Checks `value` against the RGB channel range and narrows it to `u8`.
pub(crate) fn rgb_channel(channel: Channel, value: i64) -> Result<u8, ColorError> {
    u8::try_from(value).map_err(|_| ColorError::out_of_range(channel, value as f64, 0.0, 255.0))
}

/// Checks `value` against the 0.0–1.0 HSV range. NaN is out of range.
pub(crate) fn unit_channel(channel: Channel, value: f64) -> Result<f64, ColorError> {
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(ColorError::out_of_range(channel, value, 0.0, 1.0))
    }
}

/// An opaque 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ColorValue {
    red: u8,
    green: u8,
    blue: u8,
}

impl Default for ColorValue {
    /// White, `#FFFFFF`.
    fn default() -> Self {
        Self::WHITE
    }
}

impl ColorValue {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);

    /// Create from 0–255 RGB values.
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Create from wide integers, rejecting anything outside 0–255.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] naming the first offending channel.
    pub fn try_from_rgb(red: i64, green: i64, blue: i64) -> Result<Self, ColorError> {
        Ok(Self::from_rgb(
            rgb_channel(Channel::Red, red)?,
            rgb_channel(Channel::Green, green)?,
            rgb_channel(Channel::Blue, blue)?,
        ))
    }

    /// Convert to 0–255 RGB tuple.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// Parse `#RRGGBB`. Digits may be either case; the `#` is required.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidFormat`] when `hex` does not match the pattern.
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        if !Self::is_valid_hex(hex) {
            return Err(ColorError::invalid_format(hex));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorError::invalid_format(hex))
        };
        Ok(Self::from_rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }

    /// Whether `hex` is accepted by [`ColorValue::from_hex`].
    pub fn is_valid_hex(hex: &str) -> bool {
        HEX_PATTERN.is_match(hex)
    }

    /// Format as uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        self.to_string()
    }

    /// Format as uppercase `RRGGBB`.
    pub fn hex_without_hash(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.red, self.green, self.blue)
    }

    /// Create from HSV values, all 0.0–1.0.
    ///
    /// Channels are truncated to 8 bits, so an HSV round trip can lose one
    /// step per channel.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] if any component is outside 0.0–1.0.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64) -> Result<Self, ColorError> {
        let hue = unit_channel(Channel::Hue, hue)?;
        let saturation = unit_channel(Channel::Saturation, saturation)?;
        let value = unit_channel(Channel::Value, value)?;
        let (r, g, b) = math::hsv_to_rgb(hue, saturation, value);
        Ok(Self::from_rgb(r, g, b))
    }

    /// Convert to HSV (all 0.0–1.0). Returns (h, s, v).
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        math::rgb_to_hsv(self.red, self.green, self.blue)
    }

    /// Red channel (0–255).
    pub fn red(&self) -> u8 {
        self.red
    }

    /// Green channel (0–255).
    pub fn green(&self) -> u8 {
        self.green
    }

    /// Blue channel (0–255).
    pub fn blue(&self) -> u8 {
        self.blue
    }

    /// HSV hue (0.0–1.0).
    pub fn hue(&self) -> f64 {
        self.to_hsv().0
    }

    /// HSV saturation (0.0–1.0).
    pub fn saturation(&self) -> f64 {
        self.to_hsv().1
    }

    /// HSV value, i.e. brightness (0.0–1.0).
    pub fn value(&self) -> f64 {
        self.to_hsv().2
    }

    /// Replace the red channel. Out-of-range input leaves `self` untouched.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `red` is in 0–255.
    pub fn set_red(&mut self, red: i64) -> Result<(), ColorError> {
        self.red = rgb_channel(Channel::Red, red)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `green` is in 0–255.
    pub fn set_green(&mut self, green: i64) -> Result<(), ColorError> {
        self.green = rgb_channel(Channel::Green, green)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `blue` is in 0–255.
    pub fn set_blue(&mut self, blue: i64) -> Result<(), ColorError> {
        self.blue = rgb_channel(Channel::Blue, blue)?;
        Ok(())
    }

    /// Replace the hue (0.0–1.0), keeping saturation and value.
    ///
    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `hue` is in 0.0–1.0.
    pub fn set_hue(&mut self, hue: f64) -> Result<(), ColorError> {
        let (_, s, v) = self.to_hsv();
        *self = Self::from_hsv(hue, s, v)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `saturation` is in 0.0–1.0.
    pub fn set_saturation(&mut self, saturation: f64) -> Result<(), ColorError> {
        let (h, _, v) = self.to_hsv();
        *self = Self::from_hsv(h, saturation, v)?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`ColorError::OutOfRange`] unless `value` is in 0.0–1.0.
    pub fn set_value(&mut self, value: f64) -> Result<(), ColorError> {
        let (h, s, _) = self.to_hsv();
        *self = Self::from_hsv(h, s, value)?;
        Ok(())
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.hex_without_hash())
    }
}

impl FromStr for ColorValue {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ColorValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ColorValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Self::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn default_is_white() {
        assert_eq!(ColorValue::default().to_hex(), "#FFFFFF");
    }

    #[test_case("#00ff00", "#00FF00")]
    #[test_case("#123abc", "#123ABC")]
    #[test_case("#000000", "#000000")]
    #[test_case("#FfFfFf", "#FFFFFF")]
    fn hex_is_normalized_to_uppercase(input: &str, expected: &str) {
        assert_eq!(ColorValue::from_hex(input).unwrap().to_hex(), expected);
    }

    #[test_case("00FF00"; "missing hash")]
    #[test_case("#00FF0"; "too short")]
    #[test_case("#00FF000"; "too long")]
    #[test_case("#GG0000"; "not hex")]
    #[test_case("##00FF0"; "double hash")]
    #[test_case(""; "empty")]
    #[test_case("#00FF00\n"; "trailing newline")]
    fn malformed_hex_is_rejected(input: &str) {
        assert_eq!(
            ColorValue::from_hex(input),
            Err(ColorError::InvalidFormat {
                input: input.to_string()
            })
        );
    }

    #[test_case("#00ff00", true)]
    #[test_case("#A1B2C3", true)]
    #[test_case("00FF00", false)]
    #[test_case("#00FF0", false)]
    #[test_case("#00FF00 ", false)]
    fn hex_validity_matches_parsing(input: &str, valid: bool) {
        assert_eq!(ColorValue::is_valid_hex(input), valid);
        assert_eq!(ColorValue::from_hex(input).is_ok(), valid);
    }

    #[test]
    fn hex_is_zero_padded() {
        let color = ColorValue::from_rgb(1, 2, 3);
        assert_eq!(color.to_hex(), "#010203");
        assert_eq!(color.hex_without_hash(), "010203");
        assert_eq!(color.to_string(), "#010203");
    }

    #[test]
    fn rgb_round_trip_is_lossless() {
        for r in (0..=255).step_by(5) {
            for g in (0..=255).step_by(17) {
                for b in [0, 1, 127, 128, 254, 255] {
                    let color = ColorValue::try_from_rgb(r, g, b).unwrap();
                    assert_eq!(color.to_rgb(), (r as u8, g as u8, b as u8));
                }
            }
        }
    }

    #[test]
    fn hsv_round_trip_is_within_one_step() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let original = ColorValue::from_rgb(r, g, b);
                    let (h, s, v) = original.to_hsv();
                    let back = ColorValue::from_hsv(h, s, v).unwrap();
                    let (r2, g2, b2) = back.to_rgb();
                    assert!(r.abs_diff(r2) <= 1, "{original} -> {back}");
                    assert!(g.abs_diff(g2) <= 1, "{original} -> {back}");
                    assert!(b.abs_diff(b2) <= 1, "{original} -> {back}");
                }
            }
        }
    }

    #[test_case(256, 0, 0, Channel::Red)]
    #[test_case(0, -1, 0, Channel::Green)]
    #[test_case(0, 0, 1000, Channel::Blue)]
    fn rgb_out_of_range(r: i64, g: i64, b: i64, channel: Channel) {
        match ColorValue::try_from_rgb(r, g, b) {
            Err(ColorError::OutOfRange { channel: got, .. }) => assert_eq!(got, channel),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test_case(1.5, 0.5, 0.5, Channel::Hue)]
    #[test_case(0.5, -0.1, 0.5, Channel::Saturation)]
    #[test_case(0.5, 0.5, f64::NAN, Channel::Value)]
    fn hsv_out_of_range(h: f64, s: f64, v: f64, channel: Channel) {
        match ColorValue::from_hsv(h, s, v) {
            Err(ColorError::OutOfRange { channel: got, .. }) => assert_eq!(got, channel),
            other => panic!("expected OutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_setters_leave_value_unchanged() {
        let mut color = ColorValue::from_rgb(12, 34, 56);
        assert!(color.set_red(300).is_err());
        assert!(color.set_blue(-5).is_err());
        assert!(color.set_hue(1.5).is_err());
        assert!(color.set_saturation(2.0).is_err());
        assert!(color.set_value(-0.01).is_err());
        assert_eq!(color, ColorValue::from_rgb(12, 34, 56));
    }

    #[test]
    fn rgb_setters_replace_one_channel() {
        let mut color = ColorValue::from_rgb(12, 34, 56);
        color.set_green(200).unwrap();
        assert_eq!(color.to_rgb(), (12, 200, 56));
    }

    #[test]
    fn hue_setter_keeps_saturation_and_value() {
        let mut color = ColorValue::from_hex("#FF0000").unwrap();
        color.set_hue(0.333).unwrap();
        assert_eq!(color.to_hex(), "#00FF00");
    }

    #[test]
    fn value_setter_darkens() {
        let mut color = ColorValue::WHITE;
        color.set_value(0.5).unwrap();
        assert_eq!(color.to_rgb(), (127, 127, 127));
    }

    #[test]
    fn gray_has_zero_hue_and_saturation() {
        let color = ColorValue::from_rgb(90, 90, 90);
        assert_eq!(color.hue(), 0.0);
        assert_eq!(color.saturation(), 0.0);
    }

    #[test]
    fn serializes_as_hex_string() {
        let color = ColorValue::from_rgb(0x12, 0x3A, 0xBC);
        assert_eq!(serde_json::to_string(&color).unwrap(), "\"#123ABC\"");
        let parsed: ColorValue = serde_json::from_str("\"#123abc\"").unwrap();
        assert_eq!(parsed, color);
        assert!(serde_json::from_str::<ColorValue>("\"red\"").is_err());
    }
}
