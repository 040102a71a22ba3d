//! The `set_color` command: pick one input out of nine and validate it.
//!
//! HSV inputs here are on the 0.0–1.0 scale for hue, saturation and value
//! alike. This is *not* the scale of [`InitialColor::Hsv`](crate::InitialColor::Hsv),
//! which takes degrees and percentages.

use serde::{Deserialize, Serialize};

use crate::color::{ColorValue, rgb_channel, unit_channel};
use crate::error::{Channel, ColorError};
use crate::inputs::{ChannelInput, normalize_hex};

/// An RGB object as sent by a caller. Every field is optional on the wire so a
/// missing one is reported as [`ColorError::IncompleteInput`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RgbInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<ChannelInput>,
}

impl RgbInput {
    pub fn new(red: i64, green: i64, blue: i64) -> Self {
        Self {
            red: Some(red.into()),
            green: Some(green.into()),
            blue: Some(blue.into()),
        }
    }

    fn is_empty(&self) -> bool {
        self.red.is_none() && self.green.is_none() && self.blue.is_none()
    }

    fn resolve(&self) -> Result<ColorValue, ColorError> {
        let (Some(red), Some(green), Some(blue)) = (&self.red, &self.green, &self.blue) else {
            return Err(ColorError::IncompleteInput {
                field: "rgb_value",
                missing: missing(&[
                    ("red", self.red.is_none()),
                    ("green", self.green.is_none()),
                    ("blue", self.blue.is_none()),
                ]),
            });
        };
        ColorValue::try_from_rgb(red.to_int()?, green.to_int()?, blue.to_int()?)
    }
}

/// An HSV object as sent by a caller, every component on 0.0–1.0.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HsvInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub s: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub v: Option<ChannelInput>,
}

impl HsvInput {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self {
            h: Some(h.into()),
            s: Some(s.into()),
            v: Some(v.into()),
        }
    }

    fn is_empty(&self) -> bool {
        self.h.is_none() && self.s.is_none() && self.v.is_none()
    }

    fn resolve(&self) -> Result<ColorValue, ColorError> {
        let (Some(h), Some(s), Some(v)) = (&self.h, &self.s, &self.v) else {
            return Err(ColorError::IncompleteInput {
                field: "hsv_value",
                missing: missing(&[
                    ("h", self.h.is_none()),
                    ("s", self.s.is_none()),
                    ("v", self.v.is_none()),
                ]),
            });
        };
        ColorValue::from_hsv(h.to_float()?, s.to_float()?, v.to_float()?)
    }
}

fn missing(fields: &[(&'static str, bool)]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|(_, absent)| *absent)
        .map(|(name, _)| *name)
        .collect()
}

/// A `set_color` request. At most one field is honored, in declaration order:
/// `hex_value`, `rgb_value`, `hsv_value`, then the single channels `red`,
/// `green`, `blue`, `hue`, `saturation`, `value`.
///
/// An empty `hex_value` string or an empty object counts as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SetColor {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hex_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rgb_value: Option<RgbInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hsv_value: Option<HsvInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub green: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blue: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hue: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saturation: Option<ChannelInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<ChannelInput>,
}

impl SetColor {
    pub fn hex(hex: impl Into<String>) -> Self {
        Self {
            hex_value: Some(hex.into()),
            ..Self::default()
        }
    }

    pub fn rgb(red: i64, green: i64, blue: i64) -> Self {
        Self {
            rgb_value: Some(RgbInput::new(red, green, blue)),
            ..Self::default()
        }
    }

    pub fn hsv(h: f64, s: f64, v: f64) -> Self {
        Self {
            hsv_value: Some(HsvInput::new(h, s, v)),
            ..Self::default()
        }
    }

    /// A request that sets a single channel. RGB channels take integers,
    /// HSV channels take 0.0–1.0 floats.
    pub fn channel(channel: Channel, input: impl Into<ChannelInput>) -> Self {
        let input = Some(input.into());
        let mut command = Self::default();
        match channel {
            Channel::Red => command.red = input,
            Channel::Green => command.green = input,
            Channel::Blue => command.blue = input,
            Channel::Hue => command.hue = input,
            Channel::Saturation => command.saturation = input,
            Channel::Value => command.value = input,
        }
        command
    }

    /// Select the honored field and validate it.
    ///
    /// # Errors
    ///
    /// Whatever the selected field fails with, or
    /// [`ColorError::NoInputProvided`] when nothing is set.
    pub fn resolve(&self) -> Result<Mutation, ColorError> {
        if let Some(hex) = self.hex_value.as_deref().filter(|hex| !hex.is_empty()) {
            return ColorValue::from_hex(&normalize_hex(hex)).map(Mutation::replace);
        }
        if let Some(rgb) = self.rgb_value.as_ref().filter(|rgb| !rgb.is_empty()) {
            return rgb.resolve().map(Mutation::replace);
        }
        if let Some(hsv) = self.hsv_value.as_ref().filter(|hsv| !hsv.is_empty()) {
            return hsv.resolve().map(Mutation::replace);
        }

        let rgb_channels = [
            (RgbChannel::Red, &self.red),
            (RgbChannel::Green, &self.green),
            (RgbChannel::Blue, &self.blue),
        ];
        for (channel, input) in rgb_channels {
            if let Some(input) = input {
                let value = rgb_channel(channel.into(), input.to_int()?)?;
                return Ok(Mutation(Change::Rgb(channel, value)));
            }
        }

        let hsv_channels = [
            (HsvChannel::Hue, &self.hue),
            (HsvChannel::Saturation, &self.saturation),
            (HsvChannel::Value, &self.value),
        ];
        for (channel, input) in hsv_channels {
            if let Some(input) = input {
                let value = unit_channel(channel.into(), input.to_float()?)?;
                return Ok(Mutation(Change::Hsv(channel, value)));
            }
        }

        Err(ColorError::NoInputProvided)
    }

    /// Resolve against `current` and return the value to store.
    ///
    /// # Errors
    ///
    /// See [`SetColor::resolve`]. `current` is never modified.
    pub fn apply_to(&self, current: ColorValue) -> Result<ColorValue, ColorError> {
        Ok(self.resolve()?.apply(current))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RgbChannel {
    Red,
    Green,
    Blue,
}

impl From<RgbChannel> for Channel {
    fn from(channel: RgbChannel) -> Self {
        match channel {
            RgbChannel::Red => Channel::Red,
            RgbChannel::Green => Channel::Green,
            RgbChannel::Blue => Channel::Blue,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HsvChannel {
    Hue,
    Saturation,
    Value,
}

impl From<HsvChannel> for Channel {
    fn from(channel: HsvChannel) -> Self {
        match channel {
            HsvChannel::Hue => Channel::Hue,
            HsvChannel::Saturation => Channel::Saturation,
            HsvChannel::Value => Channel::Value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Change {
    Replace(ColorValue),
    Rgb(RgbChannel, u8),
    /// Component on the 0.0–1.0 scale.
    Hsv(HsvChannel, f64),
}

/// A validated change to a color. Applying it cannot fail.
///
/// The only way to get one is [`SetColor::resolve`], so every channel value
/// inside has already been range-checked.
///
/// ```compile_fail
/// use input_color::{Channel, Mutation};
///
/// let _ = Mutation::Hsv(Channel::Hue, 1.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mutation(Change);

impl Mutation {
    fn replace(color: ColorValue) -> Self {
        Mutation(Change::Replace(color))
    }

    pub fn apply(self, current: ColorValue) -> ColorValue {
        let (r, g, b) = current.to_rgb();
        match self.0 {
            Change::Replace(color) => color,
            Change::Rgb(RgbChannel::Red, red) => ColorValue::from_rgb(red, g, b),
            Change::Rgb(RgbChannel::Green, green) => ColorValue::from_rgb(r, green, b),
            Change::Rgb(RgbChannel::Blue, blue) => ColorValue::from_rgb(r, g, blue),
            Change::Hsv(channel, component) => {
                let (h, s, v) = current.to_hsv();
                let (h, s, v) = match channel {
                    HsvChannel::Hue => (component, s, v),
                    HsvChannel::Saturation => (h, component, v),
                    HsvChannel::Value => (h, s, component),
                };
                let (r, g, b) = crate::math::hsv_to_rgb(h, s, v);
                ColorValue::from_rgb(r, g, b)
            }
        }
    }
}
