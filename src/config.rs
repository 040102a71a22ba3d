//! Configuration for color helpers.
//!
//! A config file holds an `input_color` table keyed by slug:
//!
//! ```toml
//! [input_color.living_room]
//! name = "Living room"
//! icon = "mdi:palette"
//! initial = "#FF8800"
//!
//! [input_color.desk]
//! initial = { h = 120, s = 100, v = 100 }
//! ```
//!
//! **Scale warning:** an HSV `initial` uses degrees (0–360) for hue and
//! percent (0–100) for saturation and value. The `set_color` command uses
//! 0.0–1.0 for all three. Both scales are part of the external format.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::color::{ColorValue, rgb_channel};
use crate::constants::DEFAULT_COLOR;
use crate::error::{Channel, ColorError};
use crate::inputs::ChannelInput;

static SLUG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(_[a-z0-9]+)*$").unwrap());

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read color config from {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid color config {origin}: {message}")]
    Parse { origin: String, message: String },

    #[error("invalid slug {0:?}, expected lowercase letters, digits and single underscores")]
    InvalidSlug(String),

    #[error("invalid icon {icon:?} for {id}, expected \"prefix:name\"")]
    InvalidIcon { id: String, icon: String },

    #[error("invalid initial color for {id}: {source}")]
    InvalidInitial {
        id: String,
        #[source]
        source: ColorError,
    },
}

/// RGB `initial`, every channel 0–255.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RgbConfig {
    pub red: ChannelInput,
    pub green: ChannelInput,
    pub blue: ChannelInput,
}

/// HSV `initial` on the degree/percent scale: `h` 0–360, `s` and `v` 0–100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HsvConfig {
    pub h: ChannelInput,
    pub s: ChannelInput,
    pub v: ChannelInput,
}

/// Any subset of channels. RGB channels are 0–255, `hue` is 0–360,
/// `saturation` and `value` are 0–100.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ComponentConfig {
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

/// The configured starting color, in any of four shapes. Shapes are tried in
/// declaration order, so `{red, green}` falls through to `Components`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialColor {
    /// `#RRGGBB`.
    Hex(String),
    Rgb(RgbConfig),
    /// Degrees and percent, not 0.0–1.0.
    Hsv(HsvConfig),
    Components(ComponentConfig),
}

impl Default for InitialColor {
    fn default() -> Self {
        InitialColor::Hex(DEFAULT_COLOR.to_string())
    }
}

/// Coerce `input` and map it from `0..=max` onto 0.0–1.0.
fn scaled_channel(channel: Channel, input: &ChannelInput, max: f64) -> Result<f64, ColorError> {
    let value = input.to_float()?;
    if (0.0..=max).contains(&value) {
        Ok(value / max)
    } else {
        Err(ColorError::out_of_range(channel, value, 0.0, max))
    }
}

impl InitialColor {
    /// Resolve to a color value.
    ///
    /// `Components` start from white. RGB channels are replaced first; if any
    /// HSV channel is given, the result is then converted to HSV, those
    /// channels replaced, and converted back.
    ///
    /// # Errors
    ///
    /// Any [`ColorError`] raised by a malformed or out-of-range component.
    pub fn resolve(&self) -> Result<ColorValue, ColorError> {
        match self {
            InitialColor::Hex(hex) => ColorValue::from_hex(hex),
            InitialColor::Rgb(rgb) => {
                ColorValue::try_from_rgb(rgb.red.to_int()?, rgb.green.to_int()?, rgb.blue.to_int()?)
            }
            InitialColor::Hsv(hsv) => ColorValue::from_hsv(
                scaled_channel(Channel::Hue, &hsv.h, 360.0)?,
                scaled_channel(Channel::Saturation, &hsv.s, 100.0)?,
                scaled_channel(Channel::Value, &hsv.v, 100.0)?,
            ),
            InitialColor::Components(components) => components.resolve(),
        }
    }
}

impl ComponentConfig {
    fn resolve(&self) -> Result<ColorValue, ColorError> {
        let rgb = |channel: Channel, input: &Option<ChannelInput>| {
            input
                .as_ref()
                .map(|input| rgb_channel(channel, input.to_int()?))
                .transpose()
        };
        let hsv = |channel: Channel, input: &Option<ChannelInput>, max: f64| {
            input
                .as_ref()
                .map(|input| scaled_channel(channel, input, max))
                .transpose()
        };
        let red = rgb(Channel::Red, &self.red)?;
        let green = rgb(Channel::Green, &self.green)?;
        let blue = rgb(Channel::Blue, &self.blue)?;
        let hue = hsv(Channel::Hue, &self.hue, 360.0)?;
        let saturation = hsv(Channel::Saturation, &self.saturation, 100.0)?;
        let value = hsv(Channel::Value, &self.value, 100.0)?;

        let white = ColorValue::WHITE;
        let color = ColorValue::from_rgb(
            red.unwrap_or(white.red()),
            green.unwrap_or(white.green()),
            blue.unwrap_or(white.blue()),
        );
        if hue.is_none() && saturation.is_none() && value.is_none() {
            return Ok(color);
        }
        let (h, s, v) = color.to_hsv();
        ColorValue::from_hsv(
            hue.unwrap_or(h),
            saturation.unwrap_or(s),
            value.unwrap_or(v),
        )
    }
}

/// Configuration of a single color helper.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EntityConfig {
    /// Filled in from the table key when loaded from a file.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub initial: InitialColor,
}

impl EntityConfig {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_initial(mut self, initial: InitialColor) -> Self {
        self.initial = initial;
        self
    }

    /// Check the id, icon and initial color.
    ///
    /// # Errors
    ///
    /// The first problem found, as a [`ConfigError`].
    pub fn validate(&self) -> Result<ColorValue, ConfigError> {
        if !SLUG_PATTERN.is_match(&self.id) {
            return Err(ConfigError::InvalidSlug(self.id.clone()));
        }
        if let Some(icon) = &self.icon
            && !is_valid_icon(icon)
        {
            return Err(ConfigError::InvalidIcon {
                id: self.id.clone(),
                icon: icon.clone(),
            });
        }
        self.initial
            .resolve()
            .map_err(|source| ConfigError::InvalidInitial {
                id: self.id.clone(),
                source,
            })
    }
}

fn is_valid_icon(icon: &str) -> bool {
    matches!(icon.split_once(':'), Some((prefix, name)) if !prefix.is_empty() && !name.is_empty())
}

/// The `input_color` section of a config file.
///
/// Other top-level sections are ignored so the helpers can share a file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputColorsConfig {
    #[serde(default)]
    pub input_color: BTreeMap<String, Option<EntityConfig>>,
}

impl InputColorsConfig {
    /// Load from a file, choosing the parser from its extension.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Read`] if the file cannot be read, otherwise any parse or
    /// validation error.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let origin = path.display().to_string();

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json_str(&contents, &origin)?,
            Some("toml") | Some("tml") => Self::from_toml_str(&contents, &origin)?,
            _ => Self::parse_from_str(&contents, &origin)?,
        };
        debug!(path = %origin, helpers = config.input_color.len(), "loaded color config");
        Ok(config)
    }

    /// Try TOML first, then JSON.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] carrying both parser messages, or a validation
    /// error.
    pub fn parse_from_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        let parsed = toml::from_str::<Self>(contents).or_else(|toml_err| {
            serde_json::from_str::<Self>(contents).map_err(|json_err| ConfigError::Parse {
                origin: origin.to_string(),
                message: format!("toml error: {toml_err}; json error: {json_err}"),
            })
        })?;
        parsed.validated()
    }

    /// # Errors
    ///
    /// [`ConfigError::Parse`] or a validation error.
    pub fn from_toml_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str::<Self>(contents)
            .map_err(|err| ConfigError::Parse {
                origin: origin.to_string(),
                message: err.to_string(),
            })?
            .validated()
    }

    /// # Errors
    ///
    /// [`ConfigError::Parse`] or a validation error.
    pub fn from_json_str(contents: &str, origin: &str) -> Result<Self, ConfigError> {
        serde_json::from_str::<Self>(contents)
            .map_err(|err| ConfigError::Parse {
                origin: origin.to_string(),
                message: err.to_string(),
            })?
            .validated()
    }

    /// Copy each table key into its entry's `id` and validate every entry.
    fn validated(mut self) -> Result<Self, ConfigError> {
        for (slug, entry) in &mut self.input_color {
            let entry = entry.get_or_insert_with(EntityConfig::default);
            entry.id = slug.clone();
            entry.validate()?;
        }
        Ok(self)
    }

    /// Entity configs in slug order, ids filled in.
    pub fn entities(&self) -> Vec<EntityConfig> {
        self.input_color
            .iter()
            .map(|(slug, entry)| {
                let mut entry = entry.clone().unwrap_or_default();
                entry.id = slug.clone();
                entry
            })
            .collect()
    }
}
