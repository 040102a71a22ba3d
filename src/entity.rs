//! InputColor — one named, persisted color helper.

use floem_reactive::RwSignal;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::color::ColorValue;
use crate::command::SetColor;
use crate::config::{ConfigError, EntityConfig, InitialColor};
use crate::constants::DOMAIN;
use crate::error::{Channel, ColorError};
use crate::store::ColorStore;

/// Everything a helper reports next to its state.
///
/// `hsv_color`, `hue`, `saturation` and `value` are on the 0.0–1.0 scale,
/// whatever scale `initial` was written in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAttributes {
    pub initial: InitialColor,
    pub editable: bool,
    pub hex_color: String,
    pub hex_color_without_hash: String,
    pub rgb_color: (u8, u8, u8),
    pub hsv_color: (f64, f64, f64),
    pub red: u8,
    pub green: u8,
    pub blue: u8,
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub friendly_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// The published form of a helper: state plus attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityState {
    pub entity_id: String,
    pub state: String,
    pub attributes: StateAttributes,
}

/// `input_color.<id>`, or `input_color.unknown` for an empty id.
pub(crate) fn entity_id_for(id: &str) -> String {
    let id = if id.is_empty() { "unknown" } else { id };
    format!("{DOMAIN}.{id}")
}

/// A color helper backed by a [`ColorStore`].
///
/// Mutations take `&mut self`, so requests against one helper are applied
/// one at a time. A failed request leaves the store untouched.
pub struct InputColor<S = RwSignal<ColorValue>> {
    config: EntityConfig,
    editable: bool,
    has_value: bool,
    store: S,
}

impl<S: ColorStore> InputColor<S> {
    fn new(config: EntityConfig, store: S, editable: bool) -> Self {
        Self {
            config,
            editable,
            has_value: false,
            store,
        }
    }

    /// A helper from static configuration. Not editable through storage.
    pub fn from_yaml(config: EntityConfig, store: S) -> Self {
        Self::new(config, store, false)
    }

    /// A helper from user-managed storage. Editable.
    pub fn from_storage(config: EntityConfig, store: S) -> Self {
        Self::new(config, store, true)
    }

    pub fn entity_id(&self) -> String {
        entity_id_for(&self.config.id)
    }

    pub fn unique_id(&self) -> &str {
        &self.config.id
    }

    pub fn name(&self) -> Option<&str> {
        self.config.name.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.config.icon.as_deref()
    }

    pub fn editable(&self) -> bool {
        self.editable
    }

    pub fn config(&self) -> &EntityConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn color(&self) -> ColorValue {
        self.store.read()
    }

    /// The state string: uppercase `#RRGGBB`.
    pub fn state(&self) -> String {
        self.color().to_hex()
    }

    pub fn attributes(&self) -> StateAttributes {
        let color = self.color();
        let (h, s, v) = color.to_hsv();
        StateAttributes {
            initial: self.config.initial.clone(),
            editable: self.editable,
            hex_color: color.to_hex(),
            hex_color_without_hash: color.hex_without_hash(),
            rgb_color: color.to_rgb(),
            hsv_color: (h, s, v),
            red: color.red(),
            green: color.green(),
            blue: color.blue(),
            hue: h,
            saturation: s,
            value: v,
            friendly_name: self.config.name.clone(),
            icon: self.config.icon.clone(),
        }
    }

    pub fn snapshot(&self) -> EntityState {
        EntityState {
            entity_id: self.entity_id(),
            state: self.state(),
            attributes: self.attributes(),
        }
    }

    fn configured_initial(&self) -> ColorValue {
        self.config.initial.resolve().unwrap_or_else(|err| {
            warn!(entity_id = %self.entity_id(), %err, "invalid initial color, using default");
            ColorValue::default()
        })
    }

    fn commit(&mut self, color: ColorValue) {
        self.store.write(color);
        self.has_value = true;
    }

    /// Bring the helper up after a (re)start.
    ///
    /// If the helper has no value yet, `last_state` is used when it is a valid
    /// `#RRGGBB` string, otherwise the configured initial color. Either way the
    /// current value is written to the store.
    pub fn attach(&mut self, last_state: Option<&str>) -> ColorValue {
        let color = if self.has_value {
            self.color()
        } else {
            match last_state.map(ColorValue::from_hex) {
                Some(Ok(restored)) => {
                    debug!(entity_id = %self.entity_id(), state = %restored, "restored color");
                    restored
                }
                Some(Err(err)) => {
                    warn!(entity_id = %self.entity_id(), %err, "discarding last state");
                    self.configured_initial()
                }
                None => self.configured_initial(),
            }
        };
        self.commit(color);
        color
    }

    /// Replace the configuration.
    ///
    /// The current color is kept and rewritten so observers pick up the new
    /// attributes. A helper without a value stays without one.
    ///
    /// # Errors
    ///
    /// The new config fails validation; the old one stays in place.
    pub fn update_config(&mut self, config: EntityConfig) -> Result<(), ConfigError> {
        config.validate()?;
        self.config = config;
        if self.has_value {
            let color = self.color();
            self.commit(color);
        }
        Ok(())
    }

    /// Apply a `set_color` request.
    ///
    /// # Errors
    ///
    /// The [`ColorError`] that rejected the request. It is also logged.
    pub fn set_color(&mut self, command: &SetColor) -> Result<ColorValue, ColorError> {
        match command.apply_to(self.color()) {
            Ok(color) => {
                self.commit(color);
                debug!(entity_id = %self.entity_id(), state = %color, "color set");
                Ok(color)
            }
            Err(err) => {
                error!(entity_id = %self.entity_id(), %err, "rejected color change");
                Err(err)
            }
        }
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_hex(&mut self, hex: &str) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::hex(hex))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_rgb(&mut self, red: i64, green: i64, blue: i64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::rgb(red, green, blue))
    }

    /// Set from HSV on the 0.0–1.0 scale.
    ///
    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_hsv(&mut self, h: f64, s: f64, v: f64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::hsv(h, s, v))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_red(&mut self, red: i64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Red, red))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_green(&mut self, green: i64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Green, green))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_blue(&mut self, blue: i64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Blue, blue))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_hue(&mut self, hue: f64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Hue, hue))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_saturation(&mut self, saturation: f64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Saturation, saturation))
    }

    /// # Errors
    ///
    /// See [`InputColor::set_color`].
    pub fn set_value(&mut self, value: f64) -> Result<ColorValue, ColorError> {
        self.set_color(&SetColor::channel(Channel::Value, value))
    }
}
