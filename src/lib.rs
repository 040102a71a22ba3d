//! # input-color
//!
//! A user-configurable color helper: one persisted color, readable and
//! writable as hex, RGB, HSV or any single channel.
//!
//! The canonical value is 8-bit RGB ([`ColorValue`]). Every other view is
//! derived on read. Writes go through [`SetColor`], which picks exactly one of
//! its nine optional fields and validates it before anything is stored.
//!
//! ## HSV scales
//!
//! Two HSV scales exist and must not be mixed up:
//!
//! - [`SetColor`], [`ColorValue::from_hsv`] and every reported attribute use
//!   0.0–1.0 for hue, saturation and value.
//! - A configured [`InitialColor::Hsv`] (and the `hue`/`saturation`/`value`
//!   of [`InitialColor::Components`]) uses degrees 0–360 for hue and percent
//!   0–100 for saturation and value.
//!
//! ## Usage
//!
//! ```rust
//! use input_color::{ColorValue, SetColor};
//!
//! let red = ColorValue::from_hex("#FF0000").unwrap();
//! let green = SetColor::hex("00ff00").apply_to(red).unwrap();
//! assert_eq!(green.to_hex(), "#00FF00");
//! ```

mod collection;
mod color;
mod command;
mod config;
mod constants;
mod entity;
mod error;
mod inputs;
mod math;
mod store;

pub use collection::{CollectionError, InputColors};
pub use color::ColorValue;
pub use command::{HsvInput, Mutation, RgbInput, SetColor};
pub use config::{
    ComponentConfig, ConfigError, EntityConfig, HsvConfig, InitialColor, InputColorsConfig,
    RgbConfig,
};
pub use constants::{
    ATTR_EDITABLE, ATTR_HEX_COLOR, ATTR_HEX_COLOR_WITHOUT_HASH, ATTR_HSV_COLOR, ATTR_INITIAL,
    ATTR_RGB_COLOR, DEFAULT_COLOR, DOMAIN, SERVICE_RELOAD, SERVICE_SET_COLOR,
};
pub use entity::{EntityState, InputColor, StateAttributes};
pub use error::{Channel, ColorError};
pub use inputs::ChannelInput;
pub use store::ColorStore;

pub use floem_reactive::RwSignal;
