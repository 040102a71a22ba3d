//! Names and defaults shared by the helper, its config and its services.

/// Entity domain; entity ids are `input_color.<slug>`.
pub const DOMAIN: &str = "input_color";

/// Color used when no initial value is configured.
pub const DEFAULT_COLOR: &str = "#FFFFFF";

/// Service that mutates one helper.
pub const SERVICE_SET_COLOR: &str = "set_color";

/// Service that re-reads static configuration.
pub const SERVICE_RELOAD: &str = "reload";

/// Attribute names
pub const ATTR_INITIAL: &str = "initial";
pub const ATTR_EDITABLE: &str = "editable";
pub const ATTR_HEX_COLOR: &str = "hex_color";
pub const ATTR_HEX_COLOR_WITHOUT_HASH: &str = "hex_color_without_hash";
pub const ATTR_RGB_COLOR: &str = "rgb_color";
pub const ATTR_HSV_COLOR: &str = "hsv_color";
