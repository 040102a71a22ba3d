//! The set of live color helpers and the services that act on them.

use std::collections::BTreeMap;

use floem_reactive::RwSignal;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::color::ColorValue;
use crate::command::SetColor;
use crate::config::{EntityConfig, InputColorsConfig};
use crate::constants::{SERVICE_RELOAD, SERVICE_SET_COLOR};
use crate::entity::{InputColor, entity_id_for};
use crate::error::ColorError;

#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("unknown color helper {0}")]
    UnknownEntity(String),

    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Live helpers keyed by entity id.
///
/// Every helper gets its own signal, so observers can subscribe to one helper
/// via [`InputColor::store`].
#[derive(Default)]
pub struct InputColors {
    entities: BTreeMap<String, InputColor>,
}

impl InputColors {
    pub fn new() -> Self {
        Self::default()
    }

    /// One attached, non-editable helper per configured slug.
    pub fn from_config(config: &InputColorsConfig) -> Self {
        let mut helpers = Self::new();
        for entity_config in config.entities() {
            helpers.add(Self::static_helper(entity_config));
        }
        helpers
    }

    fn static_helper(config: EntityConfig) -> InputColor {
        let mut helper = InputColor::from_yaml(config, RwSignal::new(ColorValue::default()));
        helper.attach(None);
        helper
    }

    /// Register `helper`. Returns false, leaving the registered helper in
    /// place, if its entity id is taken.
    pub fn add(&mut self, helper: InputColor) -> bool {
        let entity_id = helper.entity_id();
        if self.entities.contains_key(&entity_id) {
            warn!(%entity_id, "duplicate color helper id, skipping");
            return false;
        }
        debug!(%entity_id, editable = helper.editable(), "added color helper");
        self.entities.insert(entity_id, helper);
        true
    }

    pub fn get(&self, entity_id: &str) -> Option<&InputColor> {
        self.entities.get(entity_id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn entity_ids(&self) -> impl Iterator<Item = &str> {
        self.entities.keys().map(String::as_str)
    }

    /// The `set_color` service.
    ///
    /// # Errors
    ///
    /// [`CollectionError::UnknownEntity`] or the helper's [`ColorError`].
    pub fn set_color(
        &mut self,
        entity_id: &str,
        command: &SetColor,
    ) -> Result<ColorValue, CollectionError> {
        let Some(helper) = self.entities.get_mut(entity_id) else {
            error!(service = SERVICE_SET_COLOR, %entity_id, "unknown color helper");
            return Err(CollectionError::UnknownEntity(entity_id.to_string()));
        };
        Ok(helper.set_color(command)?)
    }

    /// The `reload` service.
    ///
    /// Static helpers missing from `config` are removed, surviving ones keep
    /// their color and take the new config, new ones are attached with their
    /// initial color. Storage-backed helpers are left alone.
    pub fn reload(&mut self, config: &InputColorsConfig) {
        let incoming: BTreeMap<String, EntityConfig> = config
            .entities()
            .into_iter()
            .map(|entity_config| (entity_id_for(&entity_config.id), entity_config))
            .collect();

        self.entities
            .retain(|entity_id, helper| helper.editable() || incoming.contains_key(entity_id));

        let (mut updated, mut added) = (0, 0);
        for (entity_id, entity_config) in incoming {
            match self.entities.get_mut(&entity_id) {
                Some(helper) if helper.editable() => {
                    warn!(%entity_id, "static config shadows a stored color helper, skipping");
                }
                Some(helper) => match helper.update_config(entity_config) {
                    Ok(()) => updated += 1,
                    Err(err) => error!(%entity_id, %err, "keeping previous config"),
                },
                None => {
                    if self.add(Self::static_helper(entity_config)) {
                        added += 1;
                    }
                }
            }
        }
        info!(service = SERVICE_RELOAD, updated, added, total = self.len(), "reloaded color helpers");
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::config::InitialColor;

    fn config(toml: &str) -> InputColorsConfig {
        InputColorsConfig::from_toml_str(toml, "inline").unwrap()
    }

    #[test]
    fn builds_one_helper_per_slug() {
        let helpers = InputColors::from_config(&config(
            "[input_color.desk]\ninitial = \"#FF0000\"\n[input_color.porch]\n",
        ));
        assert_eq!(
            helpers.entity_ids().collect::<Vec<_>>(),
            vec!["input_color.desk", "input_color.porch"]
        );
        assert_eq!(helpers.get("input_color.desk").unwrap().state(), "#FF0000");
        assert_eq!(helpers.get("input_color.porch").unwrap().state(), "#FFFFFF");
    }

    #[test]
    fn duplicate_ids_keep_first() {
        let mut helpers = InputColors::new();
        let stored = EntityConfig::new("desk").with_initial(InitialColor::Hex("#000000".into()));
        let mut helper = InputColor::from_storage(stored, RwSignal::new(ColorValue::default()));
        helper.attach(None);
        assert!(helpers.add(helper));

        let duplicate = InputColors::static_helper(EntityConfig::new("desk"));
        assert!(!helpers.add(duplicate));
        assert_eq!(helpers.len(), 1);
        let desk = helpers.get("input_color.desk").unwrap();
        assert!(desk.editable());
        assert_eq!(desk.state(), "#000000");
    }

    #[test]
    fn set_color_dispatches_by_entity_id() {
        let mut helpers = InputColors::from_config(&config("[input_color.desk]\n"));
        let color = helpers
            .set_color("input_color.desk", &SetColor::hex("00ff00"))
            .unwrap();
        assert_eq!(color.to_hex(), "#00FF00");
        assert_eq!(helpers.get("input_color.desk").unwrap().state(), "#00FF00");
    }

    #[test]
    fn set_color_reports_failures() {
        let mut helpers = InputColors::from_config(&config("[input_color.desk]\n"));
        assert!(matches!(
            helpers.set_color("input_color.lamp", &SetColor::hex("#000000")),
            Err(CollectionError::UnknownEntity(id)) if id == "input_color.lamp"
        ));
        assert!(matches!(
            helpers.set_color("input_color.desk", &SetColor::default()),
            Err(CollectionError::Color(ColorError::NoInputProvided))
        ));
        assert_eq!(helpers.get("input_color.desk").unwrap().state(), "#FFFFFF");
    }

    #[test]
    fn reload_adds_updates_and_removes() {
        let mut helpers = InputColors::from_config(&config(
            "[input_color.desk]\n[input_color.porch]\n",
        ));
        let mut stored = InputColor::from_storage(
            EntityConfig::new("studio"),
            RwSignal::new(ColorValue::default()),
        );
        stored.attach(Some("#ABCDEF"));
        helpers.add(stored);
        helpers
            .set_color("input_color.desk", &SetColor::hex("#123456"))
            .unwrap();

        helpers.reload(&config(
            "[input_color.desk]\nname = \"Desk\"\n[input_color.hall]\ninitial = \"#00FF00\"\n",
        ));

        assert_eq!(
            helpers.entity_ids().collect::<Vec<_>>(),
            vec!["input_color.desk", "input_color.hall", "input_color.studio"]
        );
        let desk = helpers.get("input_color.desk").unwrap();
        assert_eq!(desk.name(), Some("Desk"));
        assert_eq!(desk.state(), "#123456");
        assert_eq!(helpers.get("input_color.hall").unwrap().state(), "#00FF00");
        assert_eq!(helpers.get("input_color.studio").unwrap().state(), "#ABCDEF");
    }

    #[test]
    fn reload_does_not_replace_stored_helper() {
        let mut helpers = InputColors::new();
        let mut stored =
            InputColor::from_storage(EntityConfig::new("desk"), RwSignal::new(ColorValue::default()));
        stored.attach(Some("#111111"));
        helpers.add(stored);

        helpers.reload(&config("[input_color.desk]\ninitial = \"#FF0000\"\n"));

        let desk = helpers.get("input_color.desk").unwrap();
        assert!(desk.editable());
        assert_eq!(desk.state(), "#111111");
    }
}
