use shared::BehaviorConfig;

use crate::services::logging::Logger;

/// Element holding optional JSON overrides for `BehaviorConfig`
pub const CONFIG_ELEMENT_ID: &str = "ledger-web-config";

/// Read the page's config block. A missing block means defaults; a broken one
/// is reported and also falls back to defaults.
pub fn load() -> BehaviorConfig {
    let text = gloo::utils::document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
        .filter(|text| !text.trim().is_empty());

    let Some(text) = text else {
        return BehaviorConfig::default();
    };

    match BehaviorConfig::from_json(&text) {
        Ok(config) => config,
        Err(err) => {
            Logger::warn_with_component("config", &format!("{}; using defaults", err));
            BehaviorConfig::default()
        }
    }
}
