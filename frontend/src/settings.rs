use serde::Deserialize;

const STORAGE_KEY: &str = "settings";

/// Page-wide configuration. Stored as JSON under `localStorage["settings"]`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Prefix for every endpoint. Empty means same origin.
    pub api_base_url: String,
    pub currency_symbol: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            api_base_url: String::new(),
            currency_symbol: "$".to_string(),
        }
    }
}

impl Settings {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url.trim_end_matches('/'), path)
    }

    pub fn money(&self, figure: impl std::fmt::Display) -> String {
        format!("{}{}", self.currency_symbol, figure)
    }
}

pub fn parse_settings(raw: &str) -> Settings {
    match serde_json::from_str::<Settings>(raw) {
        Ok(settings) => settings,
        Err(err) => {
            log::warn!("ignoring malformed settings: {}", err);
            Settings::default()
        }
    }
}

pub fn load_settings() -> Settings {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            if let Ok(Some(raw)) = storage.get_item(STORAGE_KEY) {
                return parse_settings(&raw);
            }
        }
    }
    Settings::default()
}
