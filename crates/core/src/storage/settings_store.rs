use log::warn;

use crate::errors::CoreError;
use crate::models::settings::ChartSettings;

/// Loads and saves chart display preferences as plain JSON.
///
/// The preferences are non-critical, so loading is total: a missing or
/// corrupt settings file just yields the hard-coded defaults. Browser
/// frontends that own their own storage use the string-level
/// `from_json`/`to_json` pair; native hosts use the file operations.
pub struct SettingsStore;

impl SettingsStore {
    /// Parse settings from a JSON string, falling back to defaults when
    /// the payload doesn't parse.
    #[must_use]
    pub fn from_json(json: &str) -> ChartSettings {
        match serde_json::from_str(json) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("stored chart settings unreadable, using defaults: {e}");
                ChartSettings::default()
            }
        }
    }

    /// Serialize settings to pretty JSON.
    pub fn to_json(settings: &ChartSettings) -> Result<String, CoreError> {
        serde_json::to_string_pretty(settings).map_err(|e| {
            CoreError::Serialization(format!("Failed to serialize chart settings: {e}"))
        })
    }

    /// Load settings from a file on disk (native only). An absent or
    /// unreadable file yields the defaults.
    #[cfg(not(target_arch = "wasm32"))]
    #[must_use]
    pub fn load(path: &str) -> ChartSettings {
        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!("chart settings file {path} unreadable, using defaults: {e}");
                }
                ChartSettings::default()
            }
        }
    }

    /// Save settings to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(path: &str, settings: &ChartSettings) -> Result<(), CoreError> {
        let json = Self::to_json(settings)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
