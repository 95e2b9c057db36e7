use serde::{Deserialize, Serialize};

/// Interpolation style for projection chart lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineType {
    Monotone,
    Linear,
    Step,
}

/// Chart display preferences, persisted client-side. Non-critical: a
/// missing or corrupt settings file just means defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChartSettings {
    /// Hex color of the revenue series
    pub revenue_color: String,

    /// Hex color of the profit series
    pub profit_color: String,

    pub line_type: LineType,

    pub show_grid: bool,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            revenue_color: "#4f46e5".to_string(),
            profit_color: "#10b981".to_string(),
            line_type: LineType::Monotone,
            show_grid: true,
        }
    }
}
