use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Comparison direction for a metric alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertCondition {
    /// Triggers when the metric value is strictly greater than the threshold
    Gt,
    /// Triggers when the metric value is strictly less than the threshold
    Lt,
}

impl std::fmt::Display for AlertCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlertCondition::Gt => write!(f, ">"),
            AlertCondition::Lt => write!(f, "<"),
        }
    }
}

/// A one-shot alert on a named analysis metric (e.g., "P/E" > 20).
///
/// Alerts fire at most once: a triggered alert is removed from the active
/// set immediately, so a later evaluation of the same metric cannot
/// re-trigger it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,

    /// Label of the metric this alert watches, matched exactly.
    pub metric_label: String,

    pub condition: AlertCondition,

    pub threshold: f64,
}

impl Alert {
    pub fn new(metric_label: impl Into<String>, condition: AlertCondition, threshold: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            metric_label: metric_label.into(),
            condition,
            threshold,
        }
    }
}

/// An alert that fired, together with the display value that satisfied it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub alert: Alert,

    /// The metric's display string at the moment of triggering (e.g. "25.3x")
    pub observed_value: String,
}
