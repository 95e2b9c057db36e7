use crate::models::alert::{Alert, AlertCondition, TriggeredAlert};
use crate::models::analysis::Metric;

/// Evaluates one-shot metric alerts against a fresh set of analysis
/// metrics.
///
/// Pure — the evaluator only decides which alerts fired. The session
/// controller consumes the result by removing each triggered alert from
/// the store, which is what makes the at-most-once semantics hold.
pub struct AlertService;

impl AlertService {
    pub fn new() -> Self {
        Self
    }

    /// Return every alert satisfied by a matching metric.
    ///
    /// Metric values are display strings ("2.5T USD", "25.3x"); the
    /// numeric part is extracted before comparing. Metrics whose value has
    /// no parseable number are skipped silently — formatting is not
    /// guaranteed, and an unreadable metric must never take the evaluation
    /// down.
    #[must_use]
    pub fn evaluate(&self, alerts: &[Alert], metrics: &[Metric]) -> Vec<TriggeredAlert> {
        let mut triggered = Vec::new();

        for metric in metrics {
            let Some(value) = Self::parse_metric_value(&metric.value) else {
                continue;
            };

            for alert in alerts {
                if alert.metric_label != metric.label {
                    continue;
                }
                let fired = match alert.condition {
                    AlertCondition::Gt => value > alert.threshold,
                    AlertCondition::Lt => value < alert.threshold,
                };
                if fired {
                    triggered.push(TriggeredAlert {
                        alert: alert.clone(),
                        observed_value: metric.value.clone(),
                    });
                }
            }
        }

        triggered
    }

    /// Extract a number from a formatted display value by dropping every
    /// character except digits, '.', and '-'. Returns `None` when nothing
    /// numeric remains.
    fn parse_metric_value(display: &str) -> Option<f64> {
        let numeric: String = display
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
            .collect();
        numeric.parse().ok()
    }
}

impl Default for AlertService {
    fn default() -> Self {
        Self::new()
    }
}
