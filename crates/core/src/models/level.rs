use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A named progression tier. A portfolio worth at least `threshold` has
/// reached this level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,

    /// Minimum total portfolio value for this tier (inclusive).
    pub threshold: f64,
}

/// An upward tier transition, detected between two valuations. Drives a
/// one-time user-facing notification; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionEvent {
    pub from: Level,
    pub to: Level,
}

/// Ordered tier table, thresholds strictly ascending.
///
/// The thresholds are configuration, not business law: `Default` carries
/// the stock table, but any validated ascending list works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<Level>,
}

impl LevelTable {
    /// Build a table from an ascending tier list.
    ///
    /// Fails on an empty list or on thresholds that are not strictly
    /// increasing.
    pub fn new(levels: Vec<Level>) -> Result<Self, CoreError> {
        if levels.is_empty() {
            return Err(CoreError::Validation(
                "Level table must contain at least one tier".into(),
            ));
        }
        for pair in levels.windows(2) {
            if pair[1].threshold <= pair[0].threshold {
                return Err(CoreError::Validation(format!(
                    "Level thresholds must be strictly ascending: '{}' ({}) does not exceed '{}' ({})",
                    pair[1].name, pair[1].threshold, pair[0].name, pair[0].threshold
                )));
            }
        }
        Ok(Self { levels })
    }

    /// The tiers, ascending by threshold.
    #[must_use]
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }

    /// The highest tier whose threshold ≤ `value`; the lowest tier when
    /// `value` is below every threshold. Total — never fails.
    #[must_use]
    pub fn classify(&self, value: f64) -> &Level {
        self.levels
            .iter()
            .rev()
            .find(|level| value >= level.threshold)
            .unwrap_or(&self.levels[0])
    }

    /// Detect an upward tier transition between two portfolio values.
    ///
    /// Fires only on a strict increase of the classified tier's threshold;
    /// demotions and same-tier moves return `None`, so repeated
    /// revaluation inside one tier never re-fires.
    #[must_use]
    pub fn detect_promotion(&self, old_value: f64, new_value: f64) -> Option<PromotionEvent> {
        let from = self.classify(old_value);
        let to = self.classify(new_value);
        if to.threshold > from.threshold {
            Some(PromotionEvent {
                from: from.clone(),
                to: to.clone(),
            })
        } else {
            None
        }
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        let tier = |name: &str, threshold: f64| Level {
            name: name.to_string(),
            threshold,
        };
        Self {
            levels: vec![
                tier("Novice", 0.0),
                tier("Apprentice", 110_000.0),
                tier("Trader", 150_000.0),
                tier("Investor", 250_000.0),
                tier("Maestro", 500_000.0),
            ],
        }
    }
}
