use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::quote::{ChangeDirection, Recommendation};

/// One named indicator from an AI analysis.
///
/// `value` is a formatted display string ("2.5T USD", "25.3x") and is NOT
/// guaranteed to parse as a number — the alert evaluator copes with that.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metric {
    pub label: String,

    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_type: Option<ChangeDirection>,

    /// Explanation of the metric, for hover help
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tooltip: Option<String>,
}

/// Revenue/profit projection for one future year, in millions of the
/// requested currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub year: String,
    pub revenue: f64,
    pub profit: f64,
}

/// A full AI-generated company analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisData {
    pub company_name: String,

    pub ticker: String,

    pub summary: String,

    pub key_metrics: Vec<Metric>,

    pub projections: Vec<Projection>,

    pub strengths: Vec<String>,

    pub weaknesses: Vec<String>,

    pub recommendation: Recommendation,

    /// 0–100
    pub confidence_score: u8,
}

/// A news article reference returned alongside an analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    pub uri: String,
}

/// The complete payload of one analysis request: the main company, an
/// optional comparison company, and related news.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisBundle {
    pub main: AnalysisData,

    #[serde(default)]
    pub comparison: Option<AnalysisData>,

    pub news: Vec<NewsArticle>,
}

/// A saved analysis in the account's history panel.
///
/// History is capped at 20 items, newest first; recording a 21st drops
/// the oldest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryItem {
    pub id: Uuid,

    pub timestamp: DateTime<Utc>,

    /// The identifier the user analysed (ticker or company name)
    pub company_identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison_identifier: Option<String>,

    /// Currency the analysis was requested in
    pub currency: String,

    pub analysis: AnalysisBundle,
}

impl HistoryItem {
    pub fn new(
        company_identifier: impl Into<String>,
        comparison_identifier: Option<String>,
        currency: impl Into<String>,
        analysis: AnalysisBundle,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            company_identifier: company_identifier.into(),
            comparison_identifier,
            currency: currency.into(),
            analysis,
        }
    }
}
