use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::errors::CoreError;
use crate::models::analysis::AnalysisBundle;
use crate::models::quote::{MarketIndex, PricePoint, Quote};

/// A finite, non-restartable sequence of generated text chunks.
pub type TextStream = BoxStream<'static, Result<String, CoreError>>;

/// What kind of long-form text to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextRequest {
    /// Investment-strategy mentoring for a free-form user prompt.
    Strategy(String),
    /// An educational article on a financial topic.
    Education(String),
}

/// Trait abstraction over the external market-data/analysis service.
///
/// The concrete backend is a generative-AI service producing simulated
/// market data; swapping it out (or mocking it in tests) touches only the
/// implementation, never the callers. All operations may fail with
/// rate-limit or generic API errors — callers surface those, they don't
/// crash.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Current quote for one ticker.
    async fn get_quote(&self, ticker: &str) -> Result<Quote, CoreError>;

    /// Daily closing prices for the recent past, ordered oldest first.
    async fn get_history(&self, ticker: &str) -> Result<Vec<PricePoint>, CoreError>;

    /// Quotes matching a free-text search query.
    async fn search_symbols(&self, query: &str) -> Result<Vec<Quote>, CoreError>;

    /// Snapshot of the major market indices for the dashboard strip.
    async fn market_overview(&self) -> Result<Vec<MarketIndex>, CoreError>;

    /// Full company analysis (plus optional comparison company) in the
    /// given currency, with related news.
    async fn get_analysis(
        &self,
        identifier: &str,
        comparison: Option<&str>,
        currency: &str,
    ) -> Result<AnalysisBundle, CoreError>;

    /// Stream generated text for the strategy/education views. The stream
    /// is finite and cannot be restarted; abandoning it mid-way is fine.
    async fn stream_text(&self, request: TextRequest) -> Result<TextStream, CoreError>;
}
