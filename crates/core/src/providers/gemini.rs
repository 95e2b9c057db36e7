use std::collections::VecDeque;

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::Deserialize;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::analysis::{AnalysisBundle, AnalysisData, NewsArticle};
use crate::models::quote::{MarketIndex, PricePoint, Quote};

use super::traits::{MarketDataProvider, TextRequest, TextStream};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model used for quotes, history, overview, and text streams.
const FAST_MODEL: &str = "gemini-2.5-flash";
/// Model used for full analyses and symbol search.
const DEEP_MODEL: &str = "gemini-2.5-pro";

/// Gemini-backed market data and analysis provider.
///
/// The model acts as a market-data simulator: every operation sends a
/// prompt demanding a bare JSON response of a fixed shape, strips any
/// markdown fences the model wraps it in, and validates the payload
/// against the domain types before anything crosses into the rest of the
/// crate. A shape mismatch is a `Parse` error, never a panic.
pub struct GeminiProvider {
    client: Client,
    api_key: String,
}

impl GeminiProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(60));
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            api_key: api_key.into(),
        }
    }

    /// Strip markdown code fences the model sometimes wraps JSON in.
    pub fn clean_json(text: &str) -> &str {
        let trimmed = text.trim();
        let inner = trimmed
            .strip_prefix("```json")
            .or_else(|| trimmed.strip_prefix("```"))
            .and_then(|rest| rest.strip_suffix("```"))
            .unwrap_or(trimmed);
        inner.trim()
    }

    /// Parse a cleaned model response into a typed payload.
    pub fn parse_payload<T: serde::de::DeserializeOwned>(text: &str) -> Result<T, CoreError> {
        serde_json::from_str(Self::clean_json(text)).map_err(|e| CoreError::Parse {
            provider: "Gemini".into(),
            message: e.to_string(),
        })
    }

    /// Run one non-streaming generation and return the raw response text.
    async fn generate(&self, model: &str, prompt: &str) -> Result<String, CoreError> {
        let url = format!(
            "{BASE_URL}/models/{model}:generateContent?key={}",
            self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status.as_u16(), message));
        }

        let parsed: GenerateResponse =
            resp.json().await.map_err(|e| CoreError::Parse {
                provider: "Gemini".into(),
                message: format!("Invalid response envelope: {e}"),
            })?;

        parsed.text().ok_or_else(|| CoreError::Api {
            provider: "Gemini".into(),
            message: "Response contained no text candidates".into(),
        })
    }

    /// Map an HTTP failure to the error taxonomy. Quota exhaustion is
    /// distinguished so the UI can suggest retrying later.
    pub fn api_error(status: u16, message: String) -> CoreError {
        if status == 429 || message.contains("RESOURCE_EXHAUSTED") {
            CoreError::RateLimited
        } else {
            CoreError::Api {
                provider: "Gemini".into(),
                message: format!("HTTP {status}: {message}"),
            }
        }
    }
}

// ── Gemini API response envelope ────────────────────────────────────

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate, if any.
    fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let content = candidate.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// Wire shape of an analysis response: one company plus related news.
#[derive(Deserialize)]
struct AnalysisResponse {
    analysis: AnalysisData,
    news: Vec<NewsArticle>,
}

// ── Prompts ─────────────────────────────────────────────────────────

fn quote_prompt(ticker: &str) -> String {
    format!(
        "Act as a real-time stock data simulator. For the stock with ticker \"{ticker}\", \
         provide realistic but fictional market data grounded in recent public information. \
         Respond with ONLY a valid JSON object, no extra text and no markdown fences, shaped as: \
         {{ \"companyName\": string, \"ticker\": string, \"exchange\": string, \"price\": number, \
         \"change\": number, \"percentChange\": string (signed, e.g. \"+1.25%\"), \
         \"volume\": string (formatted, e.g. \"1.25M\"), \"summary\": string, \
         \"recommendation\": \"Buy\" | \"Hold\" | \"Sell\", \"confidenceScore\": number (0-100) }}."
    )
}

fn history_prompt(ticker: &str) -> String {
    format!(
        "Act as a historical stock data simulator. For ticker \"{ticker}\", generate daily \
         closing prices for the last 30 days, today included. Respond with ONLY a valid JSON \
         array ordered oldest to newest, each element shaped as \
         {{ \"date\": \"YYYY-MM-DD\", \"price\": number }}. Prices must show realistic \
         volatility and a credible trend."
    )
}

fn search_prompt(query: &str) -> String {
    format!(
        "Act as a stock screening API. For the query \"{query}\", provide a list of relevant \
         stocks as ONLY a valid JSON array, no extra text and no markdown fences. Each element: \
         {{ \"companyName\": string, \"ticker\": string, \"exchange\": string, \"price\": number, \
         \"change\": number, \"percentChange\": string, \"volume\": string, \"summary\": string, \
         \"recommendation\": \"Buy\" | \"Hold\" | \"Sell\", \"confidenceScore\": number (0-100), \
         \"marketCap\": string (e.g. \"2.5T\"), \"country\": string }}. \
         Include a good variety, with African listings when the query is generic."
    )
}

fn overview_prompt() -> String {
    "Provide a snapshot of the major world indices (S&P 500, NASDAQ, CAC 40) and African \
     indices (BRVM Composite, JSE All Share, NSE All Share). Respond with ONLY a valid JSON \
     array, each element shaped as { \"name\": string, \"value\": string, \"change\": string, \
     \"percentChange\": string, \"changeType\": \"positive\" | \"negative\" | \"neutral\" }."
        .to_string()
}

fn analysis_prompt(identifier: &str, currency: &str) -> String {
    format!(
        "As an expert financial analyst, produce a deep analysis of the company identified by \
         \"{identifier}\". Respond with ONLY a single valid JSON object, no extra text and no \
         markdown fences, with two top-level keys: \"analysis\" and \"news\". \
         \"analysis\" must be shaped as: {{ \"companyName\": string, \"ticker\": string, \
         \"summary\": string, \"keyMetrics\": [{{ \"label\": string, \"value\": string, \
         \"change\": string?, \"changeType\": \"positive\" | \"negative\" | \"neutral\"?, \
         \"tooltip\": string? }}], \"projections\": [exactly 3 objects {{ \"year\": string, \
         \"revenue\": number, \"profit\": number }} for the next 3 years, in millions of \
         {currency}], \"strengths\": [3-5 strings], \"weaknesses\": [3-5 strings], \
         \"recommendation\": \"Buy\" | \"Hold\" | \"Sell\", \"confidenceScore\": number (0-100) }}. \
         \"news\" must be an array of 3-5 recent relevant articles shaped as \
         {{ \"title\": string, \"uri\": string }}. Ground the analysis in the most recent public \
         data; be realistic and credible. Express all monetary figures in {currency}."
    )
}

fn stream_prompt(request: &TextRequest) -> String {
    match request {
        TextRequest::Strategy(prompt) => format!(
            "Act as an expert financial advisor and mentor. Generate a detailed investment \
             strategy or an instructive answer for the following request: \"{prompt}\". \
             Structure the response well, keep it informative and easy to follow, and use \
             Markdown formatting."
        ),
        TextRequest::Education(topic) => format!(
            "As an expert financial educator, write a clear, concise article on: \"{topic}\". \
             Structure it with headings and bullet lists where useful, bold the important \
             terms, and keep it accessible to beginner and intermediate readers. Use Markdown \
             formatting."
        ),
    }
}

// ── Trait implementation ────────────────────────────────────────────

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl MarketDataProvider for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn get_quote(&self, ticker: &str) -> Result<Quote, CoreError> {
        let text = self.generate(FAST_MODEL, &quote_prompt(ticker)).await?;
        Self::parse_payload(&text)
    }

    async fn get_history(&self, ticker: &str) -> Result<Vec<PricePoint>, CoreError> {
        let text = self.generate(FAST_MODEL, &history_prompt(ticker)).await?;
        Self::parse_payload(&text)
    }

    async fn search_symbols(&self, query: &str) -> Result<Vec<Quote>, CoreError> {
        let text = self.generate(DEEP_MODEL, &search_prompt(query)).await?;
        Self::parse_payload(&text)
    }

    async fn market_overview(&self) -> Result<Vec<MarketIndex>, CoreError> {
        let text = self.generate(FAST_MODEL, &overview_prompt()).await?;
        Self::parse_payload(&text)
    }

    async fn get_analysis(
        &self,
        identifier: &str,
        comparison: Option<&str>,
        currency: &str,
    ) -> Result<AnalysisBundle, CoreError> {
        let text = self
            .generate(DEEP_MODEL, &analysis_prompt(identifier, currency))
            .await?;
        let main: AnalysisResponse = Self::parse_payload(&text)?;

        let comparison_data = match comparison {
            Some(other) => {
                let text = self
                    .generate(DEEP_MODEL, &analysis_prompt(other, currency))
                    .await?;
                let parsed: AnalysisResponse = Self::parse_payload(&text)?;
                Some(parsed.analysis)
            }
            None => None,
        };

        Ok(AnalysisBundle {
            main: main.analysis,
            comparison: comparison_data,
            news: main.news,
        })
    }

    async fn stream_text(&self, request: TextRequest) -> Result<TextStream, CoreError> {
        let url = format!(
            "{BASE_URL}/models/{FAST_MODEL}:streamGenerateContent?alt=sse&key={}",
            self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": stream_prompt(&request) }] }],
        });

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(Self::api_error(status.as_u16(), message));
        }

        Ok(sse_text_stream(resp.bytes_stream()))
    }
}

// ── Server-sent-events chunk decoding ───────────────────────────────

struct SseState<S> {
    inner: S,
    buffer: String,
    pending: VecDeque<Result<String, CoreError>>,
    done: bool,
}

/// Turn an SSE byte stream from `streamGenerateContent` into a stream of
/// plain text chunks. Each `data:` line carries one response envelope;
/// lines that don't decode (keep-alives, partial frames) are skipped.
fn sse_text_stream<S, B>(bytes: S) -> TextStream
where
    S: futures::Stream<Item = reqwest::Result<B>> + Send + Unpin + 'static,
    B: AsRef<[u8]>,
{
    let state = SseState {
        inner: bytes,
        buffer: String::new(),
        pending: VecDeque::new(),
        done: false,
    };

    futures::stream::unfold(state, |mut st| async move {
        loop {
            if let Some(item) = st.pending.pop_front() {
                return Some((item, st));
            }
            if st.done {
                return None;
            }
            match st.inner.next().await {
                Some(Ok(chunk)) => {
                    st.buffer.push_str(&String::from_utf8_lossy(chunk.as_ref()));
                    while let Some(pos) = st.buffer.find('\n') {
                        let line: String = st.buffer.drain(..=pos).collect();
                        let line = line.trim();
                        let Some(data) = line.strip_prefix("data:") else {
                            continue;
                        };
                        let data = data.trim();
                        if data == "[DONE]" {
                            st.done = true;
                            break;
                        }
                        if let Ok(envelope) = serde_json::from_str::<GenerateResponse>(data) {
                            if let Some(text) = envelope.text() {
                                st.pending.push_back(Ok(text));
                            }
                        }
                    }
                }
                Some(Err(e)) => {
                    st.done = true;
                    st.pending.push_back(Err(e.into()));
                }
                None => {
                    st.done = true;
                }
            }
        }
    })
    .boxed()
}
