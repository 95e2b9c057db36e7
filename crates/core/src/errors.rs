use thiserror::Error;

/// Unified error type for the entire papertrade-core library.
/// Every public fallible function returns `Result<T, CoreError>`.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── User input / trading ────────────────────────────────────────
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Insufficient funds: need {required:.2}, have {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("Insufficient shares of {ticker}: tried to sell {requested}, hold {held}")]
    InsufficientShares {
        ticker: String,
        requested: u32,
        held: u32,
    },

    // ── Market data / analysis service ──────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api { provider: String, message: String },

    #[error("Rate limit reached — too many requests; try again later")]
    RateLimited,

    #[error("Network error: {0}")]
    Network(String),

    #[error("Malformed response from {provider}: {message}")]
    Parse { provider: String, message: String },

    // ── Account store ───────────────────────────────────────────────
    #[error("Account store error: {0}")]
    Store(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    #[error("No authenticated session")]
    NotAuthenticated,

    // ── Settings persistence ────────────────────────────────────────
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),
}

impl CoreError {
    /// Whether the caller should offer a retry rather than treat this
    /// as a hard failure.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            CoreError::RateLimited | CoreError::Network(_) | CoreError::Api { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // Sanitize error message: strip query parameters from URLs to prevent
        // API key leakage. reqwest errors often contain full URLs with secrets.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
