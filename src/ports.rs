//! Capability ports for the AI-assisted entry paths.
//!
//! Receipt scanning, voice transcription, and natural-language intent
//! parsing are external provider calls in the surrounding application. This
//! crate only defines the seams: object-safe `Send + Sync` traits plus the
//! serde DTOs crossing them, so the HTTP layer can inject a real provider
//! and tests can inject mocks. No provider implementation lives here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Failure reported by an AI provider behind one of the ports.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// The provider rejected the input (unreadable image, empty audio).
    #[error("unprocessable input: {0}")]
    UnprocessableInput(String),
    /// The provider call itself failed (network, quota, timeout).
    #[error("provider unavailable: {0}")]
    Unavailable(String),
}

/// An expense prefill extracted from a receipt or an utterance.
///
/// Every field is best-effort; the client shows the draft for confirmation
/// and the confirmed body still goes through full split validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftExpense {
    #[serde(default)]
    pub merchant: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    /// Extracted total, as a decimal string when present.
    #[serde(default, with = "rust_decimal::serde::str_option")]
    pub amount: Option<Decimal>,
    pub currency: String,
    #[serde(default)]
    pub category_suggestion: Option<String>,
    /// Provider confidence in [0, 1].
    pub confidence_score: f64,
    #[serde(default)]
    pub line_items: Vec<ReceiptLineItem>,
}

/// One itemized line recognized on a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptLineItem {
    pub item: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
}

/// A parsed analytics question, tagged on `action`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum QueryIntent {
    /// Summarize spending, optionally narrowed by period ("YYYY-MM") and
    /// category.
    GetSummary {
        #[serde(default)]
        period: Option<String>,
        #[serde(default)]
        category: Option<String>,
    },
    /// The provider could not map the query to a supported action.
    Unknown,
}

/// Turns a receipt image into a draft expense.
pub trait ReceiptScanner: Send + Sync {
    fn scan(&self, image: &[u8]) -> Result<DraftExpense, ProviderError>;
}

/// Turns recorded audio into a plain-text transcript.
pub trait SpeechTranscriber: Send + Sync {
    fn transcribe(&self, audio: &[u8]) -> Result<String, ProviderError>;
}

/// Extracts structured meaning from free-form text.
pub trait IntentParser: Send + Sync {
    /// Parses an utterance like "I spent 500 on groceries" into a draft
    /// expense.
    fn parse_expense(&self, transcript: &str) -> Result<DraftExpense, ProviderError>;

    /// Classifies an analytics question into a [`QueryIntent`].
    fn parse_query(&self, query: &str) -> Result<QueryIntent, ProviderError>;
}
