//! Error taxonomy for the translation pipeline.
//!
//! Failures fall into four classes, surfaced at different points:
//!
//! - input validation ([`Error::EmptyQuery`]) and language resolution
//!   ([`Error::UnsupportedLanguage`]) fail before any network attempt;
//! - dispatcher-level failures ([`Error::Transport`], [`Error::BadResponse`])
//!   abort the whole call once the fallback budget is spent;
//! - per-item failures ([`ItemError`]) are carried inside outcomes and only
//!   escalate to [`Error::PartialFailure`] under the default partial-fail
//!   policy.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error returned by the public API.
#[derive(Debug, Error)]
pub enum Error {
    /// A query resolved to empty text. Detected during normalization,
    /// before dispatch; nothing was sent to the service.
    #[error("query {index} has empty text")]
    EmptyQuery {
        /// Position of the offending query in normalized order
        index: usize,
    },

    /// A `from`/`to` identifier was not found in the language table and the
    /// corresponding force flag was not set. Nothing was sent to the service.
    #[error("language '{value}' for '{field}' is not supported")]
    UnsupportedLanguage {
        /// Which field failed to resolve ("from" or "to")
        field: &'static str,
        /// The identifier as supplied by the caller
        value: String,
    },

    /// The transport callable itself failed (connect error, non-success
    /// status, timeout). Dispatcher-level: no per-item data exists.
    #[error("transport request failed: {0}")]
    Transport(String),

    /// The service replied, but the payload could not be parsed far enough
    /// to split it into per-item slices. Dispatcher-level.
    #[error("unparsable service response: {0}")]
    BadResponse(String),

    /// At least one item of an otherwise successful batch failed and
    /// `reject_on_partial_fail` is enabled. Carries the first per-item
    /// failure as the representative error.
    #[error("translation of item {index} failed: {source}")]
    PartialFailure {
        /// Position of the first failed item in normalized order
        index: usize,
        /// The per-item failure
        source: ItemError,
    },
}

/// Failure of exactly one query inside a successful service response.
#[derive(Debug, Clone, Error)]
pub enum ItemError {
    /// The response carried no slice for this item.
    #[error("no result for this item in the service response")]
    Missing,

    /// The item's slice was present but malformed.
    #[error("malformed item payload: {0}")]
    Malformed(String),
}
