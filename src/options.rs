//! Request configuration.
//!
//! [`TranslateOptions`] is the caller-facing bag of overrides: every field
//! is optional so that option sets can be layered. Precedence, lowest to
//! highest: process-wide defaults, `Translator` instance options, call-level
//! options, per-query fields. Layering never mutates the lower layer.
//!
//! [`ResolvedOptions`] is the fully-defaulted snapshot one pipeline call
//! runs against.

use std::fmt;
use std::sync::Arc;

use crate::transport::{default_transport, FetchInit, RequestFunction};

/// Options accepted by [`translate`](crate::translate) and
/// [`Translator`](crate::Translator).
///
/// Unset fields fall through to the next layer down.
#[derive(Clone, Default)]
pub struct TranslateOptions {
    /// Source language identifier (default "auto")
    pub from: Option<String>,

    /// Target language identifier (default "en")
    pub to: Option<String>,

    /// Use `from` as the service code without validating it (default false)
    pub force_from: Option<bool>,

    /// Use `to` as the service code without validating it (default false)
    pub force_to: Option<bool>,

    /// Use service-suggested corrections as the effective source text
    /// (default false)
    pub auto_correct: Option<bool>,

    /// Host variant: requests go to `translate.google.{tld}` (default "com")
    pub tld: Option<String>,

    /// Always use the batch endpoint, even for one query (default true; the
    /// batch endpoint is less likely to be rate limited)
    pub force_batch: Option<bool>,

    /// On single-endpoint failure, retry once via the batch endpoint
    /// (default true)
    pub fallback_batch: Option<bool>,

    /// Fail the whole call when any item of a batch fails; when disabled,
    /// failed slots become `None` (default true)
    pub reject_on_partial_fail: Option<bool>,

    /// Keep each item's raw service payload on the result (default false)
    pub raw: Option<bool>,

    /// Extra fetch options merged into every transport call
    pub request_options: Option<FetchInit>,

    /// Transport override; defaults to the shared reqwest transport
    pub request_function: Option<Arc<dyn RequestFunction>>,
}

impl TranslateOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the source language.
    pub fn with_from(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    /// Set the target language.
    pub fn with_to(mut self, to: &str) -> Self {
        self.to = Some(to.to_string());
        self
    }

    /// Bypass language-table validation for `from`.
    pub fn with_force_from(mut self, force: bool) -> Self {
        self.force_from = Some(force);
        self
    }

    /// Bypass language-table validation for `to`.
    pub fn with_force_to(mut self, force: bool) -> Self {
        self.force_to = Some(force);
        self
    }

    /// Opt in to service-side auto-correction of the source text.
    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.auto_correct = Some(auto_correct);
        self
    }

    /// Select the service host variant.
    pub fn with_tld(mut self, tld: &str) -> Self {
        self.tld = Some(tld.to_string());
        self
    }

    /// Force or unforce the batch endpoint.
    pub fn with_force_batch(mut self, force_batch: bool) -> Self {
        self.force_batch = Some(force_batch);
        self
    }

    /// Enable or disable the single→batch fallback.
    pub fn with_fallback_batch(mut self, fallback_batch: bool) -> Self {
        self.fallback_batch = Some(fallback_batch);
        self
    }

    /// Set the partial-failure policy.
    pub fn with_reject_on_partial_fail(mut self, reject: bool) -> Self {
        self.reject_on_partial_fail = Some(reject);
        self
    }

    /// Keep raw per-item payloads on results.
    pub fn with_raw(mut self, raw: bool) -> Self {
        self.raw = Some(raw);
        self
    }

    /// Merge extra fetch options into every transport call.
    pub fn with_request_options(mut self, request_options: FetchInit) -> Self {
        self.request_options = Some(request_options);
        self
    }

    /// Substitute the transport.
    pub fn with_request_function(mut self, f: Arc<dyn RequestFunction>) -> Self {
        self.request_function = Some(f);
        self
    }

    /// Layer `over` on top of `self`: fields set in `over` win, everything
    /// else falls through. Neither input is mutated.
    pub fn merged_with(&self, over: &TranslateOptions) -> TranslateOptions {
        TranslateOptions {
            from: over.from.clone().or_else(|| self.from.clone()),
            to: over.to.clone().or_else(|| self.to.clone()),
            force_from: over.force_from.or(self.force_from),
            force_to: over.force_to.or(self.force_to),
            auto_correct: over.auto_correct.or(self.auto_correct),
            tld: over.tld.clone().or_else(|| self.tld.clone()),
            force_batch: over.force_batch.or(self.force_batch),
            fallback_batch: over.fallback_batch.or(self.fallback_batch),
            reject_on_partial_fail: over
                .reject_on_partial_fail
                .or(self.reject_on_partial_fail),
            raw: over.raw.or(self.raw),
            request_options: over
                .request_options
                .clone()
                .or_else(|| self.request_options.clone()),
            request_function: over
                .request_function
                .clone()
                .or_else(|| self.request_function.clone()),
        }
    }

    /// Apply process-wide defaults to every unset field.
    pub(crate) fn resolve(&self) -> ResolvedOptions {
        ResolvedOptions {
            from: self.from.clone().unwrap_or_else(|| "auto".to_string()),
            to: self.to.clone().unwrap_or_else(|| "en".to_string()),
            force_from: self.force_from.unwrap_or(false),
            force_to: self.force_to.unwrap_or(false),
            auto_correct: self.auto_correct.unwrap_or(false),
            tld: self.tld.clone().unwrap_or_else(|| "com".to_string()),
            force_batch: self.force_batch.unwrap_or(true),
            fallback_batch: self.fallback_batch.unwrap_or(true),
            reject_on_partial_fail: self.reject_on_partial_fail.unwrap_or(true),
            raw: self.raw.unwrap_or(false),
            request_options: self.request_options.clone().unwrap_or_default(),
            request_function: self
                .request_function
                .clone()
                .unwrap_or_else(default_transport),
        }
    }
}

impl fmt::Debug for TranslateOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslateOptions")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("force_from", &self.force_from)
            .field("force_to", &self.force_to)
            .field("auto_correct", &self.auto_correct)
            .field("tld", &self.tld)
            .field("force_batch", &self.force_batch)
            .field("fallback_batch", &self.fallback_batch)
            .field("reject_on_partial_fail", &self.reject_on_partial_fail)
            .field("raw", &self.raw)
            .field("request_options", &self.request_options)
            .field(
                "request_function",
                &self.request_function.as_ref().map(|_| "<custom>"),
            )
            .finish()
    }
}

/// One pipeline call's fully-defaulted configuration snapshot.
#[derive(Clone)]
pub(crate) struct ResolvedOptions {
    pub from: String,
    pub to: String,
    pub force_from: bool,
    pub force_to: bool,
    pub auto_correct: bool,
    pub tld: String,
    pub force_batch: bool,
    pub fallback_batch: bool,
    pub reject_on_partial_fail: bool,
    pub raw: bool,
    pub request_options: FetchInit,
    pub request_function: Arc<dyn RequestFunction>,
}
