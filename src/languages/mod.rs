//! Language identification and lookup.
//!
//! This module owns the static language table and the two lookup queries the
//! rest of the crate (and the public API) is built on:
//!
//! - `registry`: the table itself plus code/name lookups
//! - [`is_supported`]: whether an identifier names a known language
//! - [`get_code`]: canonicalize an identifier to its service code
//!
//! Identifiers may be service codes ("es", "zh-CN", case sensitive) or
//! English display names ("Spanish", case insensitive). The pseudo code
//! `"auto"` is always supported as a source language.

mod registry;

pub use registry::{LanguageConfig, LanguageRegistry};

/// Returns `true` if `id` names a language the service supports.
///
/// Accepts either a service code or an English display name. `"auto"` is
/// always supported.
pub fn is_supported(id: &str) -> bool {
    get_code(id).is_some()
}

/// Canonicalize a language identifier to its service code.
///
/// Returns `None` when the identifier is unknown, which is distinct from any
/// valid code. Codes resolve to themselves, so `get_code` is idempotent over
/// its own output.
pub fn get_code(id: &str) -> Option<&'static str> {
    if id.is_empty() {
        return None;
    }
    LanguageRegistry::get().resolve(id).map(|lang| lang.code)
}
