//! Async client for the unofficial Google Translate web endpoints.
//!
//! The entry point is [`translate`]: it accepts a single string, an ordered
//! list of queries, or a named map of queries, and returns results in the
//! same shape. Language identifiers may be service codes or English display
//! names, validated against the static table unless explicitly forced.
//! Behind the scenes one call maps to one transport request: the batch
//! endpoint by default, or the single endpoint (with a one-shot batch
//! fallback) when `force_batch` is off and there is exactly one query.
//!
//! [`Translator`] bundles a reusable set of default options; [`speak`]
//! fetches spoken audio instead of text. The transport is injectable via
//! [`RequestFunction`] so tests and embedders never need the network.
//!
//! ```no_run
//! # async fn example() -> gtranslate::Result<()> {
//! use gtranslate::{translate, TranslateOptions};
//!
//! let options = TranslateOptions::new().with_to("Spanish");
//! let result = translate(vec!["Hello", "Goodbye"], &options).await?;
//! for item in result.list().unwrap() {
//!     println!("{}", item.as_ref().unwrap().text);
//! }
//! # Ok(())
//! # }
//! ```

mod dispatch;
mod error;
mod input;
mod languages;
mod options;
mod protocol;
mod reconcile;
mod speech;
mod translator;
mod transport;

pub use error::{Error, ItemError, Result};
pub use input::{Input, QueryInput, QueryOptions};
pub use languages::{get_code, is_supported, LanguageConfig, LanguageRegistry};
pub use options::TranslateOptions;
pub use protocol::{DetectedLanguage, FromInfo, SourceText, Translation};
pub use reconcile::Translations;
pub use speech::Spoken;
pub use translator::{batch_translate, single_translate, speak, translate, Translator};
pub use transport::{FetchInit, HttpTransport, RawResponse, RequestFunction};
