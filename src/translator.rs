//! Entry points: the free [`translate`] family and the [`Translator`]
//! façade for repeated use with shared defaults.

use tracing::debug;

use crate::dispatch::{dispatch, single_strategy};
use crate::error::Result;
use crate::input::{normalize, Input};
use crate::options::TranslateOptions;
use crate::protocol::Translation;
use crate::reconcile::{reconcile, Translations};
use crate::speech::{speak_queries, Spoken};

/// Translate `input`, which may be a single string, an ordered list of
/// queries, or a named map of queries. The result mirrors the input shape.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> gtranslate::Result<()> {
/// use gtranslate::{translate, TranslateOptions};
///
/// let options = TranslateOptions::new().with_to("es");
/// let result = translate("Hello world", &options).await?;
/// println!("{}", result.single().unwrap().text);
/// # Ok(())
/// # }
/// ```
pub async fn translate(
    input: impl Into<Input>,
    options: &TranslateOptions,
) -> Result<Translations> {
    let options = options.resolve();
    let (queries, shape) = normalize(input.into(), &options)?;
    debug!("translating {} queries", queries.len());
    let outcomes = dispatch(&queries, &options).await?;
    reconcile(outcomes, shape, options.reject_on_partial_fail)
}

/// Translate one string via the single-item endpoint only: no batch
/// routing, no fallback. Fails outright when that endpoint fails.
pub async fn single_translate(text: &str, options: &TranslateOptions) -> Result<Translation> {
    let options = options.resolve();
    let (queries, _) = normalize(Input::Single(text.to_string()), &options)?;
    single_strategy(&queries[0], &options).await
}

/// Translate via the batch endpoint regardless of input size or the
/// `force_batch` option.
pub async fn batch_translate(
    input: impl Into<Input>,
    options: &TranslateOptions,
) -> Result<Translations> {
    let forced = options.merged_with(&TranslateOptions::new().with_force_batch(true));
    translate(input, &forced).await
}

/// Fetch spoken audio for `input` instead of a text translation. Each slot
/// of the result is a base64-encoded MP3; the `to` option selects the
/// spoken language.
pub async fn speak(input: impl Into<Input>, options: &TranslateOptions) -> Result<Spoken> {
    let options = options.resolve();
    let (queries, shape) = normalize(input.into(), &options)?;
    speak_queries(&queries, shape, &options).await
}

/// A translation client bound to a fixed set of default options.
///
/// The snapshot taken at construction is immutable: every call re-merges
/// its own options on top without touching the stored defaults, so
/// instances are safe to share and to run concurrently.
///
/// # Example
///
/// ```no_run
/// # async fn example() -> gtranslate::Result<()> {
/// use gtranslate::{TranslateOptions, Translator};
///
/// let to_spanish = Translator::new(TranslateOptions::new().with_to("es"));
/// let hola = to_spanish.translate("hello", &TranslateOptions::new()).await?;
/// // Call-level options override the instance defaults
/// let salut = to_spanish
///     .translate("hello", &TranslateOptions::new().with_to("fr"))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Translator {
    options: TranslateOptions,
}

impl Translator {
    /// Capture `options` as this instance's defaults.
    pub fn new(options: TranslateOptions) -> Self {
        Self { options }
    }

    /// The stored defaults.
    pub fn options(&self) -> &TranslateOptions {
        &self.options
    }

    /// Translate with `options` layered over the instance defaults.
    pub async fn translate(
        &self,
        input: impl Into<Input>,
        options: &TranslateOptions,
    ) -> Result<Translations> {
        translate(input, &self.options.merged_with(options)).await
    }

    /// Spoken audio with `options` layered over the instance defaults.
    pub async fn speak(
        &self,
        input: impl Into<Input>,
        options: &TranslateOptions,
    ) -> Result<Spoken> {
        speak(input, &self.options.merged_with(options)).await
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new(TranslateOptions::new())
    }
}
