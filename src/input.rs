//! Input normalization.
//!
//! Callers hand in one of three shapes: a single string, an ordered list of
//! queries, or a named map of queries. Normalization flattens all three into
//! one ordered query list plus a [`Shape`] descriptor that records how to
//! reassemble the output, and resolves every language identifier up front so
//! that no invalid query ever reaches the network.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::languages::get_code;
use crate::options::ResolvedOptions;

/// Per-item translation overrides.
///
/// Unset fields fall through to the call-level options, then to the
/// process-wide defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Text to translate
    pub text: String,

    /// Source language identifier
    pub from: Option<String>,

    /// Target language identifier
    pub to: Option<String>,

    /// Use `from` as the service code without validating it
    pub force_from: Option<bool>,

    /// Use `to` as the service code without validating it
    pub force_to: Option<bool>,

    /// Use service-suggested corrections as the effective source text
    pub auto_correct: Option<bool>,
}

impl QueryOptions {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            ..Self::default()
        }
    }

    pub fn with_from(mut self, from: &str) -> Self {
        self.from = Some(from.to_string());
        self
    }

    pub fn with_to(mut self, to: &str) -> Self {
        self.to = Some(to.to_string());
        self
    }

    pub fn with_force_from(mut self, force: bool) -> Self {
        self.force_from = Some(force);
        self
    }

    pub fn with_force_to(mut self, force: bool) -> Self {
        self.force_to = Some(force);
        self
    }

    pub fn with_auto_correct(mut self, auto_correct: bool) -> Self {
        self.auto_correct = Some(auto_correct);
        self
    }
}

/// One element of a list or map input: a bare string or a query with
/// per-item overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    Text(String),
    Query(QueryOptions),
}

impl From<&str> for QueryInput {
    fn from(text: &str) -> Self {
        QueryInput::Text(text.to_string())
    }
}

impl From<String> for QueryInput {
    fn from(text: String) -> Self {
        QueryInput::Text(text)
    }
}

impl From<QueryOptions> for QueryInput {
    fn from(query: QueryOptions) -> Self {
        QueryInput::Query(query)
    }
}

/// The three input shapes the pipeline accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// One string
    Single(String),

    /// Ordered queries; results come back in the same order
    List(Vec<QueryInput>),

    /// Named queries; results come back under the same keys
    Map(HashMap<String, QueryInput>),
}

impl From<&str> for Input {
    fn from(text: &str) -> Self {
        Input::Single(text.to_string())
    }
}

impl From<String> for Input {
    fn from(text: String) -> Self {
        Input::Single(text)
    }
}

impl From<Vec<&str>> for Input {
    fn from(texts: Vec<&str>) -> Self {
        Input::List(texts.into_iter().map(QueryInput::from).collect())
    }
}

impl From<Vec<QueryInput>> for Input {
    fn from(queries: Vec<QueryInput>) -> Self {
        Input::List(queries)
    }
}

impl From<HashMap<String, QueryInput>> for Input {
    fn from(map: HashMap<String, QueryInput>) -> Self {
        Input::Map(map)
    }
}

/// Records how to reassemble pipeline output into the caller's shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Single,
    List(usize),
    /// Keys in the same order as the normalized queries
    Map(Vec<String>),
}

/// One query as sent to the dispatcher: non-empty text plus wire-ready
/// language codes. `sl`/`tl` are always raw service codes by this point,
/// never display names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedQuery {
    pub text: String,
    pub sl: String,
    pub tl: String,
    pub auto_correct: bool,
}

/// Flatten `input` into ordered queries plus the shape descriptor.
///
/// Fails fast, before any network attempt, on empty query text and on
/// unforced language identifiers missing from the table.
pub(crate) fn normalize(
    input: Input,
    options: &ResolvedOptions,
) -> Result<(Vec<ResolvedQuery>, Shape)> {
    match input {
        Input::Single(text) => {
            let query = resolve_query(QueryInput::Text(text), 0, options)?;
            Ok((vec![query], Shape::Single))
        }
        Input::List(items) => {
            let shape = Shape::List(items.len());
            let queries = items
                .into_iter()
                .enumerate()
                .map(|(index, item)| resolve_query(item, index, options))
                .collect::<Result<Vec<_>>>()?;
            Ok((queries, shape))
        }
        Input::Map(map) => {
            let mut keys = Vec::with_capacity(map.len());
            let mut queries = Vec::with_capacity(map.len());
            for (index, (key, item)) in map.into_iter().enumerate() {
                queries.push(resolve_query(item, index, options)?);
                keys.push(key);
            }
            Ok((queries, Shape::Map(keys)))
        }
    }
}

/// Merge one element with the call-level options and resolve its languages.
fn resolve_query(
    item: QueryInput,
    index: usize,
    options: &ResolvedOptions,
) -> Result<ResolvedQuery> {
    let query = match item {
        QueryInput::Text(text) => QueryOptions {
            text,
            ..QueryOptions::default()
        },
        QueryInput::Query(query) => query,
    };

    if query.text.is_empty() {
        return Err(Error::EmptyQuery { index });
    }

    let from = query.from.unwrap_or_else(|| options.from.clone());
    let to = query.to.unwrap_or_else(|| options.to.clone());
    let force_from = query.force_from.unwrap_or(options.force_from);
    let force_to = query.force_to.unwrap_or(options.force_to);
    let auto_correct = query.auto_correct.unwrap_or(options.auto_correct);

    let sl = resolve_language(from, "from", force_from)?;
    let tl = resolve_language(to, "to", force_to)?;

    Ok(ResolvedQuery {
        text: query.text,
        sl,
        tl,
        auto_correct,
    })
}

/// Canonicalize one language field. A forced field passes through untouched,
/// which permits codes absent from the static table.
fn resolve_language(value: String, field: &'static str, forced: bool) -> Result<String> {
    if forced {
        return Ok(value);
    }
    match get_code(&value) {
        Some(code) => Ok(code.to_string()),
        None => Err(Error::UnsupportedLanguage { field, value }),
    }
}
