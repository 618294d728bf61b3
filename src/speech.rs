//! Spoken audio: the text-to-speech counterpart of the translation
//! pipeline.
//!
//! Reuses input normalization and shape reassembly; the service side is one
//! `translate_tts` call per query (the endpoint has no batch form), and
//! each successful slot is a base64-encoded MP3.

use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use tracing::warn;

use crate::error::{Error, ItemError, Result};
use crate::input::{ResolvedQuery, Shape};
use crate::options::ResolvedOptions;
use crate::protocol::speech_request;
use crate::transport::merge_request_options;

/// Spoken-audio output, shaped like the input that produced it. Each
/// successful slot is a base64-encoded MP3.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Spoken {
    Single(String),
    List(Vec<Option<String>>),
    Map(HashMap<String, Option<String>>),
}

impl Spoken {
    pub fn single(&self) -> Option<&str> {
        match self {
            Spoken::Single(audio) => Some(audio),
            _ => None,
        }
    }

    pub fn list(&self) -> Option<&[Option<String>]> {
        match self {
            Spoken::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn map(&self) -> Option<&HashMap<String, Option<String>>> {
        match self {
            Spoken::Map(items) => Some(items),
            _ => None,
        }
    }
}

/// Fetch audio for every query and reassemble per `shape`.
///
/// Queries are fetched one at a time; a failed fetch is a per-item failure
/// governed by the same partial-fail policy as translation.
pub(crate) async fn speak_queries(
    queries: &[ResolvedQuery],
    shape: Shape,
    options: &ResolvedOptions,
) -> Result<Spoken> {
    let mut slots: Vec<Option<String>> = Vec::with_capacity(queries.len());
    let mut first_failure: Option<usize> = None;

    for (index, query) in queries.iter().enumerate() {
        let (url, init) = speech_request(query, &options.tld);
        let init = merge_request_options(init, &options.request_options);
        match options.request_function.request(&url, &init).await {
            Ok(response) => slots.push(Some(BASE64.encode(response.bytes()))),
            Err(e) => {
                warn!("speech fetch for item {} failed: {}", index, e);
                first_failure.get_or_insert(index);
                slots.push(None);
            }
        }
    }

    match shape {
        Shape::Single => match slots.into_iter().next().flatten() {
            Some(audio) => Ok(Spoken::Single(audio)),
            None => Err(Error::PartialFailure {
                index: 0,
                source: ItemError::Missing,
            }),
        },
        Shape::List(_) => {
            if let Some(index) = first_failure.filter(|_| options.reject_on_partial_fail) {
                return Err(Error::PartialFailure {
                    index,
                    source: ItemError::Missing,
                });
            }
            Ok(Spoken::List(slots))
        }
        Shape::Map(keys) => {
            if let Some(index) = first_failure.filter(|_| options.reject_on_partial_fail) {
                return Err(Error::PartialFailure {
                    index,
                    source: ItemError::Missing,
                });
            }
            Ok(Spoken::Map(keys.into_iter().zip(slots).collect()))
        }
    }
}
