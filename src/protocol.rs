//! Wire format of the translation service.
//!
//! Three endpoints, all keyed off `translate.google.{tld}`:
//!
//! - `/translate_a/single`: one query per call, JSON-object reply
//!   (`dj=1`): `{sentences, src, spell}`.
//! - `/_/TranslateWebserverUi/data/batchexecute`: any number of queries in
//!   one call. The request is an `f.req` form field holding one `MkEWBc`
//!   RPC per query, tagged with a 1-based decimal id. The reply is a
//!   `)]}'`-prefixed stream of JSON chunks; `wrb.fr` frames are matched
//!   back to queries by that id.
//! - `/translate_tts`: MP3 audio for one query.
//!
//! None of this is documented upstream; the shapes here were validated
//! against recorded responses and kept deliberately lenient. A frame that
//! is missing or unreadable becomes a per-item failure and never poisons
//! its neighbors.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{Error, ItemError, Result};
use crate::input::ResolvedQuery;
use crate::transport::FetchInit;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Detected source-language information.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedLanguage {
    /// `true` if the service suggested a different source language
    pub did_you_mean: bool,

    /// Service code of the language detected in the source text
    pub iso: String,
}

/// Source-text information, including correction handling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    /// `true` if the service corrected the text and the correction was used
    pub auto_corrected: bool,

    /// The corrected text, or the text with suggestions marked `[thus]`
    pub value: String,

    /// `true` if the service suggested corrections that were not applied
    pub did_you_mean: bool,
}

/// What the service said about the source side of one query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FromInfo {
    pub language: DetectedLanguage,
    pub text: SourceText,
}

/// One successful translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Translation {
    /// Translated text
    pub text: String,

    /// Transliteration of the translation, when the service provides one
    pub pronunciation: Option<String>,

    /// Source-side detection and correction info
    pub from: FromInfo,

    /// The item's raw service payload when the `raw` option is set,
    /// otherwise empty
    pub raw: String,
}

fn host(tld: &str) -> String {
    format!("https://translate.google.{}", tld)
}

/// Rewrite the service's `<b><i>…</i></b>` correction markup to brackets.
fn strip_correction_markup(html: &str) -> String {
    static OPEN: OnceLock<Regex> = OnceLock::new();
    static CLOSE: OnceLock<Regex> = OnceLock::new();
    let open = OPEN.get_or_init(|| Regex::new(r"<b>(<i>)?").unwrap());
    let close = CLOSE.get_or_init(|| Regex::new(r"(</i>)?</b>").unwrap());
    close
        .replace_all(&open.replace_all(html, "["), "]")
        .into_owned()
}

/// Apply the correction policy shared by both endpoints: with
/// `auto_correct` the correction becomes the effective source text; without
/// it the suggestion is only flagged.
fn apply_correction(from: &mut FromInfo, corrected: &str, auto_correct: bool) {
    let value = strip_correction_markup(corrected);
    if auto_correct {
        from.text.auto_corrected = true;
    } else {
        from.text.did_you_mean = true;
    }
    from.text.value = value;
}

// ---------------------------------------------------------------------------
// Single endpoint
// ---------------------------------------------------------------------------

/// Build the single-endpoint request for one query.
pub(crate) fn single_request(query: &ResolvedQuery, tld: &str) -> (String, FetchInit) {
    let url = format!(
        "{}/translate_a/single?client=at&dt=t&dt=rm&dt=qca&dj=1&ie=UTF-8&oe=UTF-8&sl={}&tl={}",
        host(tld),
        urlencoding::encode(&query.sl),
        urlencoding::encode(&query.tl),
    );
    let init = FetchInit::post(format!("q={}", urlencoding::encode(&query.text)))
        .with_header("Content-Type", FORM_CONTENT_TYPE);
    (url, init)
}

/// Parse a single-endpoint reply.
///
/// Failures here are dispatcher-level: there is only one item, and a body
/// we cannot read means the attempt as a whole failed (and may still be
/// retried via the batch endpoint).
pub(crate) fn parse_single(body: &Value, query: &ResolvedQuery, raw: bool) -> Result<Translation> {
    let sentences = body
        .get("sentences")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::BadResponse("single reply has no sentences".to_string()))?;

    let mut translation = Translation {
        raw: if raw { body.to_string() } else { String::new() },
        ..Translation::default()
    };

    for sentence in sentences {
        if let Some(trans) = sentence.get("trans").and_then(Value::as_str) {
            translation.text.push_str(trans);
        }
        if let Some(translit) = sentence.get("translit").and_then(Value::as_str) {
            translation.pronunciation = Some(translit.to_string());
        }
    }

    if translation.text.is_empty() {
        return Err(Error::BadResponse(
            "single reply carried no translated text".to_string(),
        ));
    }

    translation.from.language.iso = body
        .get("src")
        .and_then(Value::as_str)
        .unwrap_or(&query.sl)
        .to_string();

    if let Some(corrected) = body
        .pointer("/spell/spell_html_res")
        .and_then(Value::as_str)
    {
        apply_correction(&mut translation.from, corrected, query.auto_correct);
    }

    Ok(translation)
}

// ---------------------------------------------------------------------------
// Batch endpoint
// ---------------------------------------------------------------------------

const BATCH_RPC: &str = "MkEWBc";

/// Build the batch-endpoint request carrying every query.
///
/// Each query becomes one RPC envelope `["MkEWBc", payload, null, id]`
/// where `payload` is the JSON string `[[text, sl, tl, auto_correct],
/// [null]]` and `id` is the query's 1-based position.
pub(crate) fn batch_request(queries: &[ResolvedQuery], tld: &str) -> (String, FetchInit) {
    let url = format!(
        "{}/_/TranslateWebserverUi/data/batchexecute?rpcids={}",
        host(tld),
        BATCH_RPC
    );

    let rpcs: Vec<Value> = queries
        .iter()
        .enumerate()
        .map(|(index, query)| {
            let payload =
                json!([[query.text, query.sl, query.tl, query.auto_correct], [Value::Null]])
                    .to_string();
            json!([BATCH_RPC, payload, Value::Null, (index + 1).to_string()])
        })
        .collect();
    let envelope = json!([rpcs]).to_string();

    let init = FetchInit::post(format!("f.req={}", urlencoding::encode(&envelope)))
        .with_header("Content-Type", FORM_CONTENT_TYPE);
    (url, init)
}

/// Split a batch reply into per-query payloads, in query order.
///
/// The reply body is the anti-hijacking prefix `)]}'` followed by length
/// lines and JSON chunks. Every parsable chunk is scanned for `wrb.fr`
/// frames carrying our RPC id; anything else (length lines, metadata
/// frames) is skipped. A query without a readable frame yields `Err` in its
/// slot rather than failing the call.
pub(crate) fn split_batch_reply(
    body: &str,
    query_count: usize,
) -> Result<Vec<std::result::Result<Value, ItemError>>> {
    let stripped = body.strip_prefix(")]}'").unwrap_or(body);

    let mut payloads: Vec<Option<Value>> = vec![None; query_count];
    let mut saw_frame = false;

    for line in stripped.lines() {
        let line = line.trim();
        if !line.starts_with('[') {
            continue;
        }
        let Ok(chunk) = serde_json::from_str::<Value>(line) else {
            continue;
        };
        let Some(frames) = chunk.as_array() else {
            continue;
        };
        for frame in frames {
            if frame.get(0).and_then(Value::as_str) != Some("wrb.fr")
                || frame.get(1).and_then(Value::as_str) != Some(BATCH_RPC)
            {
                continue;
            }
            saw_frame = true;
            let Some(id) = frame
                .get(6)
                .and_then(Value::as_str)
                .and_then(|id| id.parse::<usize>().ok())
            else {
                continue;
            };
            if id == 0 || id > query_count {
                continue;
            }
            // Frame payload is a doubly-encoded JSON string; an unreadable
            // one simply leaves the slot empty.
            if let Some(payload) = frame
                .get(2)
                .and_then(Value::as_str)
                .and_then(|p| serde_json::from_str::<Value>(p).ok())
            {
                payloads[id - 1] = Some(payload);
            }
        }
    }

    if !saw_frame {
        return Err(Error::BadResponse(
            "batch reply contained no translation frames".to_string(),
        ));
    }

    Ok(payloads
        .into_iter()
        .map(|slot| slot.ok_or(ItemError::Missing))
        .collect())
}

/// Parse one query's batch payload.
///
/// Layout of the payload (indices into the nested arrays):
/// - `[1][0][0][5]`: translation chunks, each `[text, …]`
/// - `[1][0][0][1]`: transliteration of the translation
/// - `[0][2]`: detected source language code
/// - `[0][1][0][0][1]`: corrected source text with `<b><i>` markup
/// - `[0][1][1][0]`: suggested alternate source language
pub(crate) fn parse_batch_item(
    payload: &Value,
    query: &ResolvedQuery,
    raw: bool,
) -> std::result::Result<Translation, ItemError> {
    let chunks = payload
        .pointer("/1/0/0/5")
        .and_then(Value::as_array)
        .ok_or_else(|| ItemError::Malformed("no translation chunks".to_string()))?;

    let text = chunks
        .iter()
        .filter_map(|chunk| chunk.get(0).and_then(Value::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() {
        return Err(ItemError::Malformed("empty translation".to_string()));
    }

    let mut translation = Translation {
        text,
        pronunciation: payload
            .pointer("/1/0/0/1")
            .and_then(Value::as_str)
            .map(str::to_string),
        raw: if raw { payload.to_string() } else { String::new() },
        ..Translation::default()
    };

    translation.from.language.iso = payload
        .pointer("/0/2")
        .and_then(Value::as_str)
        .unwrap_or(&query.sl)
        .to_string();

    if payload.pointer("/0/1/1/0").is_some_and(|v| !v.is_null()) {
        translation.from.language.did_you_mean = true;
    }

    if let Some(corrected) = payload.pointer("/0/1/0/0/1").and_then(Value::as_str) {
        apply_correction(&mut translation.from, corrected, query.auto_correct);
    }

    Ok(translation)
}

// ---------------------------------------------------------------------------
// Speech endpoint
// ---------------------------------------------------------------------------

/// Build the text-to-speech request for one query. The `tl` field selects
/// the spoken language; the reply body is MP3 audio.
pub(crate) fn speech_request(query: &ResolvedQuery, tld: &str) -> (String, FetchInit) {
    let url = format!(
        "{}/translate_tts?client=at&ie=UTF-8&total=1&idx=0&tl={}&textlen={}&q={}",
        host(tld),
        urlencoding::encode(&query.tl),
        query.text.chars().count(),
        urlencoding::encode(&query.text),
    );
    (url, FetchInit::get())
}
