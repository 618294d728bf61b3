//! End-to-end tests for the translation pipeline.
//!
//! Requests run through a real reqwest transport against wiremock servers;
//! only the service host is rewritten, so URL building, form bodies, and
//! reply parsing are all exercised as in production.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

use gtranslate::{
    batch_translate, get_code, is_supported, single_translate, speak, translate, Error, FetchInit,
    Input, QueryInput, QueryOptions, RawResponse, RequestFunction, TranslateOptions, Translator,
};

// ==================== Test Helpers ====================

/// Transport that sends real HTTP but rewrites the service host to a mock
/// server, recording every original URL.
struct RoutedTransport {
    client: reqwest::Client,
    base: String,
    seen: Mutex<Vec<String>>,
}

impl RoutedTransport {
    fn new(server: &MockServer) -> Arc<Self> {
        Arc::new(Self {
            client: reqwest::Client::new(),
            base: server.uri(),
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen_urls(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    fn rewrite(&self, url: &str) -> String {
        let rest = url
            .strip_prefix("https://")
            .and_then(|u| u.find('/').map(|i| &u[i..]))
            .unwrap_or(url);
        format!("{}{}", self.base, rest)
    }
}

#[async_trait]
impl RequestFunction for RoutedTransport {
    async fn request(&self, url: &str, init: &FetchInit) -> gtranslate::Result<RawResponse> {
        self.seen.lock().unwrap().push(url.to_string());

        let rewritten = self.rewrite(url);
        let mut request = if init.method.eq_ignore_ascii_case("POST") {
            self.client.post(&rewritten)
        } else {
            self.client.get(&rewritten)
        };
        for (name, value) in &init.headers {
            request = request.header(name, value);
        }
        if let Some(body) = &init.body {
            request = request.body(body.clone());
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(Error::Transport(format!(
                "service returned {}",
                response.status()
            )));
        }
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;
        Ok(RawResponse::new(body.to_vec()))
    }
}

/// Batch-endpoint responder: decodes the `f.req` envelope and answers each
/// RPC with a translation looked up by source text. Texts listed in `omit`
/// get no frame, which the client must treat as a per-item failure.
struct BatchResponder {
    translations: HashMap<String, String>,
    omit: Vec<String>,
}

impl BatchResponder {
    fn new(pairs: &[(&str, &str)]) -> Self {
        Self {
            translations: pairs
                .iter()
                .map(|(a, b)| (a.to_string(), b.to_string()))
                .collect(),
            omit: Vec::new(),
        }
    }

    fn omitting(mut self, text: &str) -> Self {
        self.omit.push(text.to_string());
        self
    }
}

fn batch_item_payload(translated: &str, detected: &str) -> String {
    json!([
        [Value::Null, Value::Null, detected],
        [[[Value::Null, Value::Null, Value::Null, Value::Null, Value::Null,
           [[translated, Value::Null]]]]],
    ])
    .to_string()
}

impl Respond for BatchResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&request.body);
        let envelope = body.strip_prefix("f.req=").expect("f.req form field");
        let decoded = urlencoding::decode(envelope).expect("urlencoded envelope");
        let parsed: Value = serde_json::from_str(&decoded).expect("JSON envelope");

        let mut frames = Vec::new();
        for rpc in parsed[0].as_array().expect("rpc list") {
            let id = rpc[3].as_str().expect("rpc id");
            let payload: Value =
                serde_json::from_str(rpc[1].as_str().expect("rpc payload")).expect("payload JSON");
            let text = payload[0][0].as_str().expect("query text");
            if self.omit.iter().any(|t| t == text) {
                continue;
            }
            let translated = self
                .translations
                .get(text)
                .cloned()
                .unwrap_or_else(|| format!("<{}>", text));
            frames.push(
                json!([[
                    "wrb.fr",
                    "MkEWBc",
                    batch_item_payload(&translated, "en"),
                    Value::Null,
                    Value::Null,
                    Value::Null,
                    id
                ]])
                .to_string(),
            );
        }

        ResponseTemplate::new(200).set_body_string(format!(")]}}'\n\n{}", frames.join("\n")))
    }
}

const BATCH_PATH: &str = "/_/TranslateWebserverUi/data/batchexecute";
const SINGLE_PATH: &str = "/translate_a/single";

async fn mount_batch(server: &MockServer, responder: BatchResponder) {
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .respond_with(responder)
        .mount(server)
        .await;
}

fn single_reply(translated: &str) -> Value {
    json!({
        "sentences": [{"trans": translated, "orig": "x", "backend": 10}],
        "src": "en"
    })
}

// ==================== Shape Preservation ====================

#[tokio::test]
async fn test_scalar_input_returns_scalar_result() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let result = translate("hello", &options).await.expect("should succeed");

    assert_eq!(result.single().unwrap().text, "hola");
    assert!(result.list().is_none());
}

#[tokio::test]
async fn test_list_input_preserves_order() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("one", "uno"), ("two", "dos"), ("three", "tres")]),
    )
    .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let result = translate(vec!["one", "two", "three"], &options)
        .await
        .expect("should succeed");

    let texts: Vec<_> = result
        .list()
        .unwrap()
        .iter()
        .map(|t| t.as_ref().unwrap().text.clone())
        .collect();
    assert_eq!(texts, vec!["uno", "dos", "tres"]);
}

#[tokio::test]
async fn test_map_keys_are_faithful_regardless_of_declaration_order() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("hi", "hola"), ("bye", "adios")]),
    )
    .await;

    for reversed in [false, true] {
        let transport = RoutedTransport::new(&server);
        let mut map = HashMap::new();
        if reversed {
            map.insert("b".to_string(), QueryInput::from("bye"));
            map.insert("a".to_string(), QueryInput::from("hi"));
        } else {
            map.insert("a".to_string(), QueryInput::from("hi"));
            map.insert("b".to_string(), QueryInput::from("bye"));
        }

        let options = TranslateOptions::new()
            .with_to("es")
            .with_request_function(transport);
        let result = translate(Input::Map(map), &options)
            .await
            .expect("should succeed");

        let results = result.map().unwrap();
        assert_eq!(results["a"].as_ref().unwrap().text, "hola");
        assert_eq!(results["b"].as_ref().unwrap().text, "adios");
    }
}

// ==================== Strategy Selection & Fallback ====================

#[tokio::test]
async fn test_default_options_route_scalar_to_batch_endpoint() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    // No single-endpoint mock: a single-endpoint request would 404 and fail
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport.clone());
    translate("hello", &options).await.expect("should succeed");

    let urls = transport.seen_urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0].contains("batchexecute"));
}

#[tokio::test]
async fn test_single_endpoint_used_when_force_batch_off() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_reply("hola")))
        .expect(1)
        .mount(&server)
        .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_request_function(transport.clone());
    let result = translate("hello", &options).await.expect("should succeed");

    assert_eq!(result.single().unwrap().text, "hola");
    assert!(transport.seen_urls()[0].contains("/translate_a/single"));
}

#[tokio::test]
async fn test_fallback_batch_recovers_from_single_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .expect(1)
        .mount(&server)
        .await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_fallback_batch(true)
        .with_request_function(transport.clone());
    let result = translate("hello", &options).await.expect("should succeed");

    assert_eq!(result.single().unwrap().text, "hola");
    let urls = transport.seen_urls();
    assert_eq!(urls.len(), 2);
    assert!(urls[0].contains("/translate_a/single"));
    assert!(urls[1].contains("batchexecute"));
}

#[tokio::test]
async fn test_no_fallback_fails_on_single_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_fallback_batch(false)
        .with_request_function(transport.clone());
    let err = translate("hello", &options).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(transport.seen_urls().len(), 1);
}

#[tokio::test]
async fn test_single_translate_never_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .mount(&server)
        .await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport.clone());
    let err = single_translate("hello", &options).await.unwrap_err();

    assert!(matches!(err, Error::Transport(_)));
    assert_eq!(transport.seen_urls().len(), 1);
}

#[tokio::test]
async fn test_batch_translate_ignores_force_batch_off() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_request_function(transport.clone());
    let result = batch_translate("hello", &options).await.expect("should succeed");

    assert_eq!(result.single().unwrap().text, "hola");
    assert!(transport.seen_urls()[0].contains("batchexecute"));
}

// ==================== Partial Failure Policy ====================

#[tokio::test]
async fn test_partial_failure_rejects_by_default() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("one", "uno"), ("three", "tres")]).omitting("two"),
    )
    .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let err = translate(vec!["one", "two", "three"], &options)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::PartialFailure { index: 1, .. }));
}

#[tokio::test]
async fn test_partial_failure_tolerated_when_policy_off() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("one", "uno"), ("three", "tres")]).omitting("two"),
    )
    .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_reject_on_partial_fail(false)
        .with_request_function(transport);
    let result = translate(vec!["one", "two", "three"], &options)
        .await
        .expect("call should still succeed");

    let items = result.list().unwrap();
    assert_eq!(items[0].as_ref().unwrap().text, "uno");
    assert!(items[1].is_none());
    assert_eq!(items[2].as_ref().unwrap().text, "tres");
}

// ==================== Language Handling ====================

#[tokio::test]
async fn test_unknown_language_fails_before_any_request() {
    let server = MockServer::start().await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("elvish")
        .with_request_function(transport.clone());
    let err = translate("hello", &options).await.unwrap_err();

    assert!(matches!(err, Error::UnsupportedLanguage { field: "to", .. }));
    assert!(transport.seen_urls().is_empty());
}

#[tokio::test]
async fn test_forced_language_bypasses_the_table() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "???")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("sr-Latn")
        .with_force_to(true)
        .with_request_function(transport.clone());
    translate("hello", &options).await.expect("should succeed");

    // The unvalidated code went out on the wire untouched
    assert!(!is_supported("sr-Latn"));
    let requests = server.received_requests().await.expect("recording enabled");
    let body = String::from_utf8_lossy(&requests[0].body).into_owned();
    assert!(urlencoding::decode(&body).unwrap().contains("sr-Latn"));
}

#[tokio::test]
async fn test_display_name_resolves_before_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(single_reply("hallo")))
        .mount(&server)
        .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("German")
        .with_force_batch(false)
        .with_request_function(transport.clone());
    translate("hello", &options).await.expect("should succeed");

    assert!(transport.seen_urls()[0].contains("tl=de"));
}

#[test]
fn test_language_lookups() {
    assert!(is_supported("auto"));
    assert!(is_supported("Spanish"));
    assert_eq!(get_code("spanish"), Some("es"));
    assert_eq!(get_code("es"), Some("es"));
    assert_eq!(get_code("not-a-language"), None);
}

// ==================== Auto-Correct Reconciliation ====================

async fn mount_single_with_spell(server: &MockServer) {
    let mut reply = single_reply("hola");
    reply["spell"] = json!({
        "spell_res": "hello",
        "spell_html_res": "<b><i>hello</i></b>"
    });
    Mock::given(method("POST"))
        .and(path(SINGLE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_auto_correct_applies_suggestion() {
    let server = MockServer::start().await;
    mount_single_with_spell(&server).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_auto_correct(true)
        .with_request_function(transport);
    let result = translate("helo", &options).await.expect("should succeed");

    let from = &result.single().unwrap().from;
    assert!(from.text.auto_corrected);
    assert!(!from.text.did_you_mean);
    assert_eq!(from.text.value, "[hello]");
}

#[tokio::test]
async fn test_suggestion_without_auto_correct_sets_did_you_mean() {
    let server = MockServer::start().await;
    mount_single_with_spell(&server).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_force_batch(false)
        .with_request_function(transport);
    let result = translate("helo", &options).await.expect("should succeed");

    let from = &result.single().unwrap().from;
    assert!(!from.text.auto_corrected);
    assert!(from.text.did_you_mean);
}

// ==================== Options Plumbing ====================

#[tokio::test]
async fn test_tld_selects_host_variant() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hallo")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("de")
        .with_tld("de")
        .with_request_function(transport.clone());
    translate("hello", &options).await.expect("should succeed");

    assert!(transport.seen_urls()[0].starts_with("https://translate.google.de/"));
}

#[tokio::test]
async fn test_request_options_headers_reach_the_wire() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(BATCH_PATH))
        .and(wiremock::matchers::header("X-Custom", "yes"))
        .respond_with(BatchResponder::new(&[("hello", "hola")]))
        .expect(1)
        .mount(&server)
        .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_options(FetchInit::default().with_header("X-Custom", "yes"))
        .with_request_function(transport);
    translate("hello", &options).await.expect("should succeed");
}

#[tokio::test]
async fn test_raw_option_keeps_item_payload() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_raw(true)
        .with_request_function(transport);
    let result = translate("hello", &options).await.expect("should succeed");

    assert!(result.single().unwrap().raw.contains("hola"));
}

// ==================== Translator Façade ====================

#[tokio::test]
async fn test_translator_defaults_and_call_overrides() {
    let server = MockServer::start().await;
    mount_batch(&server, BatchResponder::new(&[("hello", "hola")])).await;
    let transport = RoutedTransport::new(&server);

    let translator = Translator::new(
        TranslateOptions::new()
            .with_to("es")
            .with_request_function(transport.clone()),
    );

    translator
        .translate("hello", &TranslateOptions::new())
        .await
        .expect("instance defaults should apply");
    assert!(transport.seen_urls()[0].contains("translate.google.com"));

    translator
        .translate("hello", &TranslateOptions::new().with_tld("fr"))
        .await
        .expect("call override should apply");
    assert!(transport.seen_urls()[1].contains("translate.google.fr"));
}

#[tokio::test]
async fn test_concurrent_translator_instances() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("hello", "hola"), ("world", "welt")]),
    )
    .await;

    let spanish = Translator::new(
        TranslateOptions::new()
            .with_to("es")
            .with_request_function(RoutedTransport::new(&server)),
    );
    let german = Translator::new(
        TranslateOptions::new()
            .with_to("de")
            .with_request_function(RoutedTransport::new(&server)),
    );

    let spanish_opts = TranslateOptions::new();
    let german_opts = TranslateOptions::new();
    let (a, b) = tokio::join!(
        spanish.translate("hello", &spanish_opts),
        german.translate("world", &german_opts),
    );

    assert_eq!(a.unwrap().single().unwrap().text, "hola");
    assert_eq!(b.unwrap().single().unwrap().text, "welt");
}

// ==================== Per-Item Overrides ====================

#[tokio::test]
async fn test_per_item_language_overrides_reach_the_wire() {
    let server = MockServer::start().await;
    mount_batch(
        &server,
        BatchResponder::new(&[("default", "x"), ("custom", "y")]),
    )
    .await;
    let transport = RoutedTransport::new(&server);

    let input = Input::List(vec![
        QueryInput::from("default"),
        QueryInput::from(QueryOptions::new("custom").with_to("fr")),
    ]);
    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let result = translate(input, &options).await.expect("should succeed");

    assert_eq!(result.list().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_item_fails_fast_without_requests() {
    let server = MockServer::start().await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new().with_request_function(transport.clone());
    let err = translate(vec!["fine", ""], &options).await.unwrap_err();

    assert!(matches!(err, Error::EmptyQuery { index: 1 }));
    assert!(transport.seen_urls().is_empty());
}

// ==================== Speech ====================

#[tokio::test]
async fn test_speak_returns_base64_audio() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0xffu8, 0xf3, 0x44]))
        .mount(&server)
        .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let result = speak("hola amigo", &options).await.expect("should succeed");

    // 0xff 0xf3 0x44 is "//NE" in standard base64
    assert_eq!(result.single().unwrap(), "//NE");
}

#[tokio::test]
async fn test_speak_list_shape() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/translate_tts"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![1u8, 2, 3]))
        .expect(2)
        .mount(&server)
        .await;
    let transport = RoutedTransport::new(&server);

    let options = TranslateOptions::new()
        .with_to("es")
        .with_request_function(transport);
    let result = speak(vec!["uno", "dos"], &options).await.expect("should succeed");

    let items = result.list().unwrap();
    assert_eq!(items.len(), 2);
    assert!(items.iter().all(|i| i.is_some()));
}
