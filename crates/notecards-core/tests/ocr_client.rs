//! OCR backend client tests against a mock server.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use notecards_core::models::config::OcrConfig;
use notecards_core::{
    DelimiterSynthesizer, IdGenerator, ImagePayload, OcrClient, OcrError, Session,
};

fn image() -> ImagePayload {
    ImagePayload::from_bytes(b"fake png bytes", "image/png")
}

fn client(base_url: &str) -> OcrClient {
    OcrClient::new(OcrConfig::with_base_url(base_url)).unwrap()
}

/// Mount a catch-all mock that counts requests.
async fn counting_mock(server: &MockServer, template: ResponseTemplate) -> Arc<AtomicUsize> {
    let calls = Arc::new(AtomicUsize::new(0));

    Mock::given(method("POST"))
        .respond_with({
            let calls = Arc::clone(&calls);
            move |_: &wiremock::Request| {
                calls.fetch_add(1, Ordering::SeqCst);
                template.clone()
            }
        })
        .mount(server)
        .await;

    calls
}

#[tokio::test]
async fn test_recognize_success() {
    let server = MockServer::start().await;
    let image = image();

    Mock::given(method("POST"))
        .and(path("/api/ocr"))
        .and(body_json(json!({ "image_base64": image.as_data_url() })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "cards": [
                { "q": "Mitochondria", "a": "Powerhouse of the cell" },
                { "q": "  Osmosis ", "a": " Diffusion of water " }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let cards = client(&server.uri())
        .recognize(&image, &IdGenerator::new())
        .await
        .unwrap();

    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].question, "Mitochondria");
    assert_eq!(cards[1].question, "Osmosis");
    assert_eq!(cards[1].answer, "Diffusion of water");
    assert_ne!(cards[0].id, cards[1].id);
}

#[tokio::test]
async fn test_recognize_identical_pairs_get_distinct_ids() {
    let server = MockServer::start().await;
    counting_mock(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{ "q": "Same", "a": "pair" }, { "q": "Same", "a": "pair" }]
        })),
    )
    .await;

    let cards = client(&server.uri())
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap();

    assert_eq!(cards.len(), 2);
    assert_ne!(cards[0].id, cards[1].id);
}

#[tokio::test]
async fn test_recognize_skips_empty_pairs() {
    let server = MockServer::start().await;
    counting_mock(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({
            "cards": [{ "q": "", "a": "orphan" }, { "q": "Kept", "a": "yes" }, { "q": "No answer" }]
        })),
    )
    .await;

    let cards = client(&server.uri())
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap();

    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].question, "Kept");
}

#[tokio::test]
async fn test_missing_backend_makes_no_request() {
    let server = MockServer::start().await;
    let calls = counting_mock(&server, ResponseTemplate::new(200)).await;

    let client = OcrClient::new(OcrConfig::default()).unwrap();
    let err = client
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, OcrError::Validation(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_image_makes_no_request() {
    let server = MockServer::start().await;
    let calls = counting_mock(&server, ResponseTemplate::new(200)).await;

    let err = client(&server.uri())
        .recognize(&ImagePayload::default(), &IdGenerator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, OcrError::Validation(_)));
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_server_error_with_detail() {
    let server = MockServer::start().await;
    counting_mock(
        &server,
        ResponseTemplate::new(400).set_body_json(json!({ "detail": "Image could not be decoded" })),
    )
    .await;

    let err = client(&server.uri())
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap_err();

    match err {
        OcrError::Server { status, ref message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Image could not be decoded");
        }
        other => panic!("expected server error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "Image could not be decoded");
}

#[tokio::test]
async fn test_server_error_without_detail() {
    let server = MockServer::start().await;
    counting_mock(&server, ResponseTemplate::new(503).set_body_string("unavailable")).await;

    let err = client(&server.uri())
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "OCR request failed with status 503");
}

#[tokio::test]
async fn test_invalid_success_body() {
    let server = MockServer::start().await;
    counting_mock(&server, ResponseTemplate::new(200).set_body_string("not json")).await;

    let err = client(&server.uri())
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, OcrError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let err = client(&uri)
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap_err();

    assert!(matches!(err, OcrError::Network(_)));
    assert!(err.user_message().contains("try again"));
}

#[tokio::test]
async fn test_custom_endpoint_path() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v2/recognize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "cards": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let config = OcrConfig {
        endpoint_path: "v2/recognize".to_string(),
        ..OcrConfig::with_base_url(format!("{}/", server.uri()))
    };
    let cards = OcrClient::new(config)
        .unwrap()
        .recognize(&image(), &IdGenerator::new())
        .await
        .unwrap();

    assert!(cards.is_empty());
}

#[tokio::test]
async fn test_session_merges_each_call_as_new_batch() {
    let server = MockServer::start().await;
    counting_mock(
        &server,
        ResponseTemplate::new(200).set_body_json(json!({ "cards": [{ "q": "Q", "a": "A" }] })),
    )
    .await;

    let mut session = Session::new(DelimiterSynthesizer::new(), client(&server.uri()));
    session.generate_from_text("Typed: first");

    assert_eq!(session.recognize_image(&image()).await.unwrap(), 1);
    assert_eq!(session.recognize_image(&image()).await.unwrap(), 1);

    let questions: Vec<_> = session.store().iter().map(|c| c.question.as_str()).collect();
    assert_eq!(questions, vec!["Typed", "Q", "Q"]);
    assert_ne!(session.store().cards()[1].id, session.store().cards()[2].id);
}

#[tokio::test]
async fn test_session_failure_leaves_deck_untouched() {
    let server = MockServer::start().await;
    counting_mock(&server, ResponseTemplate::new(500)).await;

    let mut session = Session::new(DelimiterSynthesizer::new(), client(&server.uri()));
    session.generate_from_text("a\nb");

    assert!(session.recognize_image(&image()).await.is_err());
    assert_eq!(session.count(), 2);
    assert!(!session.is_busy());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_session_busy_while_request_in_flight() {
    let server = MockServer::start().await;
    counting_mock(
        &server,
        ResponseTemplate::new(200)
            .set_body_json(json!({ "cards": [] }))
            .set_delay(Duration::from_millis(300)),
    )
    .await;

    let mut session = Session::new(DelimiterSynthesizer::new(), client(&server.uri()));
    let busy = session.busy_flag();
    let image = image();

    let (result, observed) = tokio::join!(session.recognize_image(&image), async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        busy.load(Ordering::SeqCst)
    });

    assert!(result.is_ok());
    assert!(observed);
    assert!(!session.is_busy());
}
