use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::{Value, json};

use kizhoo_relay::api::handler::{dispatch, process_request};
use kizhoo_relay::core::models::Contact;
use kizhoo_relay::errors::RelayError;
use kizhoo_relay::telegram::Notifier;

// ============================================================================
// Test doubles and fixtures
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Call {
    Text(String),
    Photo { photo: String, caption: String },
}

/// Records every outbound call and replays scripted results; an exhausted
/// script answers success.
#[derive(Default)]
struct FakeNotifier {
    calls: Mutex<Vec<(Call, Instant)>>,
    text_script: Mutex<VecDeque<Result<Value, RelayError>>>,
    photo_script: Mutex<VecDeque<Result<Value, RelayError>>>,
}

impl FakeNotifier {
    fn failing_photo() -> Result<Value, RelayError> {
        Err(RelayError::PhotoApi {
            status: 400,
            body: "Bad Request: IMAGE_PROCESS_FAILED".to_string(),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(call, _)| call.clone())
            .collect()
    }

    fn instants(&self) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }
}

#[async_trait]
impl Notifier for FakeNotifier {
    async fn send_text(&self, text: &str) -> Result<Value, RelayError> {
        self.calls
            .lock()
            .unwrap()
            .push((Call::Text(text.to_string()), Instant::now()));
        self.text_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"ok": true})))
    }

    async fn send_photo(&self, photo: &str, caption: &str) -> Result<Value, RelayError> {
        self.calls.lock().unwrap().push((
            Call::Photo {
                photo: photo.to_string(),
                caption: caption.to_string(),
            },
            Instant::now(),
        ));
        self.photo_script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({"ok": true})))
    }
}

fn contact_with_photos(count: usize) -> Contact {
    Contact {
        username: "Budi".to_string(),
        message: "Apa kabar?".to_string(),
        photos: (0..count).map(|i| format!("data:image/jpeg;base64,photo-{i}")).collect(),
    }
}

fn post_event(body: &str) -> Value {
    json!({
        "httpMethod": "POST",
        "headers": {"content-type": "application/json"},
        "body": body,
    })
}

/// A config-load failure; also guards test paths that must not dispatch.
fn missing_config() -> Result<kizhoo_relay::core::config::AppConfig, String> {
    Err("BOT_TOKEN tidak ditemukan".to_string())
}

fn body_of(response: &Value) -> Value {
    let body = response["body"].as_str().expect("body should be a string");
    serde_json::from_str(body).expect("body should be JSON")
}

// ============================================================================
// Method gate
// ============================================================================

#[tokio::test]
async fn test_options_preflight_gets_empty_200() {
    let event = json!({"httpMethod": "OPTIONS"});
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 200);
    assert_eq!(response["body"], "");
}

#[tokio::test]
async fn test_non_post_methods_get_405() {
    for method in ["GET", "PUT", "DELETE", "PATCH"] {
        let event = json!({"httpMethod": method});
        let response = process_request(&event, missing_config()).await;

        assert_eq!(response["statusCode"], 405, "method {method}");
        let body = body_of(&response);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "METHOD_NOT_ALLOWED");
    }
}

#[tokio::test]
async fn test_function_url_event_shape_is_understood() {
    // Function URL payloads nest the method under requestContext.http
    let event = json!({
        "requestContext": {"http": {"method": "OPTIONS"}},
    });
    let response = process_request(&event, missing_config()).await;
    assert_eq!(response["statusCode"], 200);
}

// ============================================================================
// Validation and configuration
// ============================================================================

#[tokio::test]
async fn test_blank_username_is_rejected_before_message() {
    // Both fields blank: username is reported first
    let event = post_event(r#"{"username": "   ", "message": ""}"#);
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 400);
    let body = body_of(&response);
    assert_eq!(body["error"], "VALIDASI_ERROR");
    assert_eq!(body["field"], "username");
}

#[tokio::test]
async fn test_blank_message_is_rejected() {
    let event = post_event(r#"{"username": "Budi", "message": "  "}"#);
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 400);
    let body = body_of(&response);
    assert_eq!(body["error"], "VALIDASI_ERROR");
    assert_eq!(body["field"], "message");
}

#[tokio::test]
async fn test_unreadable_body_behaves_like_empty_submission() {
    let event = post_event("this is not json");
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 400);
    assert_eq!(body_of(&response)["field"], "username");
}

#[tokio::test]
async fn test_missing_body_behaves_like_empty_submission() {
    let event = json!({"httpMethod": "POST"});
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 400);
    assert_eq!(body_of(&response)["field"], "username");
}

#[tokio::test]
async fn test_missing_configuration_gets_500_with_details() {
    let event = post_event(r#"{"username": "Budi", "message": "Halo"}"#);
    let response = process_request(&event, missing_config()).await;

    assert_eq!(response["statusCode"], 500);
    let body = body_of(&response);
    assert_eq!(body["error"], "CONFIGURATION_ERROR");
    assert_eq!(body["details"], "BOT_TOKEN tidak ditemukan");
}

// ============================================================================
// Dispatch
// ============================================================================

#[tokio::test]
async fn test_text_only_submission_sends_exactly_one_text() {
    let notifier = FakeNotifier::default();
    let contact = contact_with_photos(0);

    dispatch(&notifier, &contact).await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        Call::Text(text) => {
            assert!(text.contains("Budi"));
            assert!(text.contains("Apa kabar?"));
            assert!(text.contains("Pesan ini dikirim melalui To-Kizhoo"));
        }
        other => panic!("expected a text send, got {other:?}"),
    }
}

#[tokio::test]
async fn test_photos_are_sent_with_captions_and_no_text() {
    let notifier = FakeNotifier::default();
    let contact = contact_with_photos(2);

    dispatch(&notifier, &contact).await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls.len(), 2);
    match &calls[0] {
        Call::Photo { photo, caption } => {
            assert_eq!(photo, &contact.photos[0]);
            assert!(caption.contains("**Nama:** Budi"));
            assert!(caption.contains("**Pesan:** Apa kabar?"));
        }
        other => panic!("expected a photo send, got {other:?}"),
    }
    match &calls[1] {
        Call::Photo { photo, caption } => {
            assert_eq!(photo, &contact.photos[1]);
            assert_eq!(caption, "📸 Foto 2 dari Budi");
        }
        other => panic!("expected a photo send, got {other:?}"),
    }
}

#[tokio::test]
async fn test_first_photo_failure_falls_back_to_text() {
    let notifier = FakeNotifier::default();
    notifier
        .photo_script
        .lock()
        .unwrap()
        .push_back(FakeNotifier::failing_photo());
    let contact = contact_with_photos(3);

    dispatch(&notifier, &contact).await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls.len(), 4);

    // Failed first photo, then the text fallback with the full caption
    assert!(matches!(&calls[0], Call::Photo { .. }));
    match &calls[1] {
        Call::Text(text) => {
            assert!(text.contains("**Nama:** Budi"));
            // The fallback is the bare caption, not the footer variant
            assert!(!text.contains("Pesan ini dikirim melalui To-Kizhoo"));
        }
        other => panic!("expected the text fallback, got {other:?}"),
    }

    // Remaining photos still attempted, in order
    assert!(matches!(&calls[2], Call::Photo { photo, .. } if photo == &contact.photos[1]));
    assert!(matches!(&calls[3], Call::Photo { photo, .. } if photo == &contact.photos[2]));
}

#[tokio::test]
async fn test_secondary_photo_failure_is_swallowed() {
    let notifier = FakeNotifier::default();
    {
        let mut script = notifier.photo_script.lock().unwrap();
        script.push_back(Ok(json!({"ok": true}))); // photo 1
        script.push_back(Ok(json!({"ok": true}))); // photo 2
        script.push_back(FakeNotifier::failing_photo()); // photo 3
    }
    let contact = contact_with_photos(3);

    // Photo 3 failing must not fail the dispatch
    dispatch(&notifier, &contact).await.unwrap();

    let calls = notifier.calls();
    assert_eq!(calls.len(), 3);
    assert!(calls.iter().all(|c| matches!(c, Call::Photo { .. })));
}

#[tokio::test]
async fn test_secondary_photos_are_paced() {
    let notifier = FakeNotifier::default();
    let contact = contact_with_photos(3);

    dispatch(&notifier, &contact).await.unwrap();

    let instants = notifier.instants();
    assert_eq!(instants.len(), 3);

    // 300ms spacing between the successive secondary sends
    let gap = instants[2].duration_since(instants[1]);
    assert!(gap >= Duration::from_millis(300), "gap was {gap:?}");
}

#[tokio::test]
async fn test_text_failure_propagates() {
    let notifier = FakeNotifier::default();
    notifier.text_script.lock().unwrap().push_back(Err(RelayError::Api {
        status: 401,
        body: "Unauthorized".to_string(),
    }));
    let contact = contact_with_photos(0);

    let result = dispatch(&notifier, &contact).await;
    assert!(matches!(result, Err(RelayError::Api { status: 401, .. })));
}

#[tokio::test]
async fn test_fallback_text_failure_propagates() {
    let notifier = FakeNotifier::default();
    notifier
        .photo_script
        .lock()
        .unwrap()
        .push_back(FakeNotifier::failing_photo());
    notifier.text_script.lock().unwrap().push_back(Err(RelayError::Api {
        status: 403,
        body: "Forbidden".to_string(),
    }));
    let contact = contact_with_photos(1);

    let result = dispatch(&notifier, &contact).await;
    assert!(matches!(result, Err(RelayError::Api { status: 403, .. })));
}
