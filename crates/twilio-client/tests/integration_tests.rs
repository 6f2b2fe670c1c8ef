//! Integration tests for twilio-client against a mock Messages API.

use std::time::Duration;

use serde_json::json;
use twilio_client::{Channel, TwilioClient, TwilioConfig, TwilioError};
use wiremock::matchers::{body_string_contains, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MESSAGES_PATH: &str = "/2010-04-01/Accounts/ACtest/Messages.json";

fn client(server: &MockServer) -> TwilioClient {
    let config = TwilioConfig {
        timeout: Duration::from_secs(5),
        ..TwilioConfig::new(server.uri(), "ACtest", "secret", "+15550009999")
    };
    TwilioClient::new(config).unwrap()
}

fn accepted(sid: &str) -> ResponseTemplate {
    ResponseTemplate::new(201).set_body_json(json!({
        "sid": sid,
        "status": "queued",
        "error_code": null,
        "error_message": null
    }))
}

fn form_body(request: &wiremock::Request) -> String {
    let raw = String::from_utf8(request.body.clone()).unwrap();
    urlencoding::decode(&raw.replace('+', " ")).unwrap().into_owned()
}

#[tokio::test]
async fn sms_send_posts_form_with_basic_auth() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(header_exists("authorization"))
        .respond_with(accepted("SM100"))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = client(&server).send_sms("+15550001111", "Hello there").await;
    assert!(outcome.success);
    assert_eq!(outcome.sid.as_deref(), Some("SM100"));
    assert!(outcome.error.is_none());

    let requests = server.received_requests().await.unwrap();
    let auth = requests[0].headers.get("authorization").unwrap().to_str().unwrap();
    assert!(auth.starts_with("Basic "));

    let body = form_body(&requests[0]);
    assert!(body.contains("To=+15550001111"));
    assert!(body.contains("From=+15550009999"));
    assert!(body.contains("Body=Hello there"));
}

#[tokio::test]
async fn whatsapp_send_prefixes_both_ends() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(MESSAGES_PATH))
        .and(body_string_contains("whatsapp"))
        .respond_with(accepted("SM200"))
        .mount(&server)
        .await;

    let outcome = client(&server)
        .send_whatsapp("whatsapp:+15550001111", "Hi from Aura")
        .await;
    assert!(outcome.success);

    let requests = server.received_requests().await.unwrap();
    let body = form_body(&requests[0]);
    assert!(body.contains("To=whatsapp:+15550001111"));
    assert!(body.contains("From=whatsapp:+15550009999"));
    assert!(!body.contains("whatsapp:whatsapp:"));
}

#[tokio::test]
async fn provider_rejection_reports_error_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 21211,
            "message": "The 'To' number is not a valid phone number.",
            "status": 400
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let outcome = client.send_sms("12", "hi").await;
    assert!(!outcome.success);
    assert!(outcome.sid.is_none());
    assert_eq!(
        outcome.error.as_deref(),
        Some("The 'To' number is not a valid phone number.")
    );
}

#[tokio::test]
async fn create_message_surfaces_api_error_code() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 20003,
            "message": "Authenticate"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_message(Channel::Sms, "+15550001111", "hi")
        .await
        .unwrap_err();
    match err {
        TwilioError::Api { status, code, message } => {
            assert_eq!(status, 401);
            assert_eq!(code, Some(20003));
            assert_eq!(message, "Authenticate");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn server_error_is_retried_once() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(accepted("SM300"))
        .mount(&server)
        .await;

    let outcome = client(&server).send_sms("+15550001111", "retry me").await;
    assert!(outcome.success);
    assert_eq!(outcome.sid.as_deref(), Some("SM300"));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn persistent_server_error_fails_after_retry() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(2)
        .mount(&server)
        .await;

    let outcome = client(&server).send_sms("+15550001111", "hi").await;
    assert!(!outcome.success);
    assert_eq!(outcome.error.as_deref(), Some("boom"));
}

#[tokio::test]
async fn templates_are_sent_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(accepted("SM400"))
        .mount(&server)
        .await;

    let client = client(&server);
    assert!(client.send_daily_tip("+15550001111", "Smile").await.success);
    assert!(client.send_response_reminder("+15550001111", "Dana").await.success);
    assert!(client.send_emergency_help("+15550001111", "Ask about her dog").await.success);

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    assert!(form_body(&requests[0]).contains("Daily Dating Tip: Smile"));
    assert!(form_body(&requests[1]).contains("Gentle reminder: Dana sent you a message!"));
    assert!(form_body(&requests[2]).contains("\"Ask about her dog\""));
}
