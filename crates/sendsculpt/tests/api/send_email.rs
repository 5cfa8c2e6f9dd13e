use sendsculpt::{SendEmailRequest, SendSculptClient, SendSculptError, ValidationError};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{any, header, method, path},
};

use crate::helpers::{API_KEY, spawn_app, valid_request};

#[tokio::test]
async fn send_email_returns_message_id_and_status() {
    let app = spawn_app("live").await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .and(header("x-sendsculpt-key", API_KEY))
        .and(header("Content-Type", "application/json"))
        .and(header("Accept", "application/json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"message_id":"test-msg-id","status":"sent"}"#),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let response = app.client.send_email(&valid_request()).await.unwrap();

    assert_eq!(response.message_id, "test-msg-id");
    assert_eq!(response.status, "sent");
}

#[tokio::test]
async fn send_email_serializes_fields_in_snake_case() {
    let app = spawn_app("live").await;
    app.mount_success().await;

    let request = SendEmailRequest::new(["a@example.com", "b@example.com"], "Hi", "noreply@example.com")
        .with_body_html("<p>Hi</p>")
        .with_cc(["cc@example.com"])
        .with_bcc(["bcc@example.com"])
        .with_reply_to(["reply@example.com"])
        .with_sender_name("Example Team");

    app.client.send_email(&request).await.unwrap();

    let body = app.sent_body().await;
    assert_eq!(body["to"], serde_json::json!(["a@example.com", "b@example.com"]));
    assert_eq!(body["subject"], "Hi");
    assert_eq!(body["from_email"], "noreply@example.com");
    assert_eq!(body["body_html"], "<p>Hi</p>");
    assert_eq!(body["cc"][0], "cc@example.com");
    assert_eq!(body["bcc"][0], "bcc@example.com");
    assert_eq!(body["reply_to"][0], "reply@example.com");
    assert_eq!(body["sender_name"], "Example Team");
    assert_eq!(body["environment"], "live");

    let object = body.as_object().unwrap();
    assert!(!object.contains_key("body_text"));
    assert!(!object.contains_key("template_id"));
    assert!(!object.contains_key("template_data"));
    assert!(!object.contains_key("attachments"));
}

#[tokio::test]
async fn send_email_sends_template_id_and_data() {
    let app = spawn_app("live").await;
    app.mount_success().await;

    let request = SendEmailRequest::new(["a@example.com"], "Welcome", "noreply@example.com")
        .with_template_id("welcome-v2")
        .with_template_var("name", "Ada")
        .with_template_var("count", 3);

    app.client.send_email(&request).await.unwrap();

    let body = app.sent_body().await;
    assert_eq!(body["template_id"], "welcome-v2");
    assert_eq!(body["template_data"], serde_json::json!({"name": "Ada", "count": 3}));
}

#[tokio::test]
async fn client_environment_overrides_request_environment() {
    let app = spawn_app("sandbox").await;
    app.mount_success().await;

    let mut request = valid_request();
    request.environment = Some("live".to_string());

    app.client.send_email(&request).await.unwrap();

    assert_eq!(app.sent_body().await["environment"], "sandbox");
}

#[tokio::test]
async fn error_status_returns_api_error_with_raw_body() {
    let app = spawn_app("live").await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"detail":["Error string"]}"#))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let err = app.client.send_email(&valid_request()).await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    match err {
        SendSculptError::Api { status, body } => {
            assert_eq!(status, 400);
            assert_eq!(body, r#"{"detail":["Error string"]}"#);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn server_error_is_not_retried() {
    let app = spawn_app("live").await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let err = app.client.send_email(&valid_request()).await.unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert_eq!(err.to_string(), "SendSculpt API error [503]: unavailable");
}

#[tokio::test]
async fn invalid_request_makes_no_http_call() {
    let app = spawn_app("live").await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let mut missing_to = valid_request();
    missing_to.to.clear();

    let mut missing_subject = valid_request();
    missing_subject.subject = " ".to_string();

    let mut missing_from = valid_request();
    missing_from.from_email = String::new();

    let data_without_id = valid_request().with_template_var("key", "value");
    let id_with_body = valid_request().with_template_id("uuid");

    let cases = [
        (missing_to, ValidationError::MissingTo),
        (missing_subject, ValidationError::MissingSubject),
        (missing_from, ValidationError::MissingFromEmail),
        (data_without_id, ValidationError::TemplateDataWithoutId),
        (id_with_body, ValidationError::TemplateWithBody),
    ];

    for (request, expected) in cases {
        let err = app.client.send_email(&request).await.unwrap_err();
        assert!(err.is_validation());
        match err {
            SendSculptError::Validation(rule) => assert_eq!(rule, expected),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

#[tokio::test]
async fn malformed_success_body_is_response_parse_error() {
    let app = spawn_app("live").await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let err = app.client.send_email(&valid_request()).await.unwrap_err();

    match err {
        SendSculptError::ResponseParse { body, .. } => assert_eq!(body, "not json"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn redirect_is_not_followed() {
    let app = spawn_app("live").await;
    let other_host = MockServer::start().await;

    Mock::given(any())
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"message_id": "x", "status": "sent"})),
        )
        .expect(0)
        .mount(&other_host)
        .await;

    Mock::given(method("POST"))
        .and(path("/send"))
        .respond_with(
            ResponseTemplate::new(302)
                .insert_header("Location", format!("{}/elsewhere", other_host.uri()).as_str()),
        )
        .expect(1)
        .mount(&app.email_server)
        .await;

    let err = app.client.send_email(&valid_request()).await.unwrap_err();

    assert!(matches!(err, SendSculptError::ResponseParse { .. }));
    assert!(other_host.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let client = SendSculptClient::new(API_KEY)
        .unwrap()
        .with_base_url("http://127.0.0.1:1");

    let err = client.send_email(&valid_request()).await.unwrap_err();

    assert!(matches!(err, SendSculptError::Transport(_)));
}
