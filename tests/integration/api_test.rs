//! API client tests: paths, headers, bodies and error mapping

use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use remotedesk::shared::models::{DeviceRegistration, PaymentStatus, SessionStatus};
use remotedesk::shared::pricing::{quote_days, round_currency, DurationSelection};
use remotedesk::egui_app::ApiClient;
use remotedesk::shared::{AppConfig, ClientError, ErrorKind};
use rust_decimal::Decimal;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::*;
use crate::{assert_contains, assert_ok};

#[tokio::test]
async fn test_login_posts_credentials() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .and(body_json(json!({ "email": "ada@example.com", "password": "pw" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(auth_response_json("user")))
        .expect(1)
        .mount(&server)
        .await;

    let response = assert_ok!(client_for(&server).login("ada@example.com", "pw").await);
    assert_eq!(response.access_token, TOKEN);
    assert_eq!(response.user.email, "ada@example.com");
}

#[tokio::test]
async fn test_login_rejection_keeps_server_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(detail("Invalid credentials")))
        .mount(&server)
        .await;

    let err = client_for(&server).login("ada@example.com", "bad").await.unwrap_err();
    assert_eq!(err, ClientError::authentication("Invalid credentials"));
    assert_eq!(err.user_message(), "Invalid credentials");
}

#[tokio::test]
async fn test_register_conflict_is_authentication_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(detail("Email already registered")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register("ada@example.com", "pw", "Ada")
        .await
        .unwrap_err();
    assert_matches!(err, ClientError::Authentication { ref message } if message == "Email already registered");
}

#[tokio::test]
async fn test_validation_detail_list_is_joined() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/auth/register"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "detail": [
                { "loc": ["body", "email"], "msg": "value is not a valid email address", "type": "value_error" }
            ]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .register("nope", "pw", "Ada")
        .await
        .unwrap_err();
    assert_contains!(err.user_message(), "not a valid email");
}

#[tokio::test]
async fn test_authorized_calls_send_bearer_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/device/list"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(devices_json()))
        .expect(1)
        .mount(&server)
        .await;

    let devices = assert_ok!(client_for(&server).with_token(TOKEN).list_devices().await);
    assert_eq!(devices.len(), 2);
    assert_eq!(devices[0].display_name(), "office-pc");
    assert!(devices[0].online);
    assert!(!devices[1].online);
}

#[tokio::test]
async fn test_authorized_call_without_token_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let err = client_for(&server).me().await.unwrap_err();
    assert_matches!(err, ClientError::Authentication { .. });
}

#[tokio::test]
async fn test_forbidden_is_denied() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/stats"))
        .respond_with(ResponseTemplate::new(403).set_body_json(detail("Admin access required")))
        .mount(&server)
        .await;

    let err = client_for(&server).with_token(TOKEN).admin_stats().await.unwrap_err();
    assert_eq!(err, ClientError::denied("Admin access required"));
}

#[tokio::test]
async fn test_server_error_without_body_uses_reason() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/admin/users"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).with_token(TOKEN).admin_users().await.unwrap_err();
    assert_eq!(err, ClientError::server(500, "Internal Server Error"));
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client_for(&server).with_token(TOKEN).me().await.unwrap_err();
    assert_matches!(err, ClientError::Decode { .. });
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Grab a free port and release it so nothing is listening there.
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = AppConfig::builder()
        .server_url(format!("http://127.0.0.1:{}", port))
        .request_timeout_secs(2)
        .build()
        .unwrap();
    let client = ApiClient::new(&config).unwrap();

    let err = client.login("ada@example.com", "pw").await.unwrap_err();
    assert_matches!(err, ClientError::Network { .. });
    assert_eq!(err.user_message(), "Unable to reach the server");
}

#[tokio::test]
async fn test_server_price_matches_local_quote() {
    let server = MockServer::start().await;
    for (days, amount) in [(1, 5.0), (29, 145.0), (30, 142.5), (90, 405.0), (180, 765.0), (365, 1551.25)] {
        Mock::given(method("POST"))
            .and(path("/api/subscription/calculate"))
            .and(body_json(json!({ "duration_days": days })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "duration_days": days, "amount": amount })),
            )
            .mount(&server)
            .await;
    }

    let client = client_for(&server);
    for days in [1, 29, 30, 90, 180, 365] {
        let selection = DurationSelection::new(days).unwrap();
        let price = assert_ok!(client.calculate_price(selection).await);
        let local = quote_days(days).unwrap();
        assert_eq!(price.duration_days, days);
        assert_eq!(round_currency(price.amount), local.total_amount, "{} days", days);
    }
}

#[tokio::test]
async fn test_checkout_and_payment_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/subscription/create"))
        .and(header("authorization", format!("Bearer {}", TOKEN).as_str()))
        .and(body_json(json!({ "duration_days": 90 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "subscription_id": "s-9",
            "payment_id": "p-9",
            "amount": 405.0,
            "payment_url": "https://pay.example.com/p-9",
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/payment/p-9/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p-9",
            "subscription_id": "s-9",
            "amount": 405.0,
            "status": "completed",
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token(TOKEN);
    let checkout = assert_ok!(client.create_subscription(DurationSelection::new(90).unwrap()).await);
    assert_eq!(checkout.amount, Decimal::new(405, 0));
    assert_eq!(checkout.payment_url.as_deref(), Some("https://pay.example.com/p-9"));

    let payment = assert_ok!(client.payment_status(&checkout.payment_id).await);
    assert_eq!(payment.status, PaymentStatus::Completed);
}

#[tokio::test]
async fn test_device_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/device/register"))
        .and(body_json(json!({
            "mac_address": "aa:bb:cc:dd:ee:ff",
            "cpu_id": "CPU1",
            "hostname": "office-pc",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "device_id": "d-7",
            "device_secret": "secret",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/start"))
        .and(query_param("device_id", "d-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "session_id": "sess-1",
            "device_id": "d-7",
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/session/sess-1/end"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Session ended" })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/device/d-7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "Device deleted" })))
        .mount(&server)
        .await;

    let client = client_for(&server).with_token(TOKEN);
    let registration = DeviceRegistration {
        mac_address: "aa:bb:cc:dd:ee:ff".to_string(),
        cpu_id: "CPU1".to_string(),
        hostname: "office-pc".to_string(),
        os_version: None,
    };
    let credentials = assert_ok!(client.register_device(&registration).await);
    assert_eq!(credentials.device_id, "d-7");

    let started = assert_ok!(client.start_session(&credentials.device_id).await);
    assert_eq!(started.session_id, "sess-1");

    let ended = assert_ok!(client.end_session(&started.session_id).await);
    assert_eq!(ended.message, "Session ended");

    let deleted = assert_ok!(client.delete_device("d-7").await);
    assert_eq!(deleted.message, "Device deleted");
}

#[tokio::test]
async fn test_device_limit_message_is_shown_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/device/register"))
        .respond_with(ResponseTemplate::new(403).set_body_json(detail("Device limit reached (1 devices)")))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .with_token(TOKEN)
        .register_device(&DeviceRegistration::default())
        .await
        .unwrap_err();
    assert_eq!(err.user_message(), "Device limit reached (1 devices)");
}

#[tokio::test]
async fn test_list_sessions() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/session/list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sessions_json()))
        .mount(&server)
        .await;

    let sessions = assert_ok!(client_for(&server).with_token(TOKEN).list_sessions().await);
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0].status, SessionStatus::Ended);
    assert!(sessions[0].ended_at.is_some());
}

#[tokio::test]
async fn test_slow_server_times_out_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/auth/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(me_json("user", None))
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let config = AppConfig::builder()
        .server_url(server.uri())
        .request_timeout_secs(1)
        .build()
        .unwrap();
    let client = ApiClient::new(&config).unwrap().with_token(TOKEN);

    let err = client.me().await.unwrap_err();
    assert_matches!(err, ClientError::Network { .. });
    assert_eq!(err.kind(), ErrorKind::NetworkFailure);
}
