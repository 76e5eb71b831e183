//! Dashboard aggregation: concurrent reads, all-or-nothing failure

use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use remotedesk::egui_app::dashboard::{
    load_admin_dashboard, load_user_dashboard, DashboardLoad, ADMIN_DASHBOARD_ERROR,
    USER_DASHBOARD_ERROR,
};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::assert_ok;
use crate::common::*;

async fn mount_json(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_user_dashboard_joins_devices_and_account() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/device/list", 200, devices_json()).await;
    mount_json(&server, "/api/auth/me", 200, me_json("user", Some(active_subscription_json()))).await;
    mount_json(&server, "/api/session/list", 200, sessions_json()).await;

    let client = client_for(&server).with_token(TOKEN);
    let snapshot = assert_ok!(load_user_dashboard(&client).await);

    assert_eq!(snapshot.devices.len(), 2);
    assert_eq!(snapshot.device_slots(), (2, 10));
    assert_eq!(snapshot.online_devices(), 1);
    assert!(snapshot.has_active_subscription());
    assert_eq!(snapshot.sessions.len(), 1);
    assert!(snapshot.running_session().is_none());

    let now = Utc.with_ymd_and_hms(2025, 3, 21, 12, 0, 0).unwrap();
    assert_eq!(snapshot.days_remaining(now), 10);
}

#[tokio::test]
async fn test_user_dashboard_without_subscription() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/device/list", 200, json!([])).await;
    mount_json(&server, "/api/auth/me", 200, me_json("user", None)).await;
    mount_json(&server, "/api/session/list", 200, json!([])).await;

    let client = client_for(&server).with_token(TOKEN);
    let snapshot = assert_ok!(load_user_dashboard(&client).await);

    assert!(snapshot.devices.is_empty());
    assert_eq!(snapshot.device_slots(), (0, 1));
    assert_eq!(snapshot.days_remaining(Utc::now()), 0);
}

#[tokio::test]
async fn test_any_failed_read_fails_the_user_dashboard() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/device/list", 500, detail("boom")).await;
    mount_json(&server, "/api/auth/me", 200, me_json("user", None)).await;
    mount_json(&server, "/api/session/list", 200, json!([])).await;

    let client = client_for(&server).with_token(TOKEN);
    let load = DashboardLoad::from_result(load_user_dashboard(&client).await, USER_DASHBOARD_ERROR);

    assert_eq!(load.error(), Some(USER_DASHBOARD_ERROR));
    assert!(load.snapshot().is_none());
}

#[tokio::test]
async fn test_failed_session_history_fails_the_user_dashboard() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/device/list", 200, devices_json()).await;
    mount_json(&server, "/api/auth/me", 200, me_json("user", None)).await;
    mount_json(&server, "/api/session/list", 401, detail("Invalid token")).await;

    let client = client_for(&server).with_token(TOKEN);
    let load = DashboardLoad::from_result(load_user_dashboard(&client).await, USER_DASHBOARD_ERROR);

    assert_eq!(load.error(), Some(USER_DASHBOARD_ERROR));
}

#[tokio::test]
async fn test_admin_dashboard() {
    let server = MockServer::start().await;
    mount_json(
        &server,
        "/api/admin/stats",
        200,
        json!({ "total_users": 3, "active_subscriptions": 1, "online_devices": 2, "active_sessions": 1 }),
    )
    .await;
    mount_json(&server, "/api/admin/users", 200, json!([user_json("admin"), user_json("user")])).await;
    mount_json(
        &server,
        "/api/admin/sessions",
        200,
        json!([{
            "id": "row-1",
            "session_id": "sess-1",
            "user_id": "u-1",
            "device_id": "d-1",
            "status": "active",
            "started_at": "2025-03-02T10:00:00Z",
        }]),
    )
    .await;

    let client = client_for(&server).with_token(TOKEN);
    let snapshot = assert_ok!(load_admin_dashboard(&client).await);

    assert_eq!(snapshot.stats.total_users, 3);
    assert_eq!(snapshot.users.len(), 2);
    assert!(snapshot.users[0].role.is_admin());
    assert_eq!(snapshot.sessions[0].session_id, "sess-1");
    assert_eq!(snapshot.sessions[0].ended_at, None);
}

#[tokio::test]
async fn test_admin_dashboard_forbidden_for_users() {
    let server = MockServer::start().await;
    mount_json(&server, "/api/admin/stats", 403, detail("Admin access required")).await;
    mount_json(&server, "/api/admin/users", 403, detail("Admin access required")).await;
    mount_json(&server, "/api/admin/sessions", 403, detail("Admin access required")).await;

    let client = client_for(&server).with_token(TOKEN);
    let load = DashboardLoad::from_result(load_admin_dashboard(&client).await, ADMIN_DASHBOARD_ERROR);

    assert_eq!(load.error(), Some(ADMIN_DASHBOARD_ERROR));
}
