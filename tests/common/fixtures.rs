//! Response bodies shaped like the backend's.

use serde_json::{json, Value};

pub const TOKEN: &str = "test-token-abc";

pub fn user_json(role: &str) -> Value {
    json!({
        "id": "u-1",
        "email": "ada@example.com",
        "name": "Ada",
        "role": role,
    })
}

pub fn auth_response_json(role: &str) -> Value {
    json!({
        "access_token": TOKEN,
        "token_type": "bearer",
        "user": user_json(role),
    })
}

pub fn me_json(role: &str, subscription: Option<Value>) -> Value {
    let mut me = user_json(role);
    me["subscription"] = subscription.unwrap_or(Value::Null);
    me
}

pub fn active_subscription_json() -> Value {
    json!({
        "id": "s-1",
        "status": "active",
        "duration_days": 30,
        "amount": 142.5,
        "start_date": "2025-03-01T00:00:00Z",
        "end_date": "2025-03-31T00:00:00Z",
    })
}

pub fn devices_json() -> Value {
    json!([
        {
            "id": "d-1",
            "hostname": "office-pc",
            "online": true,
            "os_version": "Windows 11",
            "last_seen": "2025-03-02T10:00:00Z",
            "user_id": "u-1",
        },
        {
            "id": "d-2",
            "hostname": "laptop",
            "online": false,
        }
    ])
}

pub fn sessions_json() -> Value {
    json!([
        {
            "id": "row-1",
            "session_id": "sess-1",
            "user_id": "u-1",
            "device_id": "d-1",
            "status": "ended",
            "started_at": "2025-03-02T10:00:00Z",
            "ended_at": "2025-03-02T11:00:00Z",
        }
    ])
}

pub fn detail(message: &str) -> Value {
    json!({ "detail": message })
}
