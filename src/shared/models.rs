//! Wire types
//!
//! Request and response bodies for the RemoteDesk API, plus the records the
//! dashboards render. Field names match the JSON the server produces; unknown
//! fields are ignored so server-side additions do not break the client.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::shared::pricing::DurationSelection;

/// Account role. Closed set; anything else is a decode error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
    Expired,
    /// Created, waiting for the payment provider
    Pending,
    /// Payment was declined
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub id: Option<String>,
    pub status: SubscriptionStatus,
    #[serde(default)]
    pub duration_days: Option<u32>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
}

impl Subscription {
    /// Trusts the server's status; the end date is not re-checked locally.
    pub fn is_active(&self) -> bool {
        self.status == SubscriptionStatus::Active
    }
}

/// `GET /auth/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    #[serde(flatten)]
    pub identity: Identity,
    #[serde(default)]
    pub subscription: Option<Subscription>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// Login and register both answer with a token and the identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: Identity,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub hostname: String,
    #[serde(default)]
    pub online: bool,
    #[serde(default)]
    pub os_version: Option<String>,
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(default)]
    pub device_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Device {
    pub fn display_name(&self) -> &str {
        self.device_name.as_deref().unwrap_or(&self.hostname)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DeviceRegistration {
    pub mac_address: String,
    pub cpu_id: String,
    pub hostname: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os_version: Option<String>,
}

/// Returned once at registration; the secret is never listed again.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeviceCredentials {
    pub device_id: String,
    pub device_secret: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct DurationRequest {
    pub duration_days: DurationSelection,
}

/// `POST /subscription/calculate`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct PriceResponse {
    pub duration_days: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// `POST /subscription/create`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CheckoutResponse {
    pub subscription_id: String,
    pub payment_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(default)]
    pub payment_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// `GET /payment/{id}/status`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentRecord {
    pub id: String,
    pub subscription_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub status: PaymentStatus,
    #[serde(default)]
    pub payment_link_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// `GET /admin/stats`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminStats {
    pub total_users: u64,
    pub active_subscriptions: u64,
    pub online_devices: u64,
    pub active_sessions: u64,
}

/// An account as listed by `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Ended,
}

/// A remote-control session between a user and one of their devices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteSession {
    pub id: String,
    pub session_id: String,
    pub user_id: String,
    pub device_id: String,
    #[serde(default)]
    pub admin_id: Option<String>,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
    #[serde(default)]
    pub ended_at: Option<DateTime<Utc>>,
}

/// `POST /session/start`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SessionStarted {
    pub session_id: String,
    pub device_id: String,
}

/// Generic `{"message": ...}` acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// FastAPI error body. `detail` is a string for handler errors and a list
/// of objects for request validation failures.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub detail: serde_json::Value,
}

impl ApiErrorBody {
    pub fn message(&self) -> String {
        match &self.detail {
            serde_json::Value::String(message) => message.clone(),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
                .collect::<Vec<_>>()
                .join("; "),
            other => other.to_string(),
        }
    }
}
