//! Dashboard loading
//!
//! Each dashboard is a read-only snapshot of what the server returned. The
//! reads behind a snapshot are issued together and joined; if any of them
//! fails the whole load fails with a single message and nothing partial is
//! kept.

use chrono::{DateTime, Utc};

use crate::egui_app::api::ApiClient;
use crate::shared::error::ClientError;
use crate::shared::format;
use crate::shared::models::{
    AdminStats, Device, Identity, RemoteSession, SessionStatus, Subscription, UserRecord,
};

pub const USER_DASHBOARD_ERROR: &str = "Failed to load dashboard data";
pub const ADMIN_DASHBOARD_ERROR: &str = "Failed to load admin data";

/// Devices, subscription and session history for the signed-in user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserDashboard {
    pub identity: Option<Identity>,
    pub devices: Vec<Device>,
    pub subscription: Option<Subscription>,
    pub sessions: Vec<RemoteSession>,
}

impl UserDashboard {
    pub fn has_active_subscription(&self) -> bool {
        self.subscription
            .as_ref()
            .map(Subscription::is_active)
            .unwrap_or(false)
    }

    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        match &self.subscription {
            Some(subscription) if subscription.is_active() => {
                format::days_remaining(subscription.end_date.as_ref(), now)
            }
            _ => 0,
        }
    }

    /// `(used, allowed)` device slots.
    pub fn device_slots(&self) -> (usize, usize) {
        (
            self.devices.len(),
            format::device_limit(self.subscription.is_some()),
        )
    }

    pub fn online_devices(&self) -> usize {
        self.devices.iter().filter(|device| device.online).count()
    }

    /// The newest session the server still reports as running.
    pub fn running_session(&self) -> Option<&RemoteSession> {
        self.sessions
            .iter()
            .filter(|session| session.status == SessionStatus::Active)
            .max_by_key(|session| session.started_at)
    }
}

/// Global statistics, every account and every session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdminDashboard {
    pub stats: AdminStats,
    pub users: Vec<UserRecord>,
    pub sessions: Vec<RemoteSession>,
}

/// State of one dashboard as seen by its view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardLoad<T> {
    Loading,
    Ready(T),
    Failed { message: String },
}

impl<T> Default for DashboardLoad<T> {
    fn default() -> Self {
        DashboardLoad::Loading
    }
}

impl<T> DashboardLoad<T> {
    /// Collapse a fetch result; every error becomes `message`.
    pub fn from_result(result: Result<T, ClientError>, message: &str) -> Self {
        match result {
            Ok(snapshot) => DashboardLoad::Ready(snapshot),
            Err(e) => {
                tracing::error!("{}: {}", message, e);
                DashboardLoad::Failed {
                    message: message.to_string(),
                }
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, DashboardLoad::Loading)
    }

    pub fn snapshot(&self) -> Option<&T> {
        match self {
            DashboardLoad::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DashboardLoad::Failed { message } => Some(message),
            _ => None,
        }
    }
}

/// Fetch the device list, account info and session history together.
pub async fn load_user_dashboard(api: &ApiClient) -> Result<UserDashboard, ClientError> {
    let (devices, me, sessions) =
        tokio::try_join!(api.list_devices(), api.me(), api.list_sessions())?;
    tracing::debug!(
        "Loaded dashboard: {} devices, {} sessions",
        devices.len(),
        sessions.len()
    );
    Ok(UserDashboard {
        identity: Some(me.identity),
        devices,
        subscription: me.subscription,
        sessions,
    })
}

/// Fetch stats, users and sessions together.
pub async fn load_admin_dashboard(api: &ApiClient) -> Result<AdminDashboard, ClientError> {
    let (stats, users, sessions) = tokio::try_join!(
        api.admin_stats(),
        api.admin_users(),
        api.admin_sessions()
    )?;
    tracing::debug!(
        "Loaded admin data: {} users, {} sessions",
        users.len(),
        sessions.len()
    );
    Ok(AdminDashboard {
        stats,
        users,
        sessions,
    })
}
