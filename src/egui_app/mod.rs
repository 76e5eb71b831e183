//! egui Native Desktop Client
//!
//! The desktop front end for RemoteDesk Pro. Network calls run on a tokio
//! runtime and hand their results back to the UI thread over channels that
//! `AppState::tick` polls once per frame.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── main.rs          - Binary entry point
//! ├── api.rs           - Typed HTTP client for the backend
//! ├── credentials.rs   - Token persistence
//! ├── auth.rs          - Session identity and restore
//! ├── guard.rs         - Routes and access checks
//! ├── dashboard.rs     - User and admin dashboard loading
//! ├── notifications.rs - Toast queue
//! ├── state/           - Per-frame application state and forms
//! ├── views/           - egui rendering
//! └── theme/           - Colors and frames
//! ```

pub mod api;
pub mod auth;
pub mod credentials;
pub mod dashboard;
pub mod guard;
pub mod notifications;
pub mod state;
pub mod theme;
pub mod views;

// Re-export commonly used types
pub use api::ApiClient;
pub use auth::{AuthSession, Authenticator, SessionAuthState, SessionPhase};
pub use credentials::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
pub use dashboard::{AdminDashboard, DashboardLoad, UserDashboard};
pub use guard::{GuardDecision, Route};
pub use notifications::{NoticeLevel, Notifications};
pub use state::AppState;
