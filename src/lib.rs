//! RemoteDesk - Desktop Client Library
//!
//! Native client for the RemoteDesk Pro remote-access service: account
//! login and registration, a device and subscription dashboard, checkout
//! with a local price estimate, device registration and an admin panel.
//!
//! # Module Structure
//!
//! - **`shared`** - UI-independent types
//!   - Wire models, error taxonomy, configuration
//!   - Subscription pricing and display helpers
//!
//! - **`egui_app`** - Native desktop app (egui/eframe)
//!   - Typed API client and credential storage
//!   - Session context, route guard and dashboard loading
//!   - Views for every route
//!
//! # Usage
//!
//! ```rust,no_run
//! use remotedesk::egui_app::{ApiClient, SessionAuthState, FileCredentialStore};
//! use remotedesk::shared::AppConfig;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
//! let mut session = SessionAuthState::new(ApiClient::new(&config)?, store);
//! session.restore().await;
//! if session.current().is_none() {
//!     session.login("ada@example.com", "hunter2").await?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! - **UI**: egui is single-threaded immediate mode; `AppState` lives on the UI thread
//! - **Network**: requests run on a tokio runtime and report back over channels

/// Shared types and data structures
pub mod shared;

/// egui native desktop app
pub mod egui_app;
