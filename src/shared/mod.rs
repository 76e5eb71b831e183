//! Shared Module
//!
//! UI-independent pieces of the client: wire types, the error taxonomy,
//! configuration, pricing and display helpers. Nothing in here touches egui.

/// Request/response bodies and domain records
pub mod models;

/// Client error types
pub mod error;

/// Application configuration
pub mod config;

/// Subscription price calculation
pub mod pricing;

/// Date and slot formatting helpers
pub mod format;

/// Re-export commonly used types for convenience
pub use config::{AppConfig, AppConfigBuilder, ConfigError};
pub use error::{ClientError, ErrorKind};
pub use models::{Device, Identity, Role, Subscription, SubscriptionStatus};
pub use pricing::{quote, DurationSelection, PriceQuote};
