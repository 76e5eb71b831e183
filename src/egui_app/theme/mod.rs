//! Theme Module
//!
//! Color scheme and frame builders for the desktop client.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame().show(ui, |ui| {
//!     ui.colored_label(colors::TEXT_PRIMARY, "Devices");
//! });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
