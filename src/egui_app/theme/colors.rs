//! Color Constants for the RemoteDesk Dark Theme
//!
//! Near-black zinc surfaces with a single lime accent for primary actions.

use eframe::egui::Color32;

/// Window background
pub const BG_DARK: Color32 = Color32::from_rgb(0x09, 0x09, 0x0B);

/// Cards, panels and the top bar
pub const PANEL_BG: Color32 = Color32::from_rgb(0x18, 0x18, 0x1B);

/// Text inputs and inactive widgets
pub const INPUT_BG: Color32 = Color32::from_rgb(0x27, 0x27, 0x2A);

/// Panel and card borders
pub const BORDER: Color32 = Color32::from_rgb(0x3F, 0x3F, 0x46);

/// Hovered widget background
pub const HOVER_ITEM: Color32 = Color32::from_rgb(0x3F, 0x3F, 0x46);

/// Primary accent - Lime
pub const ACCENT: Color32 = Color32::from_rgb(0xCC, 0xFF, 0x00);

/// Text drawn on top of the accent
pub const TEXT_ON_ACCENT: Color32 = Color32::from_rgb(0x09, 0x09, 0x0B);

/// Primary text color
pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(0xFA, 0xFA, 0xFA);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0xA1, 0xA1, 0xAA);

/// Labels and timestamps
pub const TEXT_MUTED: Color32 = Color32::from_rgb(0x71, 0x71, 0x7A);

/// Online status indicator - Green
pub const STATUS_ONLINE: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);

/// Offline status indicator - Gray
pub const STATUS_OFFLINE: Color32 = Color32::from_rgb(0x71, 0x71, 0x7A);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x22, 0xC5, 0x5E);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xEF, 0x44, 0x44);

/// Info color - Blue
pub const INFO: Color32 = Color32::from_rgb(0x3B, 0x82, 0xF6);

/// Warning color - Amber
pub const WARNING: Color32 = Color32::from_rgb(0xF5, 0x9E, 0x0B);
