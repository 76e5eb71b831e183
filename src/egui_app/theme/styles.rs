//! Theme Styling Functions
//!
//! Helpers that apply the dark palette consistently across views.

use eframe::egui::{self, Color32, CornerRadius, Stroke};

use super::colors;
use crate::egui_app::notifications::NoticeLevel;

/// Apply the global theme to the egui context
pub fn apply_global_theme(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.visuals = egui::Visuals::dark();

    style.visuals.window_fill = colors::PANEL_BG;
    style.visuals.window_stroke = Stroke::new(1.0, colors::BORDER);
    style.visuals.panel_fill = colors::BG_DARK;
    style.visuals.extreme_bg_color = colors::INPUT_BG;

    style.visuals.widgets.noninteractive.bg_fill = colors::PANEL_BG;
    style.visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, colors::TEXT_SECONDARY);

    style.visuals.widgets.inactive.bg_fill = colors::INPUT_BG;
    style.visuals.widgets.inactive.weak_bg_fill = colors::INPUT_BG;
    style.visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.hovered.bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.weak_bg_fill = colors::HOVER_ITEM;
    style.visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, colors::TEXT_PRIMARY);

    style.visuals.widgets.active.bg_fill = colors::ACCENT;
    style.visuals.widgets.active.fg_stroke = Stroke::new(1.0, colors::TEXT_ON_ACCENT);

    style.visuals.selection.bg_fill = colors::ACCENT;
    style.visuals.selection.stroke = Stroke::new(1.0, colors::TEXT_ON_ACCENT);

    ctx.set_style(style);
}

/// Create a frame style for the top bar
pub fn top_bar_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .inner_margin(egui::Margin::symmetric(12, 8))
}

/// Create a frame style for the central panel
pub fn page_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::BG_DARK)
        .inner_margin(egui::Margin::same(24))
}

/// Bordered card used for stats, forms and list rows
pub fn card_frame() -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(egui::Margin::same(16))
}

/// Frame for a single toast
pub fn toast_frame(level: NoticeLevel) -> egui::Frame {
    egui::Frame::new()
        .fill(colors::PANEL_BG)
        .stroke(Stroke::new(1.0, notice_color(level)))
        .corner_radius(CornerRadius::same(6))
        .inner_margin(egui::Margin::symmetric(12, 8))
        .shadow(egui::epaint::Shadow {
            offset: [0, 4],
            blur: 12,
            spread: 0,
            color: Color32::from_black_alpha(80),
        })
}

pub fn notice_color(level: NoticeLevel) -> Color32 {
    match level {
        NoticeLevel::Success => colors::SUCCESS,
        NoticeLevel::Info => colors::INFO,
        NoticeLevel::Error => colors::ERROR,
    }
}

/// Lime call-to-action button
pub fn primary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(
        egui::RichText::new(text.to_string())
            .strong()
            .color(colors::TEXT_ON_ACCENT),
    )
    .fill(colors::ACCENT)
    .corner_radius(CornerRadius::same(6))
}

/// Muted outline button
pub fn secondary_button(text: &str) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(colors::TEXT_PRIMARY))
        .fill(colors::INPUT_BG)
        .stroke(Stroke::new(1.0, colors::BORDER))
        .corner_radius(CornerRadius::same(6))
}
