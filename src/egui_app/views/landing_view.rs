use eframe::egui;

use crate::egui_app::guard::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::shared::format::{FREE_DEVICE_LIMIT, SUBSCRIBED_DEVICE_LIMIT};
use crate::shared::pricing::UNIT_PRICE;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.vertical_centered(|ui| {
        ui.add_space(60.0);

        ui.colored_label(
            colors::TEXT_PRIMARY,
            egui::RichText::new("Remote access, without the hassle").size(40.0).strong(),
        );
        ui.add_space(10.0);
        ui.colored_label(
            colors::TEXT_SECONDARY,
            egui::RichText::new("Connect to your machines from anywhere. Pay only for the days you need.")
                .size(18.0),
        );
        ui.add_space(30.0);

        let signed_in = state.session.is_authenticated();
        let (label, target) = if signed_in {
            ("Open Dashboard", Route::Dashboard)
        } else {
            ("Start Free", Route::Register)
        };
        if ui
            .add(styles::primary_button(label).min_size(egui::vec2(200.0, 44.0)))
            .clicked()
        {
            state.navigate(target);
        }
        if !signed_in {
            ui.add_space(10.0);
            if ui
                .add(styles::secondary_button("I already have an account").min_size(egui::vec2(200.0, 36.0)))
                .clicked()
            {
                state.navigate(Route::Login);
            }
        }

        ui.add_space(50.0);
        ui.horizontal_wrapped(|ui| {
            feature(ui, "⚡ Low latency", "Direct sessions to every registered device.");
            feature(
                ui,
                "🔒 Device secrets",
                "Each machine gets its own credentials on registration.",
            );
            feature(
                ui,
                "💳 Daily pricing",
                &format!(
                    "${} per day, up to 15% off for longer plans. {} device free, {} with a plan.",
                    UNIT_PRICE, FREE_DEVICE_LIMIT, SUBSCRIBED_DEVICE_LIMIT
                ),
            );
        });
    });
}

fn feature(ui: &mut egui::Ui, title: &str, body: &str) {
    styles::card_frame().show(ui, |ui| {
        ui.set_width(240.0);
        ui.colored_label(colors::ACCENT, egui::RichText::new(title).size(16.0).strong());
        ui.add_space(4.0);
        ui.colored_label(colors::TEXT_SECONDARY, body);
    });
}
