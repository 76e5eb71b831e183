use eframe::egui;

use crate::egui_app::guard::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::page_title;

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    page_title(ui, "Add a device", "Register a machine you want to reach remotely");

    if let Some(credentials) = state.issued_device.clone() {
        styles::card_frame().show(ui, |ui| {
            ui.set_max_width(520.0);
            ui.colored_label(colors::SUCCESS, egui::RichText::new("Device registered").strong());
            ui.add_space(6.0);
            ui.colored_label(
                colors::WARNING,
                "Copy the secret now. It will not be shown again.",
            );
            ui.add_space(8.0);
            credential_row(ui, "Device ID", &credentials.device_id);
            credential_row(ui, "Device secret", &credentials.device_secret);
        });
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            if ui.add(styles::primary_button("Back to dashboard")).clicked() {
                state.navigate(Route::Dashboard);
            }
            if ui.add(styles::secondary_button("Add another")).clicked() {
                state.issued_device = None;
            }
        });
        return;
    }

    let input_width = 360.0;
    styles::card_frame().show(ui, |ui| {
        ui.set_max_width(520.0);
        egui::Grid::new("device_form")
            .num_columns(2)
            .spacing([16.0, 10.0])
            .show(ui, |ui| {
                form_row(ui, "MAC address", &mut state.device_form.mac_address, "aa:bb:cc:dd:ee:ff", input_width);
                form_row(ui, "CPU ID", &mut state.device_form.cpu_id, "BFEBFBFF000906EA", input_width);
                form_row(ui, "Hostname", &mut state.device_form.hostname, "office-pc", input_width);
                form_row(ui, "OS version", &mut state.device_form.os_version, "optional", input_width);
            });
    });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let busy = state.is_registering_device();
        if ui
            .add_enabled(!busy, styles::primary_button("Register device").min_size(egui::vec2(180.0, 36.0)))
            .clicked()
        {
            state.submit_device();
        }
        if busy {
            ui.spinner();
        }
        if ui.add(styles::secondary_button("Cancel")).clicked() {
            state.navigate(Route::Dashboard);
        }
    });
}

fn form_row(ui: &mut egui::Ui, label: &str, value: &mut String, hint: &str, width: f32) {
    ui.colored_label(colors::TEXT_SECONDARY, label);
    ui.add_sized([width, 28.0], egui::TextEdit::singleline(value).hint_text(hint));
    ui.end_row();
}

fn credential_row(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.horizontal(|ui| {
        ui.colored_label(colors::TEXT_MUTED, format!("{}:", label));
        ui.monospace(value);
        if ui.small_button("Copy").clicked() {
            ui.ctx().copy_text(value.to_string());
        }
    });
}
