use eframe::egui;

use crate::egui_app::guard::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let is_register = state.route == Route::Register;
    let available_rect = ui.available_rect_before_wrap();

    ui.vertical_centered(|ui| {
        let total_height = if is_register { 420.0 } else { 300.0 };
        let top_space = (available_rect.height() - total_height).max(0.0) / 3.0;
        ui.add_space(top_space);

        styles::card_frame().show(ui, |ui| {
            ui.set_width(380.0);
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(if is_register { "Create Account" } else { "Welcome Back" })
                        .size(24.0)
                        .strong()
                        .color(colors::TEXT_PRIMARY),
                );
                ui.add_space(16.0);
            });

            if let Some(ref error) = state.auth_form.error {
                ui.label(egui::RichText::new(error).color(colors::ERROR));
                ui.add_space(10.0);
            }

            let input_width = 348.0;
            let mut submitted = false;

            if is_register {
                field_label(ui, "Name");
                ui.add_sized(
                    [input_width, 28.0],
                    egui::TextEdit::singleline(&mut state.auth_form.name).hint_text("Ada Lovelace"),
                );
                ui.add_space(8.0);
            }

            field_label(ui, "Email");
            ui.add_sized(
                [input_width, 28.0],
                egui::TextEdit::singleline(&mut state.auth_form.email).hint_text("you@example.com"),
            );
            ui.add_space(8.0);

            field_label(ui, "Password");
            let password = ui.add_sized(
                [input_width, 28.0],
                egui::TextEdit::singleline(&mut state.auth_form.password).password(true),
            );
            submitted |= !is_register && entered(ui, &password);
            ui.add_space(8.0);

            if is_register {
                field_label(ui, "Confirm password");
                let confirm = ui.add_sized(
                    [input_width, 28.0],
                    egui::TextEdit::singleline(&mut state.auth_form.confirm_password).password(true),
                );
                submitted |= entered(ui, &confirm);
                ui.add_space(8.0);
            }

            ui.add_space(12.0);

            let busy = state.is_authenticating();
            let label = if is_register { "Sign Up" } else { "Login" };
            let button = styles::primary_button(label).min_size(egui::vec2(input_width, 36.0));
            if ui.add_enabled(!busy, button).clicked() {
                submitted = true;
            }

            if submitted && !busy {
                if is_register {
                    state.submit_register();
                } else {
                    state.submit_login();
                }
            }

            if busy {
                ui.add_space(10.0);
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.colored_label(colors::TEXT_SECONDARY, "Please wait...");
                });
            }

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                let (prompt, link, target) = if is_register {
                    ("Already have an account?", "Login", Route::Login)
                } else {
                    ("Don't have an account?", "Sign up", Route::Register)
                };
                ui.colored_label(colors::TEXT_SECONDARY, prompt);
                if ui.link(egui::RichText::new(link).color(colors::ACCENT)).clicked() {
                    state.auth_form.error = None;
                    state.navigate(target);
                }
            });
        });
    });
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).size(12.0).color(colors::TEXT_SECONDARY));
}

fn entered(ui: &egui::Ui, response: &egui::Response) -> bool {
    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter))
}
