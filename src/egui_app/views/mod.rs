use eframe::egui;

use crate::egui_app::guard::{GuardDecision, Route};
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};

pub mod add_device_view;
pub mod admin_view;
pub mod auth_view;
pub mod dashboard_view;
pub mod landing_view;
pub mod subscribe_view;

pub fn render_top_bar(ctx: &egui::Context, state: &mut AppState) {
    egui::TopBottomPanel::top("top_panel")
        .frame(styles::top_bar_frame())
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let title = egui::RichText::new("🖥 RemoteDesk Pro")
                    .size(18.0)
                    .strong()
                    .color(colors::ACCENT);
                if ui.add(egui::Label::new(title).sense(egui::Sense::click())).clicked() {
                    let home = if state.session.is_authenticated() {
                        Route::Dashboard
                    } else {
                        Route::Landing
                    };
                    state.navigate(home);
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.add_space(8.0);

                    if state.session.loading() {
                        ui.spinner();
                        return;
                    }

                    let email = state.session.current().map(|identity| identity.email.clone());
                    match email {
                        Some(email) => {
                            if ui.add(styles::secondary_button("Logout")).clicked() {
                                state.logout();
                            }
                            if state.session.is_admin() && ui.button("Admin").clicked() {
                                state.navigate(Route::Admin);
                            }
                            if ui.button("Dashboard").clicked() {
                                state.navigate(Route::Dashboard);
                            }
                            ui.colored_label(colors::TEXT_SECONDARY, email);
                        }
                        None => {
                            if ui.add(styles::primary_button("Get Started")).clicked() {
                                state.navigate(Route::Register);
                            }
                            if ui.button("Login").clicked() {
                                state.navigate(Route::Login);
                            }
                        }
                    }
                });
            });
        });
}

pub fn render_main_panel(ctx: &egui::Context, state: &mut AppState) {
    egui::CentralPanel::default()
        .frame(styles::page_frame())
        .show(ctx, |ui| match state.guard() {
            GuardDecision::Allow => {
                egui::ScrollArea::vertical().show(ui, |ui| match state.route {
                    Route::Landing => landing_view::render(ui, state),
                    Route::Login | Route::Register => auth_view::render(ui, state),
                    Route::Dashboard => dashboard_view::render(ui, state),
                    Route::Subscribe => subscribe_view::render(ctx, ui, state),
                    Route::AddDevice => add_device_view::render(ui, state),
                    Route::Admin => admin_view::render(ui, state),
                });
            }
            // Redirects are applied in `AppState::tick`; both cases show a
            // waiting state for the frame in between.
            GuardDecision::Wait | GuardDecision::Redirect(_) => render_waiting(ui),
        });
}

/// Toasts stacked in the bottom-right corner.
pub fn render_notifications(ctx: &egui::Context, state: &AppState) {
    if state.notifications.is_empty() {
        return;
    }

    egui::Area::new(egui::Id::new("notifications"))
        .anchor(egui::Align2::RIGHT_BOTTOM, egui::vec2(-16.0, -16.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            ui.set_max_width(320.0);
            for notice in state.notifications.visible() {
                styles::toast_frame(notice.level).show(ui, |ui| {
                    ui.colored_label(styles::notice_color(notice.level), &notice.message);
                });
                ui.add_space(6.0);
            }
        });
}

pub(crate) fn render_waiting(ui: &mut egui::Ui) {
    ui.vertical_centered(|ui| {
        ui.add_space(120.0);
        ui.spinner();
        ui.add_space(8.0);
        ui.colored_label(colors::TEXT_SECONDARY, "Loading...");
    });
}

/// Large number with a caption underneath, used by both dashboards.
pub(crate) fn stat_card(ui: &mut egui::Ui, caption: &str, value: impl Into<String>) {
    styles::card_frame().show(ui, |ui| {
        ui.set_min_width(160.0);
        ui.colored_label(colors::TEXT_MUTED, egui::RichText::new(caption).size(12.0));
        ui.colored_label(
            colors::TEXT_PRIMARY,
            egui::RichText::new(value.into()).size(26.0).strong(),
        );
    });
}

pub(crate) fn page_title(ui: &mut egui::Ui, title: &str, subtitle: &str) {
    ui.colored_label(colors::TEXT_PRIMARY, egui::RichText::new(title).size(28.0).strong());
    if !subtitle.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, subtitle);
    }
    ui.add_space(16.0);
}
