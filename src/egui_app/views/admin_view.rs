use eframe::egui;

use crate::egui_app::dashboard::DashboardLoad;
use crate::egui_app::state::{AdminTab, AppState};
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{page_title, render_waiting, stat_card};
use crate::shared::format;
use crate::shared::models::{RemoteSession, SessionStatus, UserRecord};

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    page_title(ui, "Admin", "Platform-wide statistics, accounts and sessions");

    let mut retry = false;
    match &state.admin_dashboard {
        DashboardLoad::Loading => render_waiting(ui),
        DashboardLoad::Failed { message } => {
            ui.colored_label(colors::ERROR, message);
            ui.add_space(8.0);
            retry = ui.add(styles::secondary_button("Retry")).clicked();
        }
        DashboardLoad::Ready(snapshot) => {
            let mut tab = state.admin_tab;
            ui.horizontal(|ui| {
                ui.selectable_value(&mut tab, AdminTab::Stats, "Stats");
                ui.selectable_value(&mut tab, AdminTab::Users, format!("Users ({})", snapshot.users.len()));
                ui.selectable_value(
                    &mut tab,
                    AdminTab::Sessions,
                    format!("Sessions ({})", snapshot.sessions.len()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    retry = ui.button("Refresh").clicked();
                });
            });
            ui.separator();
            ui.add_space(8.0);

            match tab {
                AdminTab::Stats => {
                    let stats = snapshot.stats;
                    ui.horizontal_wrapped(|ui| {
                        stat_card(ui, "Total users", stats.total_users.to_string());
                        stat_card(ui, "Active subscriptions", stats.active_subscriptions.to_string());
                        stat_card(ui, "Online devices", stats.online_devices.to_string());
                        stat_card(ui, "Active sessions", stats.active_sessions.to_string());
                    });
                }
                AdminTab::Users => render_users(ui, &snapshot.users),
                AdminTab::Sessions => render_sessions(ui, &snapshot.sessions),
            }
            state.admin_tab = tab;
        }
    }

    if retry {
        state.reload_admin();
    }
}

fn render_users(ui: &mut egui::Ui, users: &[UserRecord]) {
    if users.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No users yet.");
        return;
    }
    egui::Grid::new("admin_users")
        .num_columns(4)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for header in ["Name", "Email", "Role", "Joined"] {
                ui.colored_label(colors::TEXT_MUTED, header);
            }
            ui.end_row();

            for user in users {
                ui.colored_label(colors::TEXT_PRIMARY, &user.name);
                ui.colored_label(colors::TEXT_SECONDARY, &user.email);
                let role_color = if user.role.is_admin() { colors::ACCENT } else { colors::TEXT_SECONDARY };
                ui.colored_label(role_color, format!("{:?}", user.role).to_lowercase());
                ui.colored_label(colors::TEXT_MUTED, format::format_date(user.created_at.as_ref()));
                ui.end_row();
            }
        });
}

fn render_sessions(ui: &mut egui::Ui, sessions: &[RemoteSession]) {
    if sessions.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No sessions recorded.");
        return;
    }
    egui::Grid::new("admin_sessions")
        .num_columns(5)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for header in ["Session", "User", "Device", "Status", "Started"] {
                ui.colored_label(colors::TEXT_MUTED, header);
            }
            ui.end_row();

            for session in sessions {
                ui.monospace(format::short_id(&session.session_id));
                ui.monospace(format::short_id(&session.user_id));
                ui.monospace(format::short_id(&session.device_id));
                let (color, label) = match session.status {
                    SessionStatus::Active => (colors::STATUS_ONLINE, "active"),
                    SessionStatus::Ended => (colors::STATUS_OFFLINE, "ended"),
                };
                ui.colored_label(color, label);
                ui.colored_label(colors::TEXT_MUTED, format::format_date(Some(&session.started_at)));
                ui.end_row();
            }
        });
}
