use chrono::Utc;
use eframe::egui;

use crate::egui_app::dashboard::{DashboardLoad, UserDashboard};
use crate::egui_app::guard::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::{page_title, render_waiting, stat_card};
use crate::shared::format;
use crate::shared::models::{Device, RemoteSession, SessionStatus};

enum Action {
    Navigate(Route),
    Retry,
    Connect(String),
    Remove(String),
    EndSession,
}

pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    let name = state
        .session
        .current()
        .map(|identity| identity.name.clone())
        .unwrap_or_default();
    page_title(ui, &format!("Welcome, {}", name), "Your devices and subscription");

    let mut actions = Vec::new();

    match &state.user_dashboard {
        DashboardLoad::Loading => render_waiting(ui),
        DashboardLoad::Failed { message } => {
            ui.colored_label(colors::ERROR, message);
            ui.add_space(8.0);
            if ui.add(styles::secondary_button("Retry")).clicked() {
                actions.push(Action::Retry);
            }
        }
        DashboardLoad::Ready(snapshot) => {
            if let Some(active) = &state.active_session {
                styles::card_frame().show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.colored_label(colors::STATUS_ONLINE, "●");
                        ui.colored_label(
                            colors::TEXT_PRIMARY,
                            format!(
                                "Session {} active on {}",
                                format::short_id(&active.session_id),
                                format::short_id(&active.device_id)
                            ),
                        );
                        if ui.add_enabled(!state.is_busy(), styles::secondary_button("End session")).clicked() {
                            actions.push(Action::EndSession);
                        }
                    });
                });
                ui.add_space(12.0);
            }

            render_overview(ui, snapshot, &mut actions);
            ui.add_space(20.0);
            render_devices(ui, snapshot, state.is_busy(), &mut actions);
            ui.add_space(20.0);
            render_sessions(ui, &snapshot.sessions);
        }
    }

    for action in actions {
        match action {
            Action::Navigate(route) => state.navigate(route),
            Action::Retry => state.reload_dashboard(),
            Action::Connect(device_id) => state.connect_device(&device_id),
            Action::Remove(device_id) => state.delete_device(&device_id),
            Action::EndSession => state.end_active_session(),
        }
    }
}

fn render_overview(ui: &mut egui::Ui, snapshot: &UserDashboard, actions: &mut Vec<Action>) {
    let (used, limit) = snapshot.device_slots();
    let status = match &snapshot.subscription {
        Some(subscription) => format!("{:?}", subscription.status),
        None => "None".to_string(),
    };

    ui.horizontal_wrapped(|ui| {
        stat_card(ui, "Subscription", status);
        stat_card(ui, "Days remaining", snapshot.days_remaining(Utc::now()).to_string());
        stat_card(ui, "Devices", format!("{} / {}", used, limit));
        stat_card(ui, "Online", snapshot.online_devices().to_string());
    });

    if let Some(subscription) = snapshot.subscription.as_ref().filter(|s| s.is_active()) {
        ui.add_space(6.0);
        ui.colored_label(
            colors::TEXT_MUTED,
            format!("Active until {}", format::format_date(subscription.end_date.as_ref())),
        );
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let subscribe_label = if snapshot.has_active_subscription() {
            "Extend subscription"
        } else {
            "Subscribe"
        };
        if ui.add(styles::primary_button(subscribe_label)).clicked() {
            actions.push(Action::Navigate(Route::Subscribe));
        }
        let add = ui.add_enabled(used < limit, styles::secondary_button("Add device"));
        if add.clicked() {
            actions.push(Action::Navigate(Route::AddDevice));
        }
        if used >= limit {
            add.on_disabled_hover_text("Device limit reached");
        }
    });
}

fn render_devices(ui: &mut egui::Ui, snapshot: &UserDashboard, busy: bool, actions: &mut Vec<Action>) {
    ui.colored_label(colors::TEXT_PRIMARY, egui::RichText::new("Devices").size(20.0).strong());
    ui.add_space(8.0);

    if snapshot.devices.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No devices registered yet.");
        return;
    }

    for device in &snapshot.devices {
        device_row(ui, device, busy, actions);
        ui.add_space(6.0);
    }
}

fn device_row(ui: &mut egui::Ui, device: &Device, busy: bool, actions: &mut Vec<Action>) {
    styles::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            let (dot, status) = if device.online {
                (colors::STATUS_ONLINE, "Online")
            } else {
                (colors::STATUS_OFFLINE, "Offline")
            };
            ui.colored_label(dot, "●");
            ui.vertical(|ui| {
                ui.colored_label(colors::TEXT_PRIMARY, egui::RichText::new(device.display_name()).strong());
                ui.colored_label(
                    colors::TEXT_MUTED,
                    format!(
                        "{} · {} · last seen {}",
                        status,
                        device.os_version.as_deref().unwrap_or("unknown OS"),
                        format::format_date(device.last_seen.as_ref())
                    ),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(!busy, styles::secondary_button("Remove")).clicked() {
                    actions.push(Action::Remove(device.id.clone()));
                }
                if ui
                    .add_enabled(!busy && device.online, styles::primary_button("Connect"))
                    .clicked()
                {
                    actions.push(Action::Connect(device.id.clone()));
                }
            });
        });
    });
}

fn render_sessions(ui: &mut egui::Ui, sessions: &[RemoteSession]) {
    ui.colored_label(colors::TEXT_PRIMARY, egui::RichText::new("Recent sessions").size(20.0).strong());
    ui.add_space(8.0);

    if sessions.is_empty() {
        ui.colored_label(colors::TEXT_SECONDARY, "No sessions yet.");
        return;
    }

    egui::Grid::new("user_sessions")
        .num_columns(4)
        .striped(true)
        .spacing([24.0, 6.0])
        .show(ui, |ui| {
            for heading in ["Session", "Device", "Started", "Ended"] {
                ui.colored_label(colors::TEXT_MUTED, heading);
            }
            ui.end_row();

            for session in sessions {
                let color = match session.status {
                    SessionStatus::Active => colors::STATUS_ONLINE,
                    SessionStatus::Ended => colors::TEXT_PRIMARY,
                };
                ui.colored_label(color, format::short_id(&session.session_id));
                ui.label(format::short_id(&session.device_id));
                ui.label(format::format_date(Some(&session.started_at)));
                ui.label(format::format_date(session.ended_at.as_ref()));
                ui.end_row();
            }
        });
}
