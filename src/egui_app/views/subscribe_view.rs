use eframe::egui;

use crate::egui_app::guard::Route;
use crate::egui_app::state::AppState;
use crate::egui_app::theme::{colors, styles};
use crate::egui_app::views::page_title;
use crate::shared::pricing::{DurationSelection, DISCOUNT_TIERS, MAX_DAYS, MIN_DAYS, UNIT_PRICE};

pub fn render(ctx: &egui::Context, ui: &mut egui::Ui, state: &mut AppState) {
    if let Some(url) = state.checkout.pending_redirect.take() {
        tracing::info!("Opening payment page");
        ctx.open_url(egui::OpenUrl::new_tab(url));
    }

    page_title(ui, "Choose your plan", &format!("${} per day, billed once", UNIT_PRICE));

    let mut days = state.checkout.selection.days();
    styles::card_frame().show(ui, |ui| {
        ui.set_max_width(520.0);

        ui.colored_label(colors::TEXT_SECONDARY, "Duration (days)");
        ui.spacing_mut().slider_width = 420.0;
        ui.add(egui::Slider::new(&mut days, MIN_DAYS..=MAX_DAYS).suffix(" days"));

        ui.add_space(6.0);
        ui.horizontal_wrapped(|ui| {
            for tier in DISCOUNT_TIERS.iter().rev() {
                let reached = days >= tier.min_days;
                let color = if reached { colors::ACCENT } else { colors::TEXT_MUTED };
                ui.colored_label(color, format!("{}+ days: {}% off", tier.min_days, tier.percent));
                ui.add_space(8.0);
            }
        });
    });
    state.set_duration(DurationSelection::clamped(i64::from(days)));

    ui.add_space(16.0);

    let quote = state.checkout.quote();
    let total = state.checkout.display_total();
    styles::card_frame().show(ui, |ui| {
        ui.set_max_width(520.0);
        egui::Grid::new("price_breakdown")
            .num_columns(2)
            .spacing([40.0, 8.0])
            .show(ui, |ui| {
                ui.colored_label(colors::TEXT_SECONDARY, "Base price");
                ui.colored_label(colors::TEXT_PRIMARY, format!("${}", quote.base_amount));
                ui.end_row();

                if quote.has_discount() {
                    ui.colored_label(colors::TEXT_SECONDARY, format!("Discount ({}%)", quote.discount_percent));
                    ui.colored_label(colors::SUCCESS, format!("-${}", quote.discount_amount()));
                    ui.end_row();
                }

                ui.colored_label(colors::TEXT_PRIMARY, egui::RichText::new("Total").strong());
                ui.colored_label(
                    colors::ACCENT,
                    egui::RichText::new(format!("${}", total)).size(22.0).strong(),
                );
                ui.end_row();
            });
    });

    ui.add_space(16.0);
    ui.horizontal(|ui| {
        let creating = state.checkout.is_creating();
        if ui
            .add_enabled(
                !creating,
                styles::primary_button("Proceed to Payment").min_size(egui::vec2(200.0, 40.0)),
            )
            .clicked()
        {
            state.submit_checkout();
        }
        if creating {
            ui.spinner();
        }
        if ui.add(styles::secondary_button("Back")).clicked() {
            state.navigate(Route::Dashboard);
        }
    });

    if let Some(checkout) = &state.checkout.last_checkout {
        ui.add_space(20.0);
        let checking = state.checkout.is_checking_payment();
        let amount = checkout.amount;
        let payment_url = checkout.payment_url.clone();
        styles::card_frame().show(ui, |ui| {
            ui.set_max_width(520.0);
            ui.colored_label(
                colors::TEXT_SECONDARY,
                format!("Payment of ${} created. Finish it in your browser, then check its status here.", amount),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.add_enabled(!checking, styles::secondary_button("Check payment status")).clicked() {
                    state.check_payment();
                }
                if let Some(url) = payment_url {
                    if ui.link("Reopen payment page").clicked() {
                        ctx.open_url(egui::OpenUrl::new_tab(url));
                    }
                }
                if checking {
                    ui.spinner();
                }
            });
        });
    }
}
