/**
 * RemoteDesk Pro - Desktop Client Entry Point
 *
 * Loads configuration, restores any saved session and runs the egui app.
 * Network work runs on a background tokio runtime.
 */
use std::sync::Arc;

use eframe::egui;
use remotedesk::egui_app::{views, ApiClient, AppState, FileCredentialStore, SessionAuthState};
use remotedesk::egui_app::theme::styles;
use remotedesk::shared::config::AppConfig;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("remotedesk=info")),
        )
        .init();

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("Invalid configuration, using defaults: {}", e);
            AppConfig::default()
        }
    };
    tracing::info!("Using server {}{}", config.server_url, config.api_prefix);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()?;

    let api = ApiClient::new(&config)?;
    let store = Arc::new(FileCredentialStore::new(config.credentials_path.clone()));
    let session = SessionAuthState::new(api, store);

    let mut state = AppState::new(runtime.handle().clone(), session);
    if let Some(path) = &config.start_route {
        state.open_path(path);
    }
    state.start();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "RemoteDesk Pro",
        options,
        Box::new(|cc| {
            styles::apply_global_theme(&cc.egui_ctx);
            Ok(Box::new(RemoteDeskApp { state, _runtime: runtime }))
        }),
    )?;
    Ok(())
}

/// Main application state
struct RemoteDeskApp {
    state: AppState,
    // Kept alive for the spawned requests.
    _runtime: tokio::runtime::Runtime,
}

impl eframe::App for RemoteDeskApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.state.tick();

        views::render_top_bar(ctx, &mut self.state);
        views::render_main_panel(ctx, &mut self.state);
        views::render_notifications(ctx, &self.state);

        ctx.request_repaint();
    }
}
