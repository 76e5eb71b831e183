use std::future::Future;
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::time::Instant;

use rust_decimal::Decimal;
use tokio::runtime::Handle;

use crate::egui_app::auth::{AuthSession, SessionAuthState};
use crate::egui_app::dashboard::{
    self, AdminDashboard, DashboardLoad, UserDashboard, ADMIN_DASHBOARD_ERROR,
    USER_DASHBOARD_ERROR,
};
use crate::egui_app::guard::{self, GuardDecision, Route};
use crate::egui_app::notifications::Notifications;
use crate::shared::error::{ClientError, ErrorKind};
use crate::shared::models::{
    CheckoutResponse, DeviceCredentials, PaymentRecord, PaymentStatus, PriceResponse,
    SessionStarted,
};
use crate::shared::pricing::{self, DurationSelection, PriceQuote};

pub mod forms;

pub use forms::{AuthForm, DeviceForm};

type Task<T> = Option<Receiver<T>>;
type AuthTask = Task<Result<AuthSession, ClientError>>;

/// Which auth form submitted the pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AdminTab {
    #[default]
    Stats,
    Users,
    Sessions,
}

/// Subscribe page state: the slider, the local estimate and the last
/// authoritative price.
#[derive(Debug, Default)]
pub struct CheckoutState {
    pub selection: DurationSelection,
    /// Server price for `selection`, once it arrives
    pub server_amount: Option<Decimal>,
    pub last_checkout: Option<CheckoutResponse>,
    /// Payment page the view should open, consumed once
    pub pending_redirect: Option<String>,
    requested: Option<DurationSelection>,
    price_task: Task<(DurationSelection, Result<PriceResponse, ClientError>)>,
    create_task: Task<Result<CheckoutResponse, ClientError>>,
    payment_task: Task<Result<PaymentRecord, ClientError>>,
}

impl CheckoutState {
    pub fn quote(&self) -> PriceQuote {
        pricing::quote(self.selection)
    }

    pub fn is_creating(&self) -> bool {
        self.create_task.is_some()
    }

    pub fn is_checking_payment(&self) -> bool {
        self.payment_task.is_some()
    }

    /// Amount to display: the server's once known, otherwise the estimate.
    pub fn display_total(&self) -> Decimal {
        self.server_amount
            .map(pricing::round_currency)
            .unwrap_or_else(|| self.quote().total_amount)
    }
}

/// Central application state shared across egui views.
pub struct AppState {
    runtime: Handle,
    pub session: SessionAuthState,
    pub route: Route,
    entered: Option<Route>,
    pub notifications: Notifications,

    pub auth_form: AuthForm,
    auth_task: AuthTask,
    auth_mode: AuthMode,
    restore_task: AuthTask,

    pub user_dashboard: DashboardLoad<UserDashboard>,
    user_dashboard_task: Task<Result<UserDashboard, ClientError>>,
    pub admin_dashboard: DashboardLoad<AdminDashboard>,
    admin_dashboard_task: Task<Result<AdminDashboard, ClientError>>,
    pub admin_tab: AdminTab,

    pub checkout: CheckoutState,

    pub device_form: DeviceForm,
    pub issued_device: Option<DeviceCredentials>,
    device_task: Task<Result<DeviceCredentials, ClientError>>,

    pub active_session: Option<SessionStarted>,
    session_task: Task<Result<SessionStarted, ClientError>>,
    action_task: Task<Result<String, ClientError>>,
}

impl AppState {
    pub fn new(runtime: Handle, session: SessionAuthState) -> Self {
        Self {
            runtime,
            session,
            route: Route::Landing,
            entered: None,
            notifications: Notifications::default(),
            auth_form: AuthForm::default(),
            auth_task: None,
            auth_mode: AuthMode::Login,
            restore_task: None,
            user_dashboard: DashboardLoad::Loading,
            user_dashboard_task: None,
            admin_dashboard: DashboardLoad::Loading,
            admin_dashboard_task: None,
            admin_tab: AdminTab::default(),
            checkout: CheckoutState::default(),
            device_form: DeviceForm::default(),
            issued_device: None,
            device_task: None,
            active_session: None,
            session_task: None,
            action_task: None,
        }
    }

    /// Kick off identity restoration. Call once, before the first frame.
    pub fn start(&mut self) {
        if let Some(token) = self.session.begin_restore() {
            let authenticator = self.session.authenticator();
            self.restore_task = Some(self.spawn(async move { authenticator.restore(token).await }));
        }
    }

    fn spawn<T, F>(&self, future: F) -> Receiver<T>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = channel();
        self.runtime.spawn(async move {
            // The receiver is gone if the user navigated away.
            let _ = tx.send(future.await);
        });
        rx
    }

    /// Per-frame bookkeeping: collect finished requests, expire toasts and
    /// apply the route guard.
    pub fn tick(&mut self) {
        self.poll_restore();
        self.poll_auth();
        self.poll_dashboards();
        self.poll_checkout();
        self.poll_devices();
        self.notifications.expire(Instant::now());
        self.resolve_route();
    }

    // ---- navigation ----

    pub fn navigate(&mut self, route: Route) {
        if route == self.route {
            return;
        }
        tracing::debug!("navigate {} -> {}", self.route, route);
        // Results for the old view are discarded.
        self.user_dashboard_task = None;
        self.admin_dashboard_task = None;
        self.route = route;
        self.entered = None;
    }

    /// Navigate by path, e.g. `/devices/add`. Unknown paths are ignored.
    pub fn open_path(&mut self, path: &str) -> bool {
        match Route::from_path(path) {
            Some(route) => {
                self.navigate(route);
                true
            }
            None => {
                tracing::warn!("Unknown route '{}'", path);
                false
            }
        }
    }

    /// Guard decision for the current route.
    pub fn guard(&self) -> GuardDecision {
        guard::check(self.route, &self.session)
    }

    fn resolve_route(&mut self) {
        match self.guard() {
            GuardDecision::Allow => {
                if self.entered != Some(self.route) {
                    self.entered = Some(self.route);
                    self.on_enter(self.route);
                }
            }
            GuardDecision::Wait => {}
            GuardDecision::Redirect(target) => {
                tracing::debug!("guard redirected {} to {}", self.route, target);
                self.navigate(target);
            }
        }
    }

    fn on_enter(&mut self, route: Route) {
        match route {
            Route::Dashboard => self.reload_dashboard(),
            Route::Admin => self.reload_admin(),
            Route::Subscribe => self.refresh_server_price(),
            Route::Login | Route::Register => self.auth_form.error = None,
            Route::AddDevice => self.issued_device = None,
            Route::Landing => {}
        }
    }

    // ---- session ----

    fn poll_restore(&mut self) {
        if let Some(result) = take_ready(&mut self.restore_task) {
            self.session.finish_restore(result);
        }
    }

    pub fn is_authenticating(&self) -> bool {
        self.auth_task.is_some()
    }

    pub fn submit_login(&mut self) {
        self.auth_form.error = None;
        if let Err(e) = self.auth_form.validate_login() {
            self.auth_form.error = Some(e.user_message());
            return;
        }

        let authenticator = self.session.authenticator();
        let email = self.auth_form.email.trim().to_string();
        let password = self.auth_form.password.clone();
        self.auth_form.clear_secrets();
        self.auth_mode = AuthMode::Login;
        self.auth_task = Some(self.spawn(async move { authenticator.login(&email, &password).await }));
    }

    pub fn submit_register(&mut self) {
        self.auth_form.error = None;
        if let Err(e) = self.auth_form.validate_register() {
            self.auth_form.error = Some(e.user_message());
            return;
        }

        let authenticator = self.session.authenticator();
        let email = self.auth_form.email.trim().to_string();
        let password = self.auth_form.password.clone();
        let name = self.auth_form.name.trim().to_string();
        self.auth_form.clear_secrets();
        self.auth_mode = AuthMode::Register;
        self.auth_task = Some(self.spawn(async move {
            authenticator.register(&email, &password, &name).await
        }));
    }

    fn poll_auth(&mut self) {
        let Some(result) = take_ready(&mut self.auth_task) else {
            return;
        };

        match result {
            Ok(session) => {
                self.session.establish(session);
                self.auth_form.reset();
                self.notifications.success(match self.auth_mode {
                    AuthMode::Login => "Login successful!",
                    AuthMode::Register => "Registration successful!",
                });
                self.navigate(Route::Dashboard);
            }
            Err(e) => {
                let fallback = match self.auth_mode {
                    AuthMode::Login => "Login failed",
                    AuthMode::Register => "Registration failed",
                };
                match e.kind() {
                    ErrorKind::AuthenticationFailure => {
                        self.auth_form.error = Some(e.user_message());
                    }
                    _ => self.notifications.client_error(&e, fallback),
                }
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logout();
        self.user_dashboard = DashboardLoad::Loading;
        self.admin_dashboard = DashboardLoad::Loading;
        self.checkout = CheckoutState::default();
        self.issued_device = None;
        self.active_session = None;
        // Results still in flight belong to the old account.
        self.auth_task = None;
        self.device_task = None;
        self.session_task = None;
        self.action_task = None;
        self.auth_form.reset();
        self.navigate(Route::Landing);
    }

    // ---- dashboards ----

    pub fn reload_dashboard(&mut self) {
        let api = self.session.api();
        self.user_dashboard = DashboardLoad::Loading;
        self.user_dashboard_task =
            Some(self.spawn(async move { dashboard::load_user_dashboard(&api).await }));
    }

    pub fn reload_admin(&mut self) {
        let api = self.session.api();
        self.admin_dashboard = DashboardLoad::Loading;
        self.admin_dashboard_task =
            Some(self.spawn(async move { dashboard::load_admin_dashboard(&api).await }));
    }

    fn poll_dashboards(&mut self) {
        if let Some(result) = take_ready(&mut self.user_dashboard_task) {
            if let Ok(snapshot) = &result {
                self.session.set_subscription(snapshot.subscription.clone());
                // A session left running by an earlier run can still be ended.
                if self.active_session.is_none() {
                    self.active_session = snapshot.running_session().map(|running| SessionStarted {
                        session_id: running.session_id.clone(),
                        device_id: running.device_id.clone(),
                    });
                }
            }
            self.user_dashboard = DashboardLoad::from_result(result, USER_DASHBOARD_ERROR);
            if let Some(message) = self.user_dashboard.error() {
                self.notifications.error(message);
            }
        }

        if let Some(result) = take_ready(&mut self.admin_dashboard_task) {
            self.admin_dashboard = DashboardLoad::from_result(result, ADMIN_DASHBOARD_ERROR);
            if let Some(message) = self.admin_dashboard.error() {
                self.notifications.error(message);
            }
        }
    }

    // ---- checkout ----

    pub fn set_duration(&mut self, selection: DurationSelection) {
        if selection == self.checkout.selection {
            return;
        }
        self.checkout.selection = selection;
        self.checkout.server_amount = None;
        self.refresh_server_price();
    }

    fn refresh_server_price(&mut self) {
        let selection = self.checkout.selection;
        if self.checkout.requested == Some(selection) && self.checkout.server_amount.is_some() {
            return;
        }
        self.checkout.requested = Some(selection);
        let api = self.session.api();
        self.checkout.price_task = Some(self.spawn(async move {
            (selection, api.calculate_price(selection).await)
        }));
    }

    pub fn submit_checkout(&mut self) {
        if self.checkout.is_creating() {
            return;
        }
        let api = self.session.api();
        let selection = self.checkout.selection;
        tracing::info!("Creating subscription for {} days", selection.days());
        self.checkout.create_task =
            Some(self.spawn(async move { api.create_subscription(selection).await }));
    }

    pub fn check_payment(&mut self) {
        let Some(payment_id) = self
            .checkout
            .last_checkout
            .as_ref()
            .map(|checkout| checkout.payment_id.clone())
        else {
            return;
        };
        let api = self.session.api();
        self.checkout.payment_task =
            Some(self.spawn(async move { api.payment_status(&payment_id).await }));
    }

    fn poll_checkout(&mut self) {
        if let Some((selection, result)) = take_ready(&mut self.checkout.price_task) {
            match result {
                // A stale answer for an older slider position is dropped.
                Ok(price) if selection == self.checkout.selection => {
                    let local = pricing::quote(selection).total_amount;
                    if pricing::round_currency(price.amount) != local {
                        tracing::warn!(
                            "Server price {} differs from local estimate {} for {} days",
                            price.amount,
                            local,
                            selection.days()
                        );
                    }
                    self.checkout.server_amount = Some(price.amount);
                }
                Ok(_) => {}
                Err(e) => tracing::error!("Failed to calculate price: {}", e),
            }
        }

        if let Some(result) = take_ready(&mut self.checkout.create_task) {
            match result {
                Ok(checkout) => match checkout.payment_url.clone().filter(|url| !url.is_empty()) {
                    Some(url) => {
                        self.notifications.info("Redirecting to payment...");
                        self.checkout.pending_redirect = Some(url);
                        self.checkout.last_checkout = Some(checkout);
                    }
                    None => self.notifications.error("Failed to create payment link"),
                },
                Err(e) => self
                    .notifications
                    .client_error(&e, "Subscription creation failed"),
            }
        }

        if let Some(result) = take_ready(&mut self.checkout.payment_task) {
            match result {
                Ok(payment) => match payment.status {
                    PaymentStatus::Completed => {
                        self.notifications.success("Payment completed");
                        self.checkout.last_checkout = None;
                        self.navigate(Route::Dashboard);
                    }
                    PaymentStatus::Pending => self.notifications.info("Payment is still pending"),
                    PaymentStatus::Failed => self.notifications.error("Payment failed"),
                },
                Err(e) => self
                    .notifications
                    .client_error(&e, "Failed to check payment status"),
            }
        }
    }

    // ---- devices & sessions ----

    pub fn is_registering_device(&self) -> bool {
        self.device_task.is_some()
    }

    pub fn submit_device(&mut self) {
        let registration = match self.device_form.to_registration() {
            Ok(registration) => registration,
            Err(e) => {
                self.notifications.error(e.user_message());
                return;
            }
        };
        let api = self.session.api();
        self.device_task =
            Some(self.spawn(async move { api.register_device(&registration).await }));
    }

    pub fn delete_device(&mut self, device_id: &str) {
        let api = self.session.api();
        let device_id = device_id.to_string();
        self.action_task = Some(self.spawn(async move {
            api.delete_device(&device_id).await.map(|ack| ack.message)
        }));
    }

    pub fn connect_device(&mut self, device_id: &str) {
        let api = self.session.api();
        let device_id = device_id.to_string();
        self.session_task = Some(self.spawn(async move { api.start_session(&device_id).await }));
    }

    pub fn end_active_session(&mut self) {
        let Some(active) = self.active_session.take() else {
            return;
        };
        let api = self.session.api();
        self.action_task = Some(self.spawn(async move {
            api.end_session(&active.session_id)
                .await
                .map(|ack| ack.message)
        }));
    }

    pub fn is_busy(&self) -> bool {
        self.action_task.is_some() || self.session_task.is_some()
    }

    fn poll_devices(&mut self) {
        if let Some(result) = take_ready(&mut self.device_task) {
            match result {
                Ok(credentials) => {
                    self.notifications.success("Device registered");
                    self.device_form = DeviceForm::default();
                    self.issued_device = Some(credentials);
                }
                Err(e) => self
                    .notifications
                    .client_error(&e, "Device registration failed"),
            }
        }

        if let Some(result) = take_ready(&mut self.session_task) {
            match result {
                Ok(started) => {
                    self.notifications
                        .success(format!("Session {} started", started.session_id));
                    self.active_session = Some(started);
                }
                Err(e) => self.notifications.client_error(&e, "Failed to start session"),
            }
        }

        if let Some(result) = take_ready(&mut self.action_task) {
            match result {
                Ok(message) => {
                    self.notifications.success(message);
                    if self.route == Route::Dashboard {
                        self.reload_dashboard();
                    }
                }
                Err(e) => self.notifications.client_error(&e, "Request failed"),
            }
        }
    }
}

/// Take a finished result out of a task slot, clearing the slot.
fn take_ready<T>(slot: &mut Task<T>) -> Option<T> {
    let outcome = slot.as_ref()?.try_recv();
    match outcome {
        Ok(value) => {
            *slot = None;
            Some(value)
        }
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => {
            *slot = None;
            None
        }
    }
}
