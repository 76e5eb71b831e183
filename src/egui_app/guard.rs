//! Routes and navigation-time access checks.

use std::fmt;

use crate::egui_app::auth::SessionAuthState;
use crate::shared::models::Identity;

/// Every screen the client can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    Register,
    Dashboard,
    Subscribe,
    AddDevice,
    Admin,
}

/// Who may see a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Authenticated,
    Admin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    /// Identity restoration is still running; show a waiting state
    Wait,
    Redirect(Route),
}

impl Route {
    pub const ALL: [Route; 7] = [
        Route::Landing,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Subscribe,
        Route::AddDevice,
        Route::Admin,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Route::Landing => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Subscribe => "/subscribe",
            Route::AddDevice => "/devices/add",
            Route::Admin => "/admin",
        }
    }

    pub fn from_path(path: &str) -> Option<Route> {
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Route::ALL.into_iter().find(|route| route.path() == normalized)
    }

    pub fn access(self) -> Access {
        match self {
            Route::Landing | Route::Login | Route::Register => Access::Public,
            Route::Dashboard | Route::Subscribe | Route::AddDevice => Access::Authenticated,
            Route::Admin => Access::Admin,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Decide whether `route` may be shown.
///
/// While the session is still loading, guarded routes wait instead of
/// redirecting. A signed-in non-admin asking for `/admin` is sent to their
/// dashboard, not back to login.
pub fn authorize(route: Route, current: Option<&Identity>, loading: bool) -> GuardDecision {
    match route.access() {
        Access::Public => GuardDecision::Allow,
        _ if loading => GuardDecision::Wait,
        Access::Authenticated => match current {
            Some(_) => GuardDecision::Allow,
            None => GuardDecision::Redirect(Route::Login),
        },
        Access::Admin => match current {
            Some(identity) if identity.role.is_admin() => GuardDecision::Allow,
            _ => GuardDecision::Redirect(Route::Dashboard),
        },
    }
}

/// `authorize` against a live session.
pub fn check(route: Route, session: &SessionAuthState) -> GuardDecision {
    authorize(route, session.current(), session.loading())
}
