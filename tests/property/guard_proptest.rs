//! Property-based tests for the route guard

use proptest::prelude::*;
use remotedesk::egui_app::guard::{authorize, Access, GuardDecision, Route};
use remotedesk::shared::{Identity, Role};

fn any_route() -> impl Strategy<Value = Route> {
    prop::sample::select(Route::ALL.to_vec())
}

fn any_identity() -> impl Strategy<Value = Option<Identity>> {
    prop::option::of(prop_oneof![Just(Role::User), Just(Role::Admin)].prop_map(|role| Identity {
        id: "u-1".to_string(),
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        role,
    }))
}

proptest! {
    #[test]
    fn test_loading_never_redirects(route in any_route(), identity in any_identity()) {
        let decision = authorize(route, identity.as_ref(), true);
        prop_assert!(!matches!(decision, GuardDecision::Redirect(_)));
    }

    #[test]
    fn test_public_routes_always_allowed(route in any_route(), identity in any_identity(), loading in any::<bool>()) {
        if route.access() == Access::Public {
            prop_assert_eq!(authorize(route, identity.as_ref(), loading), GuardDecision::Allow);
        }
    }

    #[test]
    fn test_redirect_targets_are_not_admin(route in any_route(), identity in any_identity()) {
        if let GuardDecision::Redirect(target) = authorize(route, identity.as_ref(), false) {
            prop_assert!(target == Route::Login || target == Route::Dashboard);
            prop_assert_ne!(target, route);
        }
    }

    #[test]
    fn test_admin_route_needs_admin(identity in any_identity()) {
        let allowed = authorize(Route::Admin, identity.as_ref(), false) == GuardDecision::Allow;
        let is_admin = identity.map(|i| i.role.is_admin()).unwrap_or(false);
        prop_assert_eq!(allowed, is_admin);
    }
}
