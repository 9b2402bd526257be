mod common;

use chrono::{Duration, Utc};
use common::{admin, create_token, docente, signed_in};
use creditos_console::{
    SessionStore,
    guards::{GuardDecision, RoleGuard, RouteGuard},
    models::{ADMINISTRADOR, DOCENTE},
    navigation::{Location, LocationState, Navigation},
};

fn redirect_target(decision: &GuardDecision) -> Option<&str> {
    match decision {
        GuardDecision::Redirect(navigation) => navigation.target(),
        GuardDecision::Allow => None,
    }
}

// --- RouteGuard ---

#[test]
fn test_route_guard_redirects_without_token_and_captures_origin() {
    let store = SessionStore::in_memory();

    let decision = RouteGuard::default().check(&store, "/creditos");

    assert_eq!(
        decision,
        GuardDecision::Redirect(Navigation::Redirect {
            to: "/login".to_string(),
            replace: true,
            state: Some(LocationState {
                from: Location {
                    pathname: "/creditos".to_string(),
                },
            }),
        })
    );
}

#[test]
fn test_route_guard_redirects_expired_session() {
    let store = signed_in(&create_token(-1), admin());

    let decision = RouteGuard::default().check(&store, "/");

    assert_eq!(redirect_target(&decision), Some("/login"));
}

#[test]
fn test_route_guard_redirects_malformed_token() {
    let store = signed_in("not-a-jwt", admin());

    let decision = RouteGuard::default().check(&store, "/alumnos");

    assert_eq!(redirect_target(&decision), Some("/login"));
}

#[test]
fn test_route_guard_allows_live_session() {
    let store = signed_in(&create_token(3600), docente());

    assert_eq!(RouteGuard::default().check(&store, "/"), GuardDecision::Allow);
}

#[test]
fn test_route_guard_honours_evaluation_time() {
    let store = signed_in(&create_token(600), docente());
    let later = Utc::now() + Duration::hours(1);

    assert_eq!(
        RouteGuard::default().check_at(&store, "/", Utc::now()),
        GuardDecision::Allow
    );
    assert_eq!(
        redirect_target(&RouteGuard::default().check_at(&store, "/", later)),
        Some("/login")
    );
}

// --- RoleGuard ---

#[test]
fn test_role_guard_redirects_missing_role_to_unauthorized() {
    let store = signed_in(&create_token(3600), docente());

    let decision = RoleGuard::new([ADMINISTRADOR]).check(&store);

    assert_eq!(
        decision,
        GuardDecision::Redirect(Navigation::redirect("/unauthorized"))
    );
}

#[test]
fn test_role_guard_allows_any_matching_role() {
    let store = signed_in(&create_token(3600), docente());

    assert_eq!(
        RoleGuard::new([ADMINISTRADOR, DOCENTE]).check(&store),
        GuardDecision::Allow
    );
    assert_eq!(RoleGuard::new(DOCENTE).check(&store), GuardDecision::Allow);
}

#[test]
fn test_role_guard_fallback_is_configurable() {
    let store = signed_in(&create_token(3600), docente());

    let decision = RoleGuard::new(ADMINISTRADOR)
        .redirect_to("/sin-permiso")
        .check(&store);

    assert_eq!(redirect_target(&decision), Some("/sin-permiso"));
}

#[test]
fn test_role_guard_redirect_carries_no_origin() {
    let store = signed_in(&create_token(3600), docente());

    match RoleGuard::new(ADMINISTRADOR).check(&store) {
        GuardDecision::Redirect(Navigation::Redirect { state, replace, .. }) => {
            assert!(state.is_none());
            assert!(replace);
        }
        other => panic!("expected a redirect, got {:?}", other),
    }
}

#[test]
fn test_role_guard_behind_session_gate_sends_signed_out_to_login() {
    let store = SessionStore::in_memory();

    let decision =
        RoleGuard::new(ADMINISTRADOR).check_behind(&RouteGuard::default(), &store, "/usuarios");

    assert_eq!(redirect_target(&decision), Some("/login"));
}

#[test]
fn test_role_guard_behind_session_gate_applies_roles_to_live_session() {
    let store = signed_in(&create_token(3600), docente());
    let guard = RoleGuard::new(ADMINISTRADOR);

    let denied = guard.check_behind(&RouteGuard::default(), &store, "/usuarios");
    let allowed = RoleGuard::new([ADMINISTRADOR, DOCENTE]).check_behind(
        &RouteGuard::default(),
        &store,
        "/creditos",
    );

    assert_eq!(redirect_target(&denied), Some("/unauthorized"));
    assert_eq!(allowed, GuardDecision::Allow);
}
