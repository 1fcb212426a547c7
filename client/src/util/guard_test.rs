use super::*;

#[test]
fn from_path_normalizes() {
    assert_eq!(Route::from_path("/"), Route::Home);
    assert_eq!(Route::from_path(""), Route::Home);
    assert_eq!(Route::from_path("/admin/"), Route::Admin);
    assert_eq!(Route::from_path("/book-studio?category=podcast"), Route::Book);
    assert_eq!(Route::from_path("/gallery#top"), Route::Gallery);
    assert_eq!(Route::from_path("/nowhere"), Route::NotFound);
}

#[test]
fn every_route_round_trips_through_its_path() {
    for route in Route::ALL.into_iter().filter(|r| *r != Route::NotFound) {
        assert_eq!(Route::from_path(route.path()), route);
    }
}

#[test]
fn only_admin_is_protected() {
    let protected: Vec<Route> = Route::ALL.into_iter().filter(|r| r.is_protected()).collect();
    assert_eq!(protected, vec![Route::Admin]);
}

#[test]
fn guard_redirects_anonymous_admin_to_login() {
    assert_eq!(guard(Route::Admin, SessionState::Anonymous), GuardOutcome::Redirect(Route::Login));
    assert_eq!(guard(Route::Admin, SessionState::Authenticated), GuardOutcome::Render(Route::Admin));
}

#[test]
fn guard_sends_authenticated_login_to_admin() {
    assert_eq!(guard(Route::Login, SessionState::Authenticated), GuardOutcome::Redirect(Route::Admin));
    assert_eq!(guard(Route::Login, SessionState::Anonymous), GuardOutcome::Render(Route::Login));
}

#[test]
fn guard_renders_public_routes_for_everyone() {
    for state in [SessionState::Anonymous, SessionState::Authenticated] {
        assert_eq!(guard(Route::Gallery, state), GuardOutcome::Render(Route::Gallery));
        assert_eq!(guard(Route::NotFound, state), GuardOutcome::Render(Route::NotFound));
    }
}

#[test]
fn should_redirect_unauth_only_on_protected_views() {
    assert!(should_redirect_unauth(Route::Admin, SessionState::Anonymous));
    assert!(!should_redirect_unauth(Route::Admin, SessionState::Authenticated));
    assert!(!should_redirect_unauth(Route::Contact, SessionState::Anonymous));
}

// =============================================================================
// Navigator
// =============================================================================

#[test]
fn navigator_applies_guard() {
    let session = SessionStore::in_memory();
    let mut nav = Navigator::new(&session);
    assert_eq!(nav.current(), Route::Home);

    assert_eq!(nav.navigate("/admin"), GuardOutcome::Redirect(Route::Login));
    assert_eq!(nav.current(), Route::Login);

    session.set("tok").unwrap();
    assert_eq!(nav.navigate("/admin"), GuardOutcome::Render(Route::Admin));
    assert_eq!(nav.current(), Route::Admin);
}

#[test]
fn sync_redirects_when_session_ends_on_admin() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();
    let mut nav = Navigator::new(&session);
    nav.go(Route::Admin);

    assert_eq!(nav.sync(), None);
    session.clear().unwrap();
    assert_eq!(nav.sync(), Some(Route::Login));
    assert_eq!(nav.current(), Route::Login);
    assert_eq!(nav.sync(), None);
}

#[test]
fn sync_ignores_session_end_on_public_view() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();
    let mut nav = Navigator::new(&session);
    nav.go(Route::Stories);

    session.clear().unwrap();
    assert_eq!(nav.sync(), None);
    assert_eq!(nav.current(), Route::Stories);
}

#[tokio::test]
async fn next_redirect_wakes_on_clear() {
    let session = SessionStore::in_memory();
    session.set("tok").unwrap();
    let mut nav = Navigator::new(&session);
    nav.go(Route::Admin);

    let clearer = session.clone();
    let task = tokio::spawn(async move {
        tokio::task::yield_now().await;
        clearer.clear().unwrap();
    });

    assert_eq!(nav.next_redirect().await, Some(Route::Login));
    task.await.unwrap();
}
