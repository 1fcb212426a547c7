//! Route table, route guard, and the top-level navigator.
//!
//! SYSTEM CONTEXT
//! ==============
//! Front ends render whatever [`Navigator::current`] names. The guard runs on
//! every navigation; the navigator also listens to session transitions so a
//! 401 anywhere in the app lands the user on `/login` without the HTTP layer
//! knowing about routes.
//!
//! DESIGN
//! ======
//! Session state is the only input. The guard never checks token validity;
//! a stale token renders `/admin` until the first call comes back 401, at
//! which point the session transition drives the redirect.

#[cfg(test)]
#[path = "guard_test.rs"]
mod guard_test;

use std::fmt;

use tokio::sync::watch;

use crate::state::session::{SessionState, SessionStore};

/// Every view the site can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    About,
    Book,
    Team,
    Gallery,
    Stories,
    Contact,
    Donate,
    Login,
    Admin,
    NotFound,
}

impl Route {
    pub const ALL: [Self; 11] = [
        Self::Home,
        Self::About,
        Self::Book,
        Self::Team,
        Self::Gallery,
        Self::Stories,
        Self::Contact,
        Self::Donate,
        Self::Login,
        Self::Admin,
        Self::NotFound,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::About => "/about",
            Self::Book => "/book-studio",
            Self::Team => "/team",
            Self::Gallery => "/gallery",
            Self::Stories => "/stories",
            Self::Contact => "/contact",
            Self::Donate => "/donate",
            Self::Login => "/login",
            Self::Admin => "/admin",
            Self::NotFound => "/404",
        }
    }

    /// Match a path, ignoring a trailing slash and any query string.
    /// Unknown paths map to [`Route::NotFound`].
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        let normalized = if trimmed.is_empty() { "/" } else { trimmed };
        Self::ALL
            .into_iter()
            .find(|route| *route != Self::NotFound && route.path() == normalized)
            .unwrap_or(Self::NotFound)
    }

    /// Requires an authenticated session.
    pub fn is_protected(self) -> bool {
        self == Self::Admin
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::About => "About",
            Self::Book => "Book With Us",
            Self::Team => "Our Team",
            Self::Gallery => "Gallery",
            Self::Stories => "Stories",
            Self::Contact => "Contact",
            Self::Donate => "Donate",
            Self::Login => "Admin Login",
            Self::Admin => "Admin Dashboard",
            Self::NotFound => "Page not found",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

// =============================================================================
// GUARD
// =============================================================================

/// What to do with a requested route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    Render(Route),
    Redirect(Route),
}

impl GuardOutcome {
    /// Route that ends up on screen.
    pub fn route(self) -> Route {
        match self {
            Self::Render(route) | Self::Redirect(route) => route,
        }
    }
}

/// Decide whether `route` renders under `state`.
///
/// Protected routes send anonymous visitors to `/login`; `/login` sends an
/// authenticated admin straight to `/admin`.
pub fn guard(route: Route, state: SessionState) -> GuardOutcome {
    match (route, state) {
        (r, SessionState::Anonymous) if r.is_protected() => GuardOutcome::Redirect(Route::Login),
        (Route::Login, SessionState::Authenticated) => GuardOutcome::Redirect(Route::Admin),
        (r, _) => GuardOutcome::Render(r),
    }
}

/// A session ending while `current` is on screen forces a move to login.
pub fn should_redirect_unauth(current: Route, state: SessionState) -> bool {
    state == SessionState::Anonymous && current.is_protected()
}

// =============================================================================
// NAVIGATOR
// =============================================================================

/// The single top-level listener that turns session transitions into
/// navigation.
#[derive(Debug)]
pub struct Navigator {
    current: Route,
    session: watch::Receiver<SessionState>,
}

impl Navigator {
    /// Start at `/` watching `session`.
    pub fn new(session: &SessionStore) -> Self {
        let mut rx = session.subscribe();
        rx.borrow_and_update();
        Self { current: Route::Home, session: rx }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    fn state(&self) -> SessionState {
        *self.session.borrow()
    }

    /// Navigate to `route`, applying the guard. Returns what was decided.
    pub fn go(&mut self, route: Route) -> GuardOutcome {
        let outcome = guard(route, self.state());
        if let GuardOutcome::Redirect(to) = outcome {
            tracing::debug!(from = %route, to = %to, "route guarded");
        }
        self.current = outcome.route();
        outcome
    }

    pub fn navigate(&mut self, path: &str) -> GuardOutcome {
        self.go(Route::from_path(path))
    }

    /// Apply any session transition seen since the last call without
    /// waiting. Returns the redirect target if the current view was lost.
    pub fn sync(&mut self) -> Option<Route> {
        match self.session.has_changed() {
            Ok(true) => {
                let state = *self.session.borrow_and_update();
                self.apply(state)
            }
            _ => None,
        }
    }

    /// Wait until a session transition forces the current view to change.
    /// Returns `None` once the session store has been dropped.
    pub async fn next_redirect(&mut self) -> Option<Route> {
        while self.session.changed().await.is_ok() {
            let state = *self.session.borrow_and_update();
            if let Some(route) = self.apply(state) {
                return Some(route);
            }
        }
        None
    }

    fn apply(&mut self, state: SessionState) -> Option<Route> {
        if should_redirect_unauth(self.current, state) {
            tracing::info!(from = %self.current, "session ended; redirecting to login");
            self.current = Route::Login;
            return Some(Route::Login);
        }
        None
    }
}
