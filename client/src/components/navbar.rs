//! Site navigation bar.
//!
//! SYSTEM CONTEXT
//! ==============
//! The bar re-renders on every session transition. Public links are always
//! present; the Admin link and the Logout action appear only while a token is
//! stored, otherwise the call to action is Donate.

#[cfg(test)]
#[path = "navbar_test.rs"]
mod navbar_test;

use crate::state::session::SessionState;
use crate::util::guard::Route;

/// Public links, in display order.
const PUBLIC_LINKS: [Route; 7] =
    [Route::Home, Route::About, Route::Book, Route::Team, Route::Gallery, Route::Stories, Route::Contact];

pub const SOCIAL_LINKS: [(&str, &str); 5] = [
    ("Facebook", "https://www.facebook.com/share/16CApxXZsK/?mibextid=wwXIfr"),
    ("TikTok", "https://www.tiktok.com/@reliance_melody?lang=en"),
    ("LinkedIn", "https://www.linkedin.com/in/borauzima-adelard-a6875b2ab"),
    ("Instagram", "https://www.instagram.com/reliance_initiative/"),
    ("Email", "mailto:info@reliancesoulfdn.org"),
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub route: Route,
    pub label: &'static str,
    pub active: bool,
}

/// Right-hand action button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Donate,
    Logout,
}

impl NavAction {
    pub fn label(self) -> &'static str {
        match self {
            Self::Donate => "Donate",
            Self::Logout => "Logout",
        }
    }
}

fn link_label(route: Route) -> &'static str {
    match route {
        Route::Admin => "Admin",
        other => other.title(),
    }
}

/// Links to show for `state`, marking the one matching `current`.
pub fn nav_links(state: SessionState, current: Route) -> Vec<NavLink> {
    let admin = (state == SessionState::Authenticated).then_some(Route::Admin);
    PUBLIC_LINKS
        .into_iter()
        .chain(admin)
        .map(|route| NavLink { route, label: link_label(route), active: route == current })
        .collect()
}

pub fn nav_action(state: SessionState) -> NavAction {
    match state {
        SessionState::Authenticated => NavAction::Logout,
        SessionState::Anonymous => NavAction::Donate,
    }
}

/// Where the action button leads. Logout returns home after clearing the
/// session.
pub fn action_target(action: NavAction) -> Route {
    match action {
        NavAction::Donate => Route::Donate,
        NavAction::Logout => Route::Home,
    }
}
