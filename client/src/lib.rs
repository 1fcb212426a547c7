//! Client core for the Reliance Soul site and admin console.
//!
//! SYSTEM CONTEXT
//! ==============
//! `net` talks to the backend REST service, `state` owns the session and
//! view-local state, `util` holds routing and validation helpers, and
//! `pages`/`components` are the view-models a front end renders.

pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

pub use config::{ClientConfig, ConfigError};
pub use net::error::ApiError;
pub use net::http::ApiClient;
pub use net::retry::RetryPolicy;
pub use state::session::{SessionState, SessionStore};
