//! View-models for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! Each page owns its input fields, runs local validation, calls the domain
//! API, and records an outcome a front end can render. Pages never navigate
//! on their own; the login page returns the route it wants and the
//! [`crate::util::guard::Navigator`] handles session loss.

pub mod admin;
pub mod booking;
pub mod contact;
pub mod donate;
pub mod gallery;
pub mod login;
pub mod site;

/// Submission lifecycle shared by every form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    /// Local validation failed; see the form's field errors.
    Invalid,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl FormStatus {
    /// Text to show under the form, if any.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Succeeded(message) | Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_submitting(&self) -> bool {
        matches!(self, Self::Submitting)
    }
}
