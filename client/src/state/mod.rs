//! Client state: the shared session plus view-local state containers.

pub mod dashboard;
pub mod mount;
pub mod session;
