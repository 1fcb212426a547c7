//! Helpers shared across pages and components.
//!
//! SYSTEM CONTEXT
//! ==============
//! Routing and validation live here so view-models stay free of navigation
//! and pattern-matching details.

pub mod guard;
pub mod validate;
