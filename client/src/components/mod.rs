//! Reusable pieces shared by every page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Components read the session state passed in by the front end and return
//! plain data to render. They never call the backend.

pub mod navbar;
