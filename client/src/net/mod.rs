//! Networking modules for the backend REST service.
//!
//! SYSTEM CONTEXT
//! ==============
//! `http` is the single configured client wrapper, `retry` its backoff
//! policy, `error` the failure taxonomy, `api` the per-resource operations,
//! and `types` the wire schema mirrored from the backend.

pub mod api;
pub mod error;
pub mod http;
pub mod retry;
pub mod types;
