//! Typed operations per backend resource.
//!
//! SYSTEM CONTEXT
//! ==============
//! Views never build requests themselves. Each resource gets a small borrowed
//! handle off [`ApiClient`] (`client.bookings()`, `client.gallery()`, ...) whose
//! methods map 1:1 to a backend verb and path and shape the payload.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here catches errors. Every [`ApiError`] from the wrapper reaches
//! the caller unchanged so the view can pick its own message.
//!
//! TRADE-OFFS
//! ==========
//! Lists retry with the standard backoff by default; writes do not, since a
//! blind retry can duplicate a submission. Both can be overridden per call.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

use super::error::ApiError;
use super::http::{ApiClient, Call};
use super::retry::RetryPolicy;
use super::types::{
    Ack, Booking, ContactMessage, Credentials, DonationRequest, DonationSession, Donor, GalleryItem, MediaUpload,
    NewBooking, NewContactMessage,
};

fn booking_path(id: &str) -> String {
    format!("/api/admin/bookings/{id}")
}

fn booking_action_path(id: &str, action: &str) -> String {
    format!("/api/admin/bookings/{id}/{action}")
}

fn media_path(id: &str) -> String {
    format!("/api/admin/gallery/{id}")
}

impl ApiClient {
    pub fn bookings(&self) -> BookingsApi<'_> {
        BookingsApi { client: self, retry: None }
    }

    pub fn contacts(&self) -> ContactsApi<'_> {
        ContactsApi { client: self, retry: None }
    }

    pub fn donations(&self) -> DonationsApi<'_> {
        DonationsApi { client: self, retry: None }
    }

    pub fn gallery(&self) -> GalleryApi<'_> {
        GalleryApi { client: self, retry: None }
    }

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi { client: self }
    }

    /// Check `GET /`. Returns the body (JSON, or the raw text wrapped as a
    /// string) when the backend answers 2xx, `None` otherwise.
    pub async fn health_check(&self) -> Option<Value> {
        match self.send_text(&Call::get("/")).await {
            Ok(body) => Some(serde_json::from_str(&body).unwrap_or_else(|_| Value::String(body))),
            Err(e) => {
                tracing::warn!(error = %e, "health check failed");
                None
            }
        }
    }
}

// =============================================================================
// BOOKINGS
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct BookingsApi<'a> {
    client: &'a ApiClient,
    retry: Option<RetryPolicy>,
}

/// Approve/reject respond with the updated record wrapped in `{ booking }`.
#[derive(Deserialize)]
struct StatusChange {
    booking: Booking,
}

impl BookingsApi<'_> {
    /// Override the retry policy for calls made through this handle.
    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    fn policy(&self, default: RetryPolicy) -> RetryPolicy {
        self.retry.unwrap_or(default)
    }

    /// `POST /api/book`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn create(&self, booking: &NewBooking) -> Result<Ack, ApiError> {
        let call = Call::post("/api/book").json(booking)?.retry(self.policy(RetryPolicy::NONE));
        self.client.send(&call).await
    }

    /// `GET /api/admin/bookings`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Booking>, ApiError> {
        let call = Call::get("/api/admin/bookings").retry(self.policy(RetryPolicy::STANDARD));
        self.client.send(&call).await
    }

    /// `DELETE /api/admin/bookings/:id`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let call = Call::delete(booking_path(id)).retry(self.policy(RetryPolicy::NONE));
        self.client.send::<IgnoredAny>(&call).await.map(|_| ())
    }

    /// `PUT /api/admin/bookings/:id/approve`; returns the server's copy.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn approve(&self, id: &str) -> Result<Booking, ApiError> {
        self.change_status(id, "approve").await
    }

    /// `PUT /api/admin/bookings/:id/reject`; returns the server's copy.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn reject(&self, id: &str) -> Result<Booking, ApiError> {
        self.change_status(id, "reject").await
    }

    async fn change_status(&self, id: &str, action: &str) -> Result<Booking, ApiError> {
        let call = Call::put(booking_action_path(id, action)).retry(self.policy(RetryPolicy::NONE));
        let change: StatusChange = self.client.send(&call).await?;
        tracing::info!(booking = %change.booking.id, status = %change.booking.status, "booking status changed");
        Ok(change.booking)
    }
}

// =============================================================================
// CONTACTS
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct ContactsApi<'a> {
    client: &'a ApiClient,
    retry: Option<RetryPolicy>,
}

impl ContactsApi<'_> {
    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// `POST /api/contact`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn send(&self, message: &NewContactMessage) -> Result<Ack, ApiError> {
        let call = Call::post("/api/contact").json(message)?.retry(self.retry.unwrap_or(RetryPolicy::NONE));
        self.client.send(&call).await
    }

    /// `GET /api/admin/contacts`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<ContactMessage>, ApiError> {
        let call = Call::get("/api/admin/contacts").retry(self.retry.unwrap_or(RetryPolicy::STANDARD));
        self.client.send(&call).await
    }
}

// =============================================================================
// DONATIONS
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct DonationsApi<'a> {
    client: &'a ApiClient,
    retry: Option<RetryPolicy>,
}

impl DonationsApi<'_> {
    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// `POST /api/donate`. The response carries the hosted checkout URL.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn start(&self, request: &DonationRequest) -> Result<DonationSession, ApiError> {
        let call = Call::post("/api/donate").json(request)?.retry(self.retry.unwrap_or(RetryPolicy::NONE));
        self.client.send(&call).await
    }

    /// `GET /api/admin/donors`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<Donor>, ApiError> {
        let call = Call::get("/api/admin/donors").retry(self.retry.unwrap_or(RetryPolicy::STANDARD));
        self.client.send(&call).await
    }
}

// =============================================================================
// GALLERY
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct GalleryApi<'a> {
    client: &'a ApiClient,
    retry: Option<RetryPolicy>,
}

impl GalleryApi<'_> {
    #[must_use]
    pub fn with_retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// `GET /api/admin/gallery`. Also backs the public gallery page.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn list(&self) -> Result<Vec<GalleryItem>, ApiError> {
        let call = Call::get("/api/admin/gallery").retry(self.retry.unwrap_or(RetryPolicy::STANDARD));
        self.client.send(&call).await
    }

    /// `POST /api/admin/gallery/upload` as multipart (`title`, `caption`, `media`).
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn upload(&self, upload: MediaUpload) -> Result<(), ApiError> {
        tracing::debug!(file = %upload.file_name, bytes = upload.bytes.len(), "uploading media");
        let call = Call::post("/api/admin/gallery/upload")
            .multipart(upload)
            .retry(self.retry.unwrap_or(RetryPolicy::NONE));
        self.client.send::<IgnoredAny>(&call).await.map(|_| ())
    }

    /// `DELETE /api/admin/gallery/:id`
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request.
    pub async fn delete(&self, id: &str) -> Result<(), ApiError> {
        let call = Call::delete(media_path(id)).retry(self.retry.unwrap_or(RetryPolicy::NONE));
        self.client.send::<IgnoredAny>(&call).await.map(|_| ())
    }
}

// =============================================================================
// AUTH
// =============================================================================

#[derive(Clone, Copy, Debug)]
pub struct AuthApi<'a> {
    client: &'a ApiClient,
}

/// Result of a login attempt the backend answered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    /// Token stored; the session is now authenticated.
    Authenticated,
    /// Backend answered without a usable token, with its message if any.
    Rejected(Option<String>),
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl AuthApi<'_> {
    /// `POST /api/admin/login`. On `{ success: true, token }` the token is
    /// stored in the session.
    ///
    /// # Errors
    ///
    /// Propagates any [`ApiError`] from the request, and returns
    /// [`ApiError::Storage`] if the token cannot be persisted.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginOutcome, ApiError> {
        let call = Call::post("/api/admin/login").json(credentials)?;
        let response: LoginResponse = self.client.send(&call).await?;
        let token = response.token.filter(|t| !t.trim().is_empty());
        match token {
            Some(token) if response.success => {
                self.client.session().set(&token).map_err(|e| ApiError::Storage(e.to_string()))?;
                tracing::info!(email = %credentials.email, "admin logged in");
                Ok(LoginOutcome::Authenticated)
            }
            _ => {
                tracing::info!(email = %credentials.email, "login rejected");
                Ok(LoginOutcome::Rejected(response.message))
            }
        }
    }

    /// Clear the session locally. Returns `true` if a session was ended.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Storage`] if the persisted token cannot be removed.
    pub fn logout(&self) -> Result<bool, ApiError> {
        self.client.session().clear().map_err(|e| ApiError::Storage(e.to_string()))
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }
}
