//! Admin dashboard page: loads the four resource lists and runs moderation.
//!
//! SYSTEM CONTEXT
//! ==============
//! Only reachable through the route guard. A 401 on any call here clears the
//! session inside the HTTP layer; the navigator then moves the admin to
//! `/login`, so this page just records the failed slot or notice.
//!
//! DESIGN
//! ======
//! `load` issues the four list fetches concurrently. Each fetch writes only
//! its own slot, and only while the page is still mounted. Moderation always
//! round-trips: the list changes only after the backend confirms.
//!
//! ERROR HANDLING
//! ==============
//! Moderation and deletes return `Err` with the notice text whenever the
//! action did not happen, including moderation against a booking list that
//! never loaded. Callers can tell a refusal from a success without
//! comparing strings.

#[cfg(test)]
#[path = "admin_test.rs"]
mod admin_test;

use std::path::PathBuf;

use super::FormStatus;
use crate::net::error::ApiError;
use crate::net::http::ApiClient;
use crate::net::types::{BookingStatus, MAX_CAPTION_LEN, MediaType, MediaUpload};
use crate::state::dashboard::{AdminTab, DashboardState, Slot};
use crate::state::mount::Mount;
use crate::util::validate::FieldErrors;

pub const LOAD_FAILURE: &str = "Could not load data.";
pub const APPROVED_NOTICE: &str = "Booking approved and user notified.";
pub const REJECTED_NOTICE: &str = "Booking marked rejected and user notified.";
pub const APPROVE_FAILURE: &str = "Failed to approve booking";
pub const REJECT_FAILURE: &str = "Failed to reject booking";
pub const BOOKING_DELETED_NOTICE: &str = "Booking deleted.";
pub const BOOKING_DELETE_FAILURE: &str = "Failed to delete booking";
pub const MEDIA_DELETED_NOTICE: &str = "Media deleted.";
pub const MEDIA_DELETE_FAILURE: &str = "Failed to delete media";
pub const UPLOADED_NOTICE: &str = "Media uploaded.";
pub const UPLOAD_FAILURE: &str = "Upload failed. Please try again.";
pub const NOT_FOUND_NOTICE: &str = "Booking not found.";

/// Notice for a finished admin action, or the failure text. Either way the
/// same text is left in [`DashboardState::notice`] while the page is mounted.
pub type ActionResult<'a> = Result<&'a str, String>;

/// Empty-list text per tab. The overview uses the "recent" wording.
pub fn empty_message(tab: AdminTab) -> &'static str {
    match tab {
        AdminTab::Overview => "No bookings yet",
        AdminTab::Bookings => "No bookings found",
        AdminTab::Contacts => "No contacts yet",
        AdminTab::Donors => "No donations yet",
        AdminTab::Gallery => "No media uploaded yet.",
    }
}

fn to_slot<T>(result: Result<Vec<T>, ApiError>, resource: &str) -> Slot<T> {
    match result {
        Ok(items) => Slot::Ready(items),
        Err(e) => {
            tracing::warn!(resource, error = %e, "admin list fetch failed");
            Slot::Failed(e.user_message(LOAD_FAILURE))
        }
    }
}

// =============================================================================
// UPLOAD FORM
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadForm {
    pub title: String,
    pub caption: String,
    pub file: Option<PathBuf>,
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl UploadForm {
    /// Validate the fields and read the file.
    ///
    /// # Errors
    ///
    /// Returns the failing fields: blank title, caption over
    /// [`MAX_CAPTION_LEN`] characters, missing or unreadable file, or a file
    /// that is not an image or MP4 video.
    pub async fn prepare(&self) -> Result<MediaUpload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let title = errors.require("title", &self.title, "Title is required.");
        let caption = self.caption.trim().to_owned();
        if caption.chars().count() > MAX_CAPTION_LEN {
            errors.add("caption", "Caption must be 150 characters or fewer.");
        }

        let Some(path) = self.file.as_ref() else {
            errors.add("media", "Choose an image or MP4 video.");
            return Err(errors);
        };
        let file_name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default().to_owned();
        let Some((_, mime)) = MediaType::from_file_name(&file_name) else {
            errors.add("media", "Only images and MP4 videos can be uploaded.");
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(MediaUpload { title, caption, file_name, mime, bytes }),
            Err(e) => {
                errors.add("media", format!("Could not read {}: {e}", path.display()));
                Err(errors)
            }
        }
    }
}

// =============================================================================
// PAGE
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct AdminPage {
    pub state: DashboardState,
    pub mount: Mount,
}

impl AdminPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch bookings, contacts, donors, and gallery concurrently.
    pub async fn load(&mut self, client: &ApiClient) -> &DashboardState {
        let mount = &self.mount;
        let DashboardState { bookings, contacts, donors, gallery, .. } = &mut self.state;
        *bookings = Slot::Loading;
        *contacts = Slot::Loading;
        *donors = Slot::Loading;
        *gallery = Slot::Loading;

        tokio::join!(
            async {
                let result = client.bookings().list().await;
                if let Some(result) = mount.accept(result) {
                    *bookings = to_slot(result, "bookings");
                }
            },
            async {
                let result = client.contacts().list().await;
                if let Some(result) = mount.accept(result) {
                    *contacts = to_slot(result, "contacts");
                }
            },
            async {
                let result = client.donations().list().await;
                if let Some(result) = mount.accept(result) {
                    *donors = to_slot(result, "donors");
                }
            },
            async {
                let result = client.gallery().list().await;
                if let Some(result) = mount.accept(result) {
                    *gallery = to_slot(result, "gallery");
                }
            },
        );
        &self.state
    }

    fn notify(&mut self, notice: &str) -> ActionResult<'_> {
        self.state.notice = Some(notice.to_owned());
        Ok(notice_ref(&self.state))
    }

    fn fail(&mut self, message: String) -> ActionResult<'_> {
        self.state.notice = Some(message.clone());
        Err(message)
    }

    /// Approve a pending booking.
    ///
    /// # Errors
    ///
    /// Returns the notice text when the booking list failed to load, the
    /// booking is missing or no longer pending, or the backend refuses.
    pub async fn approve(&mut self, client: &ApiClient, id: &str) -> ActionResult<'_> {
        self.moderate(client, id, BookingStatus::Approved).await
    }

    /// Reject a pending booking.
    ///
    /// # Errors
    ///
    /// Same cases as [`AdminPage::approve`].
    pub async fn reject(&mut self, client: &ApiClient, id: &str) -> ActionResult<'_> {
        self.moderate(client, id, BookingStatus::Rejected).await
    }

    async fn moderate(&mut self, client: &ApiClient, id: &str, next: BookingStatus) -> ActionResult<'_> {
        if let Slot::Failed(message) = &self.state.bookings {
            let message = message.clone();
            return self.fail(message);
        }
        let Some(current) = self.state.find_booking(id).map(|b| b.status) else {
            return self.fail(NOT_FOUND_NOTICE.to_owned());
        };
        if !current.can_transition_to(next) {
            return self.fail(format!("Booking is already {current}."));
        }

        let (result, success, failure) = match next {
            BookingStatus::Approved => (client.bookings().approve(id).await, APPROVED_NOTICE, APPROVE_FAILURE),
            _ => (client.bookings().reject(id).await, REJECTED_NOTICE, REJECT_FAILURE),
        };
        let result = match result {
            Ok(updated) => Ok(updated),
            Err(e) => {
                tracing::warn!(booking = id, error = %e, "moderation failed");
                Err(failure)
            }
        };
        if !self.mount.is_mounted() {
            return result.map(|_| success).map_err(str::to_owned);
        }
        match result {
            Ok(updated) => {
                self.state.replace_booking(updated);
                self.notify(success)
            }
            Err(failure) => self.fail(failure.to_owned()),
        }
    }

    /// Delete a booking and drop it from the list once the backend confirms.
    ///
    /// # Errors
    ///
    /// Returns [`BOOKING_DELETE_FAILURE`] when the backend call fails.
    pub async fn delete_booking(&mut self, client: &ApiClient, id: &str) -> ActionResult<'_> {
        let result = client.bookings().delete(id).await;
        if let Err(e) = &result {
            tracing::warn!(booking = id, error = %e, "booking delete failed");
        }
        if !self.mount.is_mounted() {
            return result.map(|()| BOOKING_DELETED_NOTICE).map_err(|_| BOOKING_DELETE_FAILURE.to_owned());
        }
        match result {
            Ok(()) => {
                self.state.remove_booking(id);
                self.notify(BOOKING_DELETED_NOTICE)
            }
            Err(_) => self.fail(BOOKING_DELETE_FAILURE.to_owned()),
        }
    }

    /// Delete a gallery item and drop it from the list once the backend
    /// confirms.
    ///
    /// # Errors
    ///
    /// Returns [`MEDIA_DELETE_FAILURE`] when the backend call fails.
    pub async fn delete_media(&mut self, client: &ApiClient, id: &str) -> ActionResult<'_> {
        let result = client.gallery().delete(id).await;
        if let Err(e) = &result {
            tracing::warn!(media = id, error = %e, "media delete failed");
        }
        if !self.mount.is_mounted() {
            return result.map(|()| MEDIA_DELETED_NOTICE).map_err(|_| MEDIA_DELETE_FAILURE.to_owned());
        }
        match result {
            Ok(()) => {
                self.state.remove_media(id);
                self.notify(MEDIA_DELETED_NOTICE)
            }
            Err(_) => self.fail(MEDIA_DELETE_FAILURE.to_owned()),
        }
    }

    /// Validate and upload, then refetch the gallery list. The form is reset
    /// on success.
    pub async fn upload(&mut self, client: &ApiClient, form: &mut UploadForm) -> FormStatus {
        let upload = match form.prepare().await {
            Ok(upload) => upload,
            Err(errors) => {
                form.errors = errors;
                form.status = FormStatus::Invalid;
                return form.status.clone();
            }
        };
        form.errors = FieldErrors::new();
        form.status = FormStatus::Submitting;

        let status = match client.gallery().upload(upload).await {
            Ok(()) => {
                let refreshed = client.gallery().list().await;
                if self.mount.is_mounted() {
                    self.state.gallery = to_slot(refreshed, "gallery");
                    self.state.notice = Some(UPLOADED_NOTICE.to_owned());
                }
                *form = UploadForm::default();
                FormStatus::Succeeded(UPLOADED_NOTICE.to_owned())
            }
            Err(e) => {
                tracing::warn!(error = %e, "media upload failed");
                FormStatus::Failed(e.user_message(UPLOAD_FAILURE))
            }
        };
        form.status = status.clone();
        status
    }
}

fn notice_ref(state: &DashboardState) -> &str {
    state.notice.as_deref().unwrap_or_default()
}
