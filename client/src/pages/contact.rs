//! Contact form.

#[cfg(test)]
#[path = "contact_test.rs"]
mod contact_test;

use super::FormStatus;
use crate::net::http::ApiClient;
use crate::net::types::NewContactMessage;
use crate::util::validate::FieldErrors;

pub const MIN_MESSAGE_LEN: usize = 10;

pub const SUCCESS_MESSAGE: &str = "Thank you! Your message has been received.";
pub const REJECTED_MESSAGE: &str = "Something went wrong. Please try again.";
pub const FAILURE_MESSAGE: &str = "Failed to send message. Please try again later.";

/// Public contact addresses shown beside the form.
pub const CONTACT_EMAIL: &str = "info@reliancesoulfdn.org";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl ContactForm {
    /// # Errors
    ///
    /// Returns the failing fields when any input is missing, the email is
    /// malformed, or the message is shorter than [`MIN_MESSAGE_LEN`].
    pub fn validate(&self) -> Result<NewContactMessage, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.require("name", &self.name, "Name is required.");
        let email = errors.require_email("email", &self.email);
        let subject = errors.require("subject", &self.subject, "Subject is required.");
        let message = errors.require_min_len(
            "message",
            &self.message,
            MIN_MESSAGE_LEN,
            "Message must be at least 10 characters.",
        );
        errors.into_result(NewContactMessage { name, email, subject, message })
    }

    pub async fn submit(&mut self, client: &ApiClient) -> &FormStatus {
        let message = match self.validate() {
            Ok(message) => message,
            Err(errors) => {
                self.errors = errors;
                self.status = FormStatus::Invalid;
                return &self.status;
            }
        };
        self.errors = FieldErrors::new();
        self.status = FormStatus::Submitting;

        self.status = match client.contacts().send(&message).await {
            Ok(ack) if ack.success => {
                tracing::info!(subject = %message.subject, "contact message sent");
                *self = Self::default();
                FormStatus::Succeeded(SUCCESS_MESSAGE.to_owned())
            }
            Ok(_) => FormStatus::Failed(REJECTED_MESSAGE.to_owned()),
            Err(e) => FormStatus::Failed(e.user_message(FAILURE_MESSAGE)),
        };
        &self.status
    }
}
