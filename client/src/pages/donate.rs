//! Donation page: hosted card checkout, or a manual-transfer request.
//!
//! SYSTEM CONTEXT
//! ==============
//! Card donations are handed to an external payment provider. The backend
//! creates a checkout session and returns its URL; this page only records the
//! URL for the front end to open. Manual donations are acknowledged locally
//! and followed up by staff.

#[cfg(test)]
#[path = "donate_test.rs"]
mod donate_test;

use super::FormStatus;
use crate::net::http::ApiClient;
use crate::net::types::{DonationRequest, Money};
use crate::util::validate::{FieldErrors, is_valid_email};

pub const MISSING_FIELDS_MESSAGE: &str = "Please enter both amount and email.";
pub const REDIRECT_MESSAGE: &str = "Redirecting to secure checkout...";
pub const NO_SESSION_MESSAGE: &str = "Could not start donation session.";
pub const FAILURE_MESSAGE: &str = "Something went wrong, please try again later.";

pub const MANUAL_MISSING_MESSAGE: &str = "Please fill in both fields.";
pub const MANUAL_THANKS_MESSAGE: &str = "Thank you! We'll contact you soon to assist with your donation.";

// =============================================================================
// CARD DONATION
// =============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DonateForm {
    /// Whole currency units, as typed.
    pub amount: String,
    pub email: String,
    pub errors: FieldErrors,
    pub status: FormStatus,
    /// Checkout page to open once the backend has created a session.
    pub checkout_url: Option<String>,
}

impl DonateForm {
    /// # Errors
    ///
    /// Returns the failing fields when the amount is missing or not positive,
    /// or the email is missing or malformed.
    pub fn validate(&self) -> Result<(Money, String), FieldErrors> {
        let mut errors = FieldErrors::new();
        let raw_amount = self.amount.trim();
        let email = self.email.trim();
        if raw_amount.is_empty() {
            errors.add("amount", MISSING_FIELDS_MESSAGE);
        }
        if email.is_empty() {
            errors.add("email", MISSING_FIELDS_MESSAGE);
        }

        let amount = raw_amount.parse::<f64>().ok().and_then(Money::from_major).filter(|m| m.cents() > 0);
        if amount.is_none() && !raw_amount.is_empty() {
            errors.add("amount", "Enter an amount greater than zero.");
        }
        if !email.is_empty() && !is_valid_email(email) {
            errors.add("email", "Enter a valid email address.");
        }

        match amount {
            Some(amount) if errors.is_empty() => Ok((amount, email.to_owned())),
            _ => Err(errors),
        }
    }

    pub async fn submit(&mut self, client: &ApiClient) -> &FormStatus {
        self.checkout_url = None;
        let (amount, donor_email) = match self.validate() {
            Ok(valid) => valid,
            Err(errors) => {
                self.errors = errors;
                self.status = FormStatus::Invalid;
                return &self.status;
            }
        };
        self.errors = FieldErrors::new();
        self.status = FormStatus::Submitting;

        let request = DonationRequest { amount: amount.as_major(), donor_email };
        self.status = match client.donations().start(&request).await {
            Ok(session) => match session.url.filter(|u| !u.trim().is_empty()) {
                Some(url) => {
                    tracing::info!(%amount, "donation checkout created");
                    self.checkout_url = Some(url);
                    FormStatus::Succeeded(REDIRECT_MESSAGE.to_owned())
                }
                None => FormStatus::Failed(NO_SESSION_MESSAGE.to_owned()),
            },
            Err(e) => FormStatus::Failed(e.user_message(FAILURE_MESSAGE)),
        };
        &self.status
    }
}

// =============================================================================
// MANUAL DONATION
// =============================================================================

/// Bank-transfer request: staff reach out using the given contact.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ManualDonationForm {
    pub name: String,
    /// Email or phone number.
    pub contact: String,
    pub status: FormStatus,
}

impl ManualDonationForm {
    pub fn submit(&mut self) -> &FormStatus {
        if self.name.trim().is_empty() || self.contact.trim().is_empty() {
            self.status = FormStatus::Failed(MANUAL_MISSING_MESSAGE.to_owned());
            return &self.status;
        }
        tracing::info!(name = %self.name.trim(), "manual donation requested");
        *self = Self { status: FormStatus::Succeeded(MANUAL_THANKS_MESSAGE.to_owned()), ..Self::default() };
        &self.status
    }
}
