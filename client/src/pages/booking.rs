//! Studio booking form.
//!
//! Visitors pick a studio space, a date and start time, and a session length
//! of one to eight hours. The booking is created as `pending`; an admin
//! approves or rejects it from the dashboard.

#[cfg(test)]
#[path = "booking_test.rs"]
mod booking_test;

use chrono::{NaiveDate, NaiveTime};

use super::FormStatus;
use crate::net::http::ApiClient;
use crate::net::types::{BookingCategory, MAX_BOOKING_HOURS, MIN_BOOKING_HOURS, NewBooking};
use crate::util::validate::FieldErrors;

pub const SUCCESS_MESSAGE: &str = "Booking confirmed! Check your email.";
pub const REJECTED_MESSAGE: &str = "Something went wrong. Try again.";
pub const FAILURE_MESSAGE: &str = "Server error. Please try later.";

/// Raw form input, as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookingForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: String,
    /// `YYYY-MM-DD`
    pub date: String,
    /// `HH:MM`
    pub time: String,
    /// Whole hours.
    pub duration: String,
    pub notes: String,
    pub errors: FieldErrors,
    pub status: FormStatus,
}

impl BookingForm {
    /// Preselect a category, e.g. from a `?category=` link.
    pub fn with_category(category: BookingCategory) -> Self {
        Self { category: category.as_str().to_owned(), ..Self::default() }
    }

    /// Check every field and build the request body.
    ///
    /// # Errors
    ///
    /// Returns the failing fields when any input is missing or malformed.
    pub fn validate(&self) -> Result<NewBooking, FieldErrors> {
        let mut errors = FieldErrors::new();
        let name = errors.require("name", &self.name, "Name is required.");
        let email = errors.require_email("email", &self.email);
        let phone = errors.require("phone", &self.phone, "Phone number is required.");

        let category = BookingCategory::parse(&self.category);
        if category.is_none() {
            errors.add("category", "Choose a studio space.");
        }

        let date = self.date.trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            errors.add("date", "Enter a date as YYYY-MM-DD.");
        }
        let time = self.time.trim();
        if NaiveTime::parse_from_str(time, "%H:%M").is_err() {
            errors.add("time", "Enter a start time as HH:MM.");
        }

        let duration = parse_duration(&self.duration);
        if duration.is_none() {
            errors.add("duration", "Duration must be between 1 and 8 hours.");
        }

        let notes = self.notes.trim();
        match (category, duration) {
            (Some(category), Some(duration)) if errors.is_empty() => Ok(NewBooking {
                name,
                email,
                phone,
                category,
                date: date.to_owned(),
                time: time.to_owned(),
                duration,
                notes: (!notes.is_empty()).then(|| notes.to_owned()),
            }),
            _ => Err(errors),
        }
    }

    /// Validate and submit. Invalid input never reaches the network.
    pub async fn submit(&mut self, client: &ApiClient) -> &FormStatus {
        let booking = match self.validate() {
            Ok(booking) => booking,
            Err(errors) => {
                self.errors = errors;
                self.status = FormStatus::Invalid;
                return &self.status;
            }
        };
        self.errors = FieldErrors::new();
        self.status = FormStatus::Submitting;

        self.status = match client.bookings().create(&booking).await {
            Ok(ack) if ack.success => {
                tracing::info!(category = %booking.category, date = %booking.date, "booking submitted");
                self.clear_inputs();
                FormStatus::Succeeded(SUCCESS_MESSAGE.to_owned())
            }
            Ok(_) => FormStatus::Failed(REJECTED_MESSAGE.to_owned()),
            Err(e) => FormStatus::Failed(e.user_message(FAILURE_MESSAGE)),
        };
        &self.status
    }

    fn clear_inputs(&mut self) {
        *self = Self::default();
    }
}

/// Whole hours within the bookable range.
fn parse_duration(raw: &str) -> Option<u8> {
    raw.trim().parse::<u8>().ok().filter(|h| (MIN_BOOKING_HOURS..=MAX_BOOKING_HOURS).contains(h))
}
