//! Local form validation shared by the public forms and the admin login.
//!
//! Validation never touches the network: a form with any [`FieldErrors`]
//! does not submit.

#[cfg(test)]
#[path = "validate_test.rs"]
mod validate_test;

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_PATTERN: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// Basic `local@domain.tld` shape check, after trimming.
pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_PATTERN.as_ref().is_some_and(|re| re.is_match(raw.trim()))
}

/// Errors keyed by form field, in the order they were found.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: Vec<(&'static str, String)>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `message` for `field`. The first message per field wins.
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        if !self.has(field) {
            self.errors.push((field, message.into()));
        }
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.iter().any(|(f, _)| *f == field)
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.iter().find(|(f, _)| *f == field).map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// `Ok(value)` when nothing was recorded.
    ///
    /// # Errors
    ///
    /// Returns `self` if any field failed.
    pub fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }

    // Field checks. Each returns the trimmed value so callers can build the
    // payload from what was validated.

    pub fn require(&mut self, field: &'static str, raw: &str, message: &str) -> String {
        let value = raw.trim();
        if value.is_empty() {
            self.add(field, message);
        }
        value.to_owned()
    }

    pub fn require_email(&mut self, field: &'static str, raw: &str) -> String {
        let value = raw.trim();
        if value.is_empty() {
            self.add(field, "Email is required.");
        } else if !is_valid_email(value) {
            self.add(field, "Enter a valid email address.");
        }
        value.to_owned()
    }

    pub fn require_min_len(&mut self, field: &'static str, raw: &str, min: usize, message: &str) -> String {
        let value = raw.trim();
        if value.chars().count() < min {
            self.add(field, message);
        }
        value.to_owned()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}
