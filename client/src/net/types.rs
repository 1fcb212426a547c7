//! Wire schema mirrored from the backend's records.
//!
//! DESIGN
//! ======
//! The backend owns every record; these types only mirror the JSON shapes
//! (`_id`, camelCase timestamps) closely enough to display and moderate them.
//! Deserialization is lenient where the backend has been observed to drift:
//! durations arrive as numbers or strings, donor email under two names, and
//! amounts may be missing.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Longest caption the gallery accepts.
pub const MAX_CAPTION_LEN: usize = 150;
/// Bookable session length bounds, in hours.
pub const MIN_BOOKING_HOURS: u8 = 1;
pub const MAX_BOOKING_HOURS: u8 = 8;

// =============================================================================
// BOOKINGS
// =============================================================================

/// Studio space or service a booking is for. Serialized as the backend's
/// display strings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BookingCategory {
    #[serde(rename = "Podcast")]
    Podcast,
    #[serde(rename = "Song Recording")]
    SongRecording,
    #[serde(rename = "Mastering")]
    Mastering,
    #[serde(rename = "Video Equipment")]
    VideoEquipment,
    #[serde(rename = "Sound System")]
    SoundSystem,
    #[serde(rename = "Photo Shoot")]
    PhotoShoot,
}

impl BookingCategory {
    pub const ALL: [Self; 6] = [
        Self::Podcast,
        Self::SongRecording,
        Self::Mastering,
        Self::VideoEquipment,
        Self::SoundSystem,
        Self::PhotoShoot,
    ];

    /// Value sent to and stored by the backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Podcast => "Podcast",
            Self::SongRecording => "Song Recording",
            Self::Mastering => "Mastering",
            Self::VideoEquipment => "Video Equipment",
            Self::SoundSystem => "Sound System",
            Self::PhotoShoot => "Photo Shoot",
        }
    }

    /// Name of the studio space shown on the booking page.
    pub fn space_name(self) -> &'static str {
        match self {
            Self::Podcast => "Podcast Room",
            Self::SongRecording => "Music Studio",
            Self::Mastering => "Mastering Suite",
            Self::VideoEquipment => "Video Studio",
            Self::SoundSystem => "Sound System Rental",
            Self::PhotoShoot => "Photo Studio",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Podcast => "Record your podcast with premium mics and acoustic walls.",
            Self::SongRecording => "Professional setup for vocal and instrumental recording.",
            Self::Mastering => "Mix and master your sound with high-end equipment.",
            Self::VideoEquipment => "Film and edit high-quality video projects.",
            Self::SoundSystem => "Rent speakers and gear for your next event.",
            Self::PhotoShoot => "Shoot stunning portraits with perfect lighting.",
        }
    }

    /// Parse a wire value, space name, or kebab-case form, ignoring case.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim().to_ascii_lowercase().replace(['-', '_'], " ");
        Self::ALL.into_iter().find(|category| {
            category.as_str().to_ascii_lowercase() == needle || category.space_name().to_ascii_lowercase() == needle
        })
    }
}

impl fmt::Display for BookingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category as recorded on a stored booking. Records written before the
/// category list settled may carry any text, including an empty string.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum StoredCategory {
    Known(BookingCategory),
    Other(String),
}

impl StoredCategory {
    pub fn known(&self) -> Option<BookingCategory> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Other(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Known(category) => category.as_str(),
            Self::Other(raw) => raw,
        }
    }
}

impl Default for StoredCategory {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<BookingCategory> for StoredCategory {
    fn from(category: BookingCategory) -> Self {
        Self::Known(category)
    }
}

impl PartialEq<BookingCategory> for StoredCategory {
    fn eq(&self, other: &BookingCategory) -> bool {
        self.known() == Some(*other)
    }
}

impl fmt::Display for StoredCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Other(raw) if raw.trim().is_empty() => f.write_str("Uncategorized"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl Serialize for StoredCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for StoredCategory {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_text(deserializer)?;
        Ok(BookingCategory::parse(&raw).map_or(Self::Other(raw), Self::Known))
    }
}

/// Moderation status of a booking. Unrecognized wire values decode as
/// [`BookingStatus::Unknown`] and cannot be moderated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BookingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Unknown,
}

impl BookingStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }

    /// Parse a wire value, ignoring case and surrounding whitespace.
    pub fn parse(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "" | "pending" => Self::Pending,
            "approved" => Self::Approved,
            "rejected" => Self::Rejected,
            _ => Self::Unknown,
        }
    }

    /// Only pending bookings move, and only to approved or rejected.
    pub fn can_transition_to(self, next: Self) -> bool {
        self == Self::Pending && matches!(next, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BookingStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for BookingStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_text(deserializer)?;
        Ok(Self::parse(&raw))
    }
}

/// A studio booking as stored by the backend.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub category: StoredCategory,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    /// Session length in hours.
    #[serde(default, deserialize_with = "deserialize_hours")]
    pub duration: u8,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub status: BookingStatus,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/book`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewBooking {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub category: BookingCategory,
    /// `YYYY-MM-DD`.
    pub date: String,
    /// `HH:MM`, 24-hour.
    pub time: String,
    pub duration: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// =============================================================================
// CONTACT
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/contact`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewContactMessage {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

// =============================================================================
// DONATIONS
// =============================================================================

/// A monetary amount held in minor units (cents).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money {
    cents: i64,
}

impl Money {
    pub const ZERO: Self = Self { cents: 0 };

    pub const fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Convert a whole-unit amount (e.g. `12.5` dollars), rounding to the cent.
    /// Returns `None` for non-finite or out-of-range input.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    pub fn from_major(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        if !cents.is_finite() || cents < i64::MIN as f64 || cents > i64::MAX as f64 {
            return None;
        }
        Some(Self { cents: cents as i64 })
    }

    pub const fn cents(self) -> i64 {
        self.cents
    }

    /// Whole-unit value as sent to the backend.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_major(self) -> f64 {
        self.cents as f64 / 100.0
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { cents: self.cents.saturating_add(rhs.cents) }
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.cents < 0 { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        write!(f, "{sign}${}.{:02}", abs / 100, abs % 100)
    }
}

/// A completed or started donation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Donor {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, alias = "donorEmail")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "deserialize_money")]
    pub amount: Money,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Body for `POST /api/donate`. `amount` is in whole currency units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DonationRequest {
    pub amount: f64,
    #[serde(rename = "donorEmail")]
    pub donor_email: String,
}

/// Response from `POST /api/donate`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct DonationSession {
    /// Hosted checkout page to send the donor to.
    #[serde(default)]
    pub url: Option<String>,
}

// =============================================================================
// GALLERY
// =============================================================================

/// Anything the backend labels other than `video` is shown as an image.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    #[default]
    Image,
    Video,
}

impl<'de> Deserialize<'de> for MediaType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = lenient_text(deserializer)?;
        Ok(if raw.trim().eq_ignore_ascii_case("video") { Self::Video } else { Self::Image })
    }
}

impl MediaType {
    /// Media type and MIME string for an uploadable file name.
    ///
    /// Images of common web formats and MP4 video are accepted.
    pub fn from_file_name(name: &str) -> Option<(Self, &'static str)> {
        let ext = name.rsplit_once('.')?.1.to_ascii_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some((Self::Image, "image/jpeg")),
            "png" => Some((Self::Image, "image/png")),
            "gif" => Some((Self::Image, "image/gif")),
            "webp" => Some((Self::Image, "image/webp")),
            "mp4" => Some((Self::Video, "video/mp4")),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryItem {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub caption: String,
    #[serde(rename = "mediaType", default)]
    pub media_type: MediaType,
    /// Absolute URL, or a path relative to the API base.
    #[serde(rename = "mediaUrl", default)]
    pub media_url: String,
}

/// File plus metadata for `POST /api/admin/gallery/upload`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaUpload {
    pub title: String,
    pub caption: String,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

// =============================================================================
// AUTH + ACKS
// =============================================================================

/// Body for `POST /api/admin/login`.
#[derive(Clone, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Generic `{ success, message }` acknowledgement for public submissions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

// =============================================================================
// LENIENT DESERIALIZERS
// =============================================================================

/// Text of a string value; any other JSON value reads as empty.
fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(raw) => Ok(raw),
        _ => Ok(String::new()),
    }
}

fn deserialize_hours<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let hours = match &value {
        serde_json::Value::Null => return Ok(0),
        serde_json::Value::Number(number) => number.as_u64(),
        serde_json::Value::String(raw) => raw.trim().parse::<u64>().ok(),
        _ => None,
    };
    hours
        .and_then(|h| u8::try_from(h).ok())
        .ok_or_else(|| D::Error::custom(format!("invalid booking duration: {value}")))
}

fn deserialize_money<'de, D>(deserializer: D) -> Result<Money, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let amount = match &value {
        serde_json::Value::Null => return Ok(Money::ZERO),
        serde_json::Value::Number(number) => number.as_f64(),
        serde_json::Value::String(raw) => raw.trim().parse::<f64>().ok(),
        _ => None,
    };
    amount
        .and_then(Money::from_major)
        .ok_or_else(|| D::Error::custom(format!("invalid amount: {value}")))
}
