//! Admin dashboard state: one independent slot per resource list.
//!
//! DESIGN
//! ======
//! The four lists load concurrently and finish in any order, so each lives in
//! its own [`Slot`] and a completion only ever writes its own slot. Overview
//! stats are derived on demand from whatever has loaded so far.

#[cfg(test)]
#[path = "dashboard_test.rs"]
mod dashboard_test;

use crate::net::types::{Booking, BookingStatus, ContactMessage, Donor, GalleryItem, Money};

/// Number of entries in the overview's "recent" lists.
pub const RECENT_LIMIT: usize = 5;

/// Dashboard tabs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AdminTab {
    #[default]
    Overview,
    Bookings,
    Contacts,
    Donors,
    Gallery,
}

impl AdminTab {
    pub const ALL: [Self; 5] = [Self::Overview, Self::Bookings, Self::Contacts, Self::Donors, Self::Gallery];

    pub fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Bookings => "Bookings",
            Self::Contacts => "Contacts",
            Self::Donors => "Donors",
            Self::Gallery => "Gallery",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL.into_iter().find(|tab| tab.label().eq_ignore_ascii_case(needle))
    }
}

/// Load state of one list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Slot<T> {
    Loading,
    Ready(Vec<T>),
    Failed(String),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::Loading
    }
}

impl<T> Slot<T> {
    /// Items when loaded, otherwise an empty slice.
    pub fn items(&self) -> &[T] {
        match self {
            Self::Ready(items) => items,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    fn items_mut(&mut self) -> Option<&mut Vec<T>> {
        match self {
            Self::Ready(items) => Some(items),
            _ => None,
        }
    }
}

/// Overview counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DashboardStats {
    pub total_bookings: usize,
    pub pending_bookings: usize,
    pub total_contacts: usize,
    pub total_donors: usize,
    pub total_donations: Money,
    pub gallery_items: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    pub tab: AdminTab,
    pub bookings: Slot<Booking>,
    pub contacts: Slot<ContactMessage>,
    pub donors: Slot<Donor>,
    pub gallery: Slot<GalleryItem>,
    /// Last moderation or upload notice.
    pub notice: Option<String>,
}

impl DashboardState {
    pub fn stats(&self) -> DashboardStats {
        let bookings = self.bookings.items();
        let donors = self.donors.items();
        DashboardStats {
            total_bookings: bookings.len(),
            pending_bookings: bookings.iter().filter(|b| b.status == BookingStatus::Pending).count(),
            total_contacts: self.contacts.items().len(),
            total_donors: donors.len(),
            total_donations: donors.iter().map(|d| d.amount).sum(),
            gallery_items: self.gallery.items().len(),
        }
    }

    /// First `n` bookings in backend order (newest first).
    pub fn recent_bookings(&self, n: usize) -> &[Booking] {
        let items = self.bookings.items();
        &items[..items.len().min(n)]
    }

    pub fn recent_donations(&self, n: usize) -> &[Donor] {
        let items = self.donors.items();
        &items[..items.len().min(n)]
    }

    pub fn find_booking(&self, id: &str) -> Option<&Booking> {
        self.bookings.items().iter().find(|b| b.id == id)
    }

    /// Swap in the server's copy of a booking. Returns `false` if it is not
    /// in the loaded list.
    pub fn replace_booking(&mut self, updated: Booking) -> bool {
        let Some(items) = self.bookings.items_mut() else {
            return false;
        };
        match items.iter_mut().find(|b| b.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn remove_booking(&mut self, id: &str) -> bool {
        remove_by(self.bookings.items_mut(), |b| b.id == id)
    }

    pub fn remove_media(&mut self, id: &str) -> bool {
        remove_by(self.gallery.items_mut(), |g| g.id == id)
    }
}

fn remove_by<T>(items: Option<&mut Vec<T>>, matches: impl Fn(&T) -> bool) -> bool {
    let Some(items) = items else {
        return false;
    };
    let before = items.len();
    items.retain(|item| !matches(item));
    items.len() != before
}
