use super::*;
use crate::net::types::{BookingCategory, MediaType};

fn booking(id: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_owned(),
        name: "Amani".to_owned(),
        email: "amani@example.org".to_owned(),
        phone: "0788".to_owned(),
        category: BookingCategory::Podcast.into(),
        date: "2025-05-02".to_owned(),
        time: "14:00".to_owned(),
        duration: 2,
        notes: None,
        status,
        created_at: None,
    }
}

fn donor(id: &str, cents: i64) -> Donor {
    Donor { id: id.to_owned(), email: Some(format!("{id}@example.org")), amount: Money::from_cents(cents), created_at: None }
}

fn media(id: &str) -> GalleryItem {
    GalleryItem {
        id: id.to_owned(),
        title: "Choir".to_owned(),
        caption: String::new(),
        media_type: MediaType::Image,
        media_url: format!("/uploads/{id}.jpg"),
    }
}

#[test]
fn tab_parse_and_labels() {
    assert_eq!(AdminTab::parse("donors"), Some(AdminTab::Donors));
    assert_eq!(AdminTab::parse(" Overview "), Some(AdminTab::Overview));
    assert_eq!(AdminTab::parse("settings"), None);
    assert_eq!(AdminTab::default(), AdminTab::Overview);
}

#[test]
fn stats_only_count_loaded_slots() {
    let state = DashboardState {
        bookings: Slot::Ready(vec![booking("b1", BookingStatus::Pending), booking("b2", BookingStatus::Approved)]),
        donors: Slot::Ready(vec![donor("d1", 1000), donor("d2", 2550)]),
        contacts: Slot::Failed("Server error".to_owned()),
        ..DashboardState::default()
    };

    let stats = state.stats();
    assert_eq!(stats.total_bookings, 2);
    assert_eq!(stats.pending_bookings, 1);
    assert_eq!(stats.total_contacts, 0);
    assert_eq!(stats.total_donors, 2);
    assert_eq!(stats.total_donations, Money::from_cents(3550));
    assert_eq!(stats.gallery_items, 0);
    assert!(state.gallery.is_loading());
}

#[test]
fn recent_lists_cap_at_limit() {
    let bookings = (0..8).map(|i| booking(&format!("b{i}"), BookingStatus::Pending)).collect();
    let state = DashboardState {
        bookings: Slot::Ready(bookings),
        donors: Slot::Ready(vec![donor("d1", 100)]),
        ..DashboardState::default()
    };

    let recent = state.recent_bookings(RECENT_LIMIT);
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].id, "b0");
    assert_eq!(state.recent_donations(RECENT_LIMIT).len(), 1);
}

#[test]
fn replace_booking_swaps_server_copy() {
    let mut state = DashboardState {
        bookings: Slot::Ready(vec![booking("b1", BookingStatus::Pending)]),
        ..DashboardState::default()
    };

    assert!(state.replace_booking(booking("b1", BookingStatus::Approved)));
    assert_eq!(state.find_booking("b1").map(|b| b.status), Some(BookingStatus::Approved));
    assert!(!state.replace_booking(booking("missing", BookingStatus::Rejected)));
}

#[test]
fn removals_report_whether_anything_changed() {
    let mut state = DashboardState {
        bookings: Slot::Ready(vec![booking("b1", BookingStatus::Pending)]),
        gallery: Slot::Ready(vec![media("g1"), media("g2")]),
        ..DashboardState::default()
    };

    assert!(state.remove_booking("b1"));
    assert!(!state.remove_booking("b1"));
    assert!(state.remove_media("g2"));
    assert_eq!(state.gallery.items().len(), 1);
}

#[test]
fn mutations_on_unloaded_slots_are_noops() {
    let mut state = DashboardState::default();
    assert!(!state.remove_media("g1"));
    assert!(!state.replace_booking(booking("b1", BookingStatus::Approved)));
}
