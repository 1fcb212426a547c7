//! Plain-text rendering of client view-models for the terminal.
//!
//! Every function here is pure: it takes state the client crate already
//! computed and returns the text to print.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use client::SessionState;
use client::components::navbar::{self, SOCIAL_LINKS};
use client::net::types::{Booking, ContactMessage, Donor, GalleryItem, MediaType};
use client::pages::admin::empty_message;
use client::pages::gallery::{GalleryCard, GalleryView};
use client::pages::site::{self, Section, TeamGroup, TeamMember};
use client::state::dashboard::{AdminTab, DashboardState, RECENT_LIMIT, Slot};
use client::util::guard::Route;

/// Static pages the CLI can print.
#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum SitePage {
    Home,
    About,
    Team,
    Stories,
}

impl SitePage {
    pub fn route(self) -> Route {
        match self {
            Self::Home => Route::Home,
            Self::About => Route::About,
            Self::Team => Route::Team,
            Self::Stories => Route::Stories,
        }
    }
}

// =============================================================================
// CHROME
// =============================================================================

/// One-line navbar with the active link in brackets.
pub fn navbar(state: SessionState, current: Route) -> String {
    let links: Vec<String> = navbar::nav_links(state, current)
        .into_iter()
        .map(|link| if link.active { format!("[{}]", link.label) } else { link.label.to_owned() })
        .collect();
    format!("{} | ({})", links.join(" | "), navbar::nav_action(state).label())
}

fn section_lines(lines: &mut Vec<String>, heading: &str, items: &[Section]) {
    lines.push(String::new());
    lines.push(heading.to_owned());
    lines.extend(items.iter().map(|item| format!("  * {}: {}", item.title, item.body)));
}

fn member_line(member: &TeamMember) -> String {
    if member.bio.is_empty() {
        format!("  * {} ({})", member.name, member.title)
    } else {
        format!("  * {} ({}): {}", member.name, member.title, member.bio)
    }
}

// =============================================================================
// SITE PAGES
// =============================================================================

pub fn site_page(page: SitePage, state: SessionState) -> String {
    let mut lines = vec![navbar(state, page.route()), String::new()];
    match page {
        SitePage::Home => {
            lines.push(site::ORGANIZATION.to_owned());
            lines.push(site::TAGLINE.to_owned());
            section_lines(&mut lines, "Programs", &site::PROGRAMS);
            section_lines(&mut lines, "Projects", &site::PROJECTS);
        }
        SitePage::About => {
            lines.push(format!("About {}", site::ORGANIZATION));
            section_lines(&mut lines, "Who we are", &site::ABOUT);
        }
        SitePage::Team => {
            for group in TeamGroup::ALL {
                lines.push(group.heading().to_owned());
                lines.extend(group.members().iter().map(member_line));
            }
        }
        SitePage::Stories => {
            for story in &site::STORIES {
                lines.push(story.name.to_owned());
                lines.push(format!("  {}", story.story));
                lines.push(format!("  \"{}\"", story.impact));
            }
        }
    }
    lines.push(String::new());
    lines.extend(SOCIAL_LINKS.iter().map(|(name, url)| format!("{name}: {url}")));
    lines.join("\n")
}

// =============================================================================
// GALLERY
// =============================================================================

fn media_label(media_type: MediaType) -> &'static str {
    match media_type {
        MediaType::Image => "image",
        MediaType::Video => "video",
    }
}

fn card_line(card: &GalleryCard) -> String {
    let line = format!("{} [{}] {}", card.title, media_label(card.media_type), card.url);
    if card.caption.is_empty() { line } else { format!("{line}\n    {}", card.caption) }
}

pub fn gallery(view: &GalleryView) -> String {
    match view {
        GalleryView::Loaded(cards) => cards.iter().map(card_line).collect::<Vec<_>>().join("\n"),
        other => other.message().unwrap_or_default().to_owned(),
    }
}

// =============================================================================
// ADMIN DASHBOARD
// =============================================================================

pub fn booking_line(booking: &Booking) -> String {
    format!(
        "{}  {} <{}>  {} on {} at {} for {}h  [{}]",
        booking.id,
        booking.name,
        booking.email,
        booking.category,
        booking.date,
        booking.time,
        booking.duration,
        booking.status
    )
}

fn contact_line(contact: &ContactMessage) -> String {
    format!("{} <{}>  {}\n    {}", contact.name, contact.email, contact.subject, contact.message)
}

fn donor_line(donor: &Donor) -> String {
    let email = donor.email.as_deref().unwrap_or("anonymous");
    match donor.created_at {
        Some(at) => format!("{email}  {}  {}", donor.amount, at.format("%Y-%m-%d")),
        None => format!("{email}  {}", donor.amount),
    }
}

fn media_line(item: &GalleryItem) -> String {
    format!("{}  {} [{}] {}", item.id, item.title, media_label(item.media_type), item.media_url)
}

/// Lines for one slot. `items` may be a prefix of the slot's contents.
fn slot_lines<T>(slot: &Slot<T>, items: &[T], empty: &str, line: impl Fn(&T) -> String) -> Vec<String> {
    match slot {
        Slot::Loading => vec!["Loading...".to_owned()],
        Slot::Failed(message) => vec![message.clone()],
        Slot::Ready(_) if items.is_empty() => vec![empty.to_owned()],
        Slot::Ready(_) => items.iter().map(|item| format!("  {}", line(item))).collect(),
    }
}

pub fn dashboard(state: &DashboardState) -> String {
    let mut lines = vec![format!("Admin Dashboard: {}", state.tab.label()), String::new()];
    if let Some(notice) = &state.notice {
        lines.push(notice.clone());
        lines.push(String::new());
    }
    let body = match state.tab {
        AdminTab::Overview => {
            let stats = state.stats();
            let mut body = vec![
                format!("Total bookings:  {}", stats.total_bookings),
                format!("Pending:         {}", stats.pending_bookings),
                format!("Messages:        {}", stats.total_contacts),
                format!("Donations:       {} from {} donors", stats.total_donations, stats.total_donors),
                format!("Gallery items:   {}", stats.gallery_items),
                String::new(),
                "Recent bookings".to_owned(),
            ];
            let recent = state.recent_bookings(RECENT_LIMIT);
            body.extend(slot_lines(&state.bookings, recent, empty_message(AdminTab::Overview), booking_line));
            body.push(String::new());
            body.push("Recent donations".to_owned());
            let recent = state.recent_donations(RECENT_LIMIT);
            body.extend(slot_lines(&state.donors, recent, empty_message(AdminTab::Donors), donor_line));
            body
        }
        AdminTab::Bookings => {
            slot_lines(&state.bookings, state.bookings.items(), empty_message(state.tab), booking_line)
        }
        AdminTab::Contacts => {
            slot_lines(&state.contacts, state.contacts.items(), empty_message(state.tab), contact_line)
        }
        AdminTab::Donors => slot_lines(&state.donors, state.donors.items(), empty_message(state.tab), donor_line),
        AdminTab::Gallery => slot_lines(&state.gallery, state.gallery.items(), empty_message(state.tab), media_line),
    };
    lines.extend(body);
    lines.join("\n")
}
