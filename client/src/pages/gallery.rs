//! Public gallery of uploaded photos and videos.

#[cfg(test)]
#[path = "gallery_test.rs"]
mod gallery_test;

use crate::net::http::ApiClient;
use crate::net::types::{GalleryItem, MediaType};
use crate::state::mount::Mount;

pub const EMPTY_MESSAGE: &str = "No photos or videos uploaded yet.";
pub const LOADING_MESSAGE: &str = "Loading gallery...";
pub const FAILURE_MESSAGE: &str = "Could not load the gallery. Please try again later.";

/// One renderable gallery entry with its media URL already resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryCard {
    pub id: String,
    pub title: String,
    pub caption: String,
    pub media_type: MediaType,
    pub url: String,
}

impl GalleryCard {
    pub fn from_item(client: &ApiClient, item: GalleryItem) -> Self {
        let url = client.media_url(&item.media_url);
        Self { id: item.id, title: item.title, caption: item.caption, media_type: item.media_type, url }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum GalleryView {
    #[default]
    Loading,
    Empty,
    Loaded(Vec<GalleryCard>),
    Failed(String),
}

impl GalleryView {
    /// Status line for the non-loaded states.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE),
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Failed(message) => Some(message),
            Self::Loaded(_) => None,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct GalleryPage {
    pub view: GalleryView,
    pub mount: Mount,
}

impl GalleryPage {
    /// Fetch the list. A response arriving after unmount is discarded.
    pub async fn load(&mut self, client: &ApiClient) -> &GalleryView {
        self.view = GalleryView::Loading;
        let result = client.gallery().list().await;
        let Some(result) = self.mount.accept(result) else {
            return &self.view;
        };
        self.view = match result {
            Ok(items) if items.is_empty() => GalleryView::Empty,
            Ok(items) => GalleryView::Loaded(items.into_iter().map(|item| GalleryCard::from_item(client, item)).collect()),
            Err(e) => {
                tracing::warn!(error = %e, "gallery fetch failed");
                GalleryView::Failed(e.user_message(FAILURE_MESSAGE))
            }
        };
        &self.view
    }
}
