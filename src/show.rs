use std::collections::{HashMap, HashSet};

use iced::widget::image::Handle;
use iced::{Color, Size};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

use crate::fetch::Ticket;

pub const BACKGROUND_SLATE: Color = Color::from_rgb(0.059, 0.090, 0.165);
pub const SURFACE_SLATE: Color = Color::from_rgb(0.118, 0.161, 0.231);
pub const SKELETON_SLATE: Color = Color::from_rgb(0.200, 0.255, 0.333);
pub const BORDER_SLATE: Color = Color::from_rgb(0.278, 0.333, 0.412);
pub const ACCENT_BLUE: Color = Color::from_rgb(0.145, 0.388, 0.922);
pub const ACCENT_BLUE_LIGHT: Color = Color::from_rgb(0.376, 0.647, 0.980);
pub const STAR_YELLOW: Color = Color::from_rgb(0.980, 0.800, 0.082);
pub const ERROR_RED: Color = Color::from_rgb(0.973, 0.443, 0.443);
pub const TEXT_WHITE: Color = Color::from_rgb(1.0, 1.0, 1.0);
pub const TEXT_MUTED: Color = Color::from_rgb(0.580, 0.639, 0.722);
pub const TEXT_SOFT: Color = Color::from_rgb(0.796, 0.835, 0.882);

pub type ShowId = u64;

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ShowImage {
    pub medium: Option<String>,
    pub original: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Rating {
    pub average: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Country {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Network {
    pub name: String,
    pub country: Option<Country>,
}

/// One show as returned by the catalog API. Everything except `id` may be
/// missing or `null` upstream.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Show {
    pub id: ShowId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    pub image: Option<ShowImage>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub genres: Vec<String>,
    pub rating: Option<Rating>,
    pub summary: Option<String>,
    pub language: Option<String>,
    pub premiered: Option<String>,
    pub status: Option<String>,
    pub runtime: Option<u32>,
    pub network: Option<Network>,
}

impl Show {
    pub fn medium_image(&self) -> Option<&str> {
        self.image.as_ref()?.medium.as_deref().filter(|u| !u.is_empty())
    }

    pub fn original_image(&self) -> Option<&str> {
        self.image
            .as_ref()?
            .original
            .as_deref()
            .filter(|u| !u.is_empty())
    }

    /// Average rating, treating a zero score the same as no score.
    pub fn rating_average(&self) -> Option<f32> {
        self.rating
            .as_ref()?
            .average
            .filter(|avg| *avg > 0.0 && avg.is_finite())
    }
}

pub fn format_rating(average: f32) -> String {
    format!("{}/10", average)
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Route {
    #[default]
    List,
    Detail(String),
}

impl Route {
    /// Maps an application path onto a route. Unknown paths land on the list.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let segments: Vec<&str> = trimmed.trim_matches('/').split('/').collect();
        match segments.as_slice() {
            ["movie"] if trimmed.trim_end_matches('/').len() < trimmed.len() => {
                Route::Detail(String::new())
            }
            ["movie", id] => Route::Detail((*id).to_string()),
            _ => Route::List,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::List => String::from("/"),
            Route::Detail(id) => format!("/movie/{}", id),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {0}")]
    Status(u16),

    #[error("Show not found: {0}")]
    NotFound(String),

    #[error("Failed to parse API response: {0}")]
    Parse(String),
}

#[derive(Debug, Clone)]
pub enum Message {
    Navigate(Route),
    ListLoaded(Ticket, Result<Vec<Show>, ApiError>),
    DetailLoaded(Ticket, Box<Result<Show, ApiError>>),
    LoadImage(String),
    ImageLoaded(String, Result<Handle, String>),
    WindowResized(Size),
}

pub enum ImageSlot<'a> {
    Ready(&'a Handle),
    Pending,
    Unavailable,
}

#[derive(Debug, Clone, Default)]
pub struct ImageCache {
    cache: HashMap<String, Handle>,
    pending: HashSet<String>,
    failed: HashSet<String>,
}

impl ImageCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, url: Option<&str>) -> ImageSlot<'_> {
        let Some(url) = url else {
            return ImageSlot::Unavailable;
        };
        if let Some(handle) = self.cache.get(url) {
            return ImageSlot::Ready(handle);
        }
        if self.failed.contains(url) {
            ImageSlot::Unavailable
        } else {
            ImageSlot::Pending
        }
    }

    pub fn should_request(&self, url: &str) -> bool {
        !self.cache.contains_key(url) && !self.pending.contains(url) && !self.failed.contains(url)
    }

    pub fn insert(&mut self, url: String, handle: Handle) {
        self.pending.remove(&url);
        self.cache.insert(url, handle);
    }

    pub fn mark_pending(&mut self, url: String) {
        self.pending.insert(url);
    }

    pub fn mark_failed(&mut self, url: String) {
        self.pending.remove(&url);
        self.failed.insert(url);
    }
}

/// Cuts `text` to at most `max_chars` characters, backing off to the last
/// word boundary and appending an ellipsis.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let (cut, next) = text
        .char_indices()
        .nth(max_chars)
        .map_or((text.len(), None), |(i, c)| (i, Some(c)));
    let truncated = &text[..cut];
    let head = if next.is_some_and(char::is_whitespace) {
        truncated
    } else {
        truncated
            .rfind(' ')
            .filter(|i| *i > 0)
            .map_or(truncated, |i| &truncated[..i])
    };
    format!("{}...", head.trim_end_matches([',', '.', ';', ':', ' ']))
}
