//! Core types for slideshow playback

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Slideshow mode
///
/// Each mode has exactly one visible view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Landing view (initial)
    Welcome,

    /// Slides on screen, timer may be running
    Gallery,

    /// Terminal view after the last slide
    End,

    /// Letter overlay reached from the end view
    Letter,
}

/// Result of one render invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The render ran to completion and its visual changes are on screen
    Committed,

    /// A newer render started before this one finished; it stopped touching the view
    Superseded,

    /// There were no slides; only the navigation affordances were updated
    Empty,
}

/// State of the navigation controls, recomputed after every render
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationAffordances {
    /// Position counter, e.g. `3 / 12`
    pub counter: String,

    /// Whether the "previous" control is enabled
    pub previous_enabled: bool,

    /// Whether the "next" control is enabled
    pub next_enabled: bool,

    /// Value the sub-collection selector should show
    pub collection_start: Option<usize>,
}

impl NavigationAffordances {
    /// Affordances for `index` in a list of `len` slides
    ///
    /// An empty list shows `1 / 1` with both controls disabled.
    pub fn compute(index: usize, len: usize, collection_start: Option<usize>) -> Self {
        let total = len.max(1);
        let has_slides = len > 0;

        Self {
            counter: format!("{} / {}", (index + 1).min(total), total),
            previous_enabled: has_slides && index > 0,
            next_enabled: has_slides && index + 1 < len,
            collection_start,
        }
    }
}

/// Cache status of one image URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadStatus {
    /// Fetch in flight
    Loading,

    /// Fetch succeeded; handle cached
    Loaded,

    /// Fetch failed; never retried
    Failed,
}

/// Keys the slideshow reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    ArrowLeft,
    ArrowRight,
    Escape,
    /// Any other key (still counts as an interaction for audio unlock)
    Other,
}

/// Pointer/touch controls on the page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Begin,
    Home,
    ToggleAutoplay,
    Next,
    Previous,
    /// Skip straight to the end view
    End,
    OpenLetter,
    CloseLetter,
    Replay,
    /// Sub-collection selector changed to the given start index
    Collection(usize),
    /// Memory-collage card for the given slide index
    CollageCard(usize),
    ToggleAudio,
}

/// Kind of user interaction, for the audio unlock heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interaction {
    Pointer,
    Key,
    Touch,
}

/// Events reported by the audio element itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaEvent {
    /// Playback started
    Play,

    /// Playback paused or was interrupted
    Pause,
}

/// Displayed audio state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioState {
    Playing,
    Paused,
    /// No audio element on the page
    Unavailable,
}

/// Configuration for the slideshow controller
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlideshowConfig {
    /// Whether auto-advance is on when the gallery opens (default: true)
    pub autoplay: bool,

    /// Delay between auto-advance ticks (default: 10s)
    pub advance_interval: Duration,

    /// Prefix joined to every slide's image path (default: `/static`)
    pub asset_root: String,

    /// Preload cache size that triggers a one-time warning (default: 500)
    pub preload_warn_threshold: usize,
}

impl Default for SlideshowConfig {
    fn default() -> Self {
        Self {
            autoplay: true,
            advance_interval: Duration::from_secs(10),
            asset_root: "/static".to_string(),
            preload_warn_threshold: 500,
        }
    }
}

impl SlideshowConfig {
    /// Resolve a slide's image path to a fetchable URL
    pub fn image_url(&self, image: &str) -> String {
        format!(
            "{}/{}",
            self.asset_root.trim_end_matches('/'),
            image.trim_start_matches('/')
        )
    }
}
