//! Keepsake - Slideshow Playback
//!
//! Platform-agnostic playback control for the Keepsake photo slideshow.
//!
//! This crate provides:
//! - Mode state machine (welcome, gallery, end, letter)
//! - Navigation with a terminal end state after the last slide
//! - Render pipeline that drops stale renders (render tokens)
//! - Image preload cache with per-URL fetch deduplication and warm-up
//! - Auto-advance timer (one live timer at most)
//! - Background audio with autoplay and first-interaction unlock
//! - Keyboard and pointer input mapping
//!
//! # Architecture
//!
//! `keepsake-playback` knows nothing about the page it runs in:
//! - Rendering goes through the `SlideshowView` capability trait
//! - Image fetching goes through `ImageLoader`
//! - Audio goes through `AudioElement`
//!
//! Platform code implements these traits and forwards input events.
//!
//! # Example
//!
//! ```rust,no_run
//! use keepsake_core::SlideIndex;
//! use keepsake_playback::{
//!     FsImageLoader, Key, Mode, NavigationAffordances, Slideshow, SlideshowConfig, SlideshowView,
//! };
//! use std::sync::Arc;
//!
//! struct ConsoleView;
//!
//! impl SlideshowView for ConsoleView {
//!     fn show_view(&self, mode: Mode) { println!("view: {:?}", mode); }
//!     fn animate_view_entry(&self, _mode: Mode) {}
//!     fn clear_caption(&self) {}
//!     fn show_transition(&self, title: &str, _description: &str) { println!("== {} ==", title); }
//!     fn show_photo(&self) {}
//!     fn set_image_source(&self, url: &str) { println!("image: {}", url); }
//!     fn animate_photo_entry(&self) {}
//!     fn set_caption(&self, caption: &str) { println!("  {}", caption); }
//!     fn show_collection_banner(&self, _title: &str, _description: &str) {}
//!     fn hide_collection_banner(&self) {}
//!     fn update_affordances(&self, affordances: &NavigationAffordances) {
//!         println!("[{}]", affordances.counter);
//!     }
//!     fn set_autoplay_indicator(&self, _running: bool) {}
//!     fn set_audio_indicator(&self, _playing: bool) {}
//! }
//!
//! # async fn run() {
//! let slides = SlideIndex::from_json(&std::fs::read_to_string("slides.json").unwrap_or_default());
//! let slideshow = Slideshow::new(
//!     SlideshowConfig::default(),
//!     slides,
//!     Arc::new(ConsoleView),
//!     Arc::new(FsImageLoader::new("static", "/static")),
//!     None,
//! );
//!
//! slideshow.handle_key(Key::Enter); // welcome -> gallery
//! if let Some(render) = slideshow.manual_next() {
//!     render.await.ok();
//! }
//! # }
//! ```

use std::sync::{Mutex, MutexGuard, PoisonError};

mod audio;
mod cache;
mod controller;
mod error;
mod input;
mod render;
mod timer;
pub mod types;
mod view;

// Public exports
pub use audio::{AudioController, AudioElement};
pub use cache::{FsImageLoader, ImageHandle, ImageLoader, PreloadCache};
pub use controller::{RenderTask, Slideshow};
pub use error::{PlaybackError, Result};
pub use timer::PlaybackTimer;
pub use types::{
    AudioState, Control, Interaction, Key, MediaEvent, Mode, NavigationAffordances,
    PreloadStatus, RenderOutcome, SlideshowConfig,
};
pub use view::SlideshowView;

/// Lock a mutex, recovering the data if a previous holder panicked
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
