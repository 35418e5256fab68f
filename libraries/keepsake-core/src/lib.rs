//! Keepsake Core
//!
//! Slide data shared by every Keepsake component.
//!
//! This crate provides:
//! - **Slide records**: image slides and transition (sub-collection) markers
//! - **Slide index**: the immutable ordered slide list plus the
//!   `collection_start_of` lookup table
//! - **Manifest building**: turning a folder tree of photos into the slide payload
//! - **Error handling**: unified `KeepsakeError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use keepsake_core::SlideIndex;
//!
//! let index = SlideIndex::from_json(
//!     r#"[
//!         {"image": "images/a.jpg"},
//!         {"is_transition": true, "source_folder": "Summer"},
//!         {"image": "images/summer/b.jpg", "caption": "Beach"}
//!     ]"#,
//! );
//!
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.collection_start_of(2), Some(1));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod index;
pub mod manifest;
pub mod slide;

// Re-export commonly used types
pub use error::{KeepsakeError, Result};
pub use index::{Collection, SlideIndex};
pub use manifest::{resolve_audio_track, ManifestBuilder};
pub use slide::{ImageSlide, Slide, TransitionSlide};
