//! Slide index
//!
//! Immutable ordered slide list with the derived sub-collection lookup.
//! Built once when the payload is read; there are no mutation operations.

use crate::slide::Slide;
use serde_json::Value;

/// A contiguous run of slides opened by a transition marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Collection {
    /// Index of the first slide of the run
    pub start: usize,

    /// Title taken from the transition marker (`None` for the implicit leading run)
    pub title: Option<String>,

    /// Description taken from the transition marker
    pub description: Option<String>,
}

/// Ordered slide list plus `collection_start_of` table
#[derive(Debug, Clone, Default)]
pub struct SlideIndex {
    slides: Vec<Slide>,

    /// For every index, the nearest preceding transition index (or 0)
    collection_starts: Vec<usize>,
}

impl SlideIndex {
    /// Build the index from already-parsed slides
    pub fn new(slides: Vec<Slide>) -> Self {
        let mut collection_starts = Vec::with_capacity(slides.len());
        let mut current = 0;

        for (i, slide) in slides.iter().enumerate() {
            if slide.is_transition() {
                current = i;
            }
            collection_starts.push(current);
        }

        Self {
            slides,
            collection_starts,
        }
    }

    /// Build the index from a JSON payload
    ///
    /// Unparsable text degenerates to an empty index.
    pub fn from_json(payload: &str) -> Self {
        match serde_json::from_str::<Value>(payload) {
            Ok(value) => Self::from_value(value),
            Err(e) => {
                tracing::warn!("Slide payload is not valid JSON, using empty index: {}", e);
                Self::default()
            }
        }
    }

    /// Build the index from a JSON value
    ///
    /// Anything other than an array yields an empty index. Array elements
    /// that are not slide records are skipped.
    pub fn from_value(value: Value) -> Self {
        let Value::Array(items) = value else {
            if !value.is_null() {
                tracing::warn!("Slide payload is not a list, using empty index");
            }
            return Self::default();
        };

        let mut slides = Vec::with_capacity(items.len());
        for (position, item) in items.into_iter().enumerate() {
            if !item.is_object() {
                tracing::warn!("Skipping slide record {}: not an object", position);
                continue;
            }
            match serde_json::from_value::<Slide>(item) {
                Ok(slide) => slides.push(slide),
                Err(e) => tracing::warn!("Skipping slide record {}: {}", position, e),
            }
        }

        Self::new(slides)
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the index holds no slides
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Last valid index, if any
    pub fn last_index(&self) -> Option<usize> {
        self.slides.len().checked_sub(1)
    }

    /// Slide at `index`, or `None` when out of range
    pub fn slide_at(&self, index: usize) -> Option<&Slide> {
        self.slides.get(index)
    }

    /// Starting index of the sub-collection `index` belongs to
    pub fn collection_start_of(&self, index: usize) -> Option<usize> {
        self.collection_starts.get(index).copied()
    }

    /// All slides in order
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Sub-collections in order, for populating a selector
    ///
    /// When the list does not open with a transition marker the leading
    /// slides form an untitled collection starting at 0.
    pub fn collections(&self) -> Vec<Collection> {
        let mut collections = Vec::new();

        for (i, slide) in self.slides.iter().enumerate() {
            if slide.is_transition() {
                collections.push(Collection {
                    start: i,
                    title: slide.source_folder().map(str::to_string),
                    description: slide.folder_description().map(str::to_string),
                });
            } else if i == 0 {
                collections.push(Collection {
                    start: 0,
                    title: None,
                    description: None,
                });
            }
        }

        collections
    }
}

impl From<Vec<Slide>> for SlideIndex {
    fn from(slides: Vec<Slide>) -> Self {
        Self::new(slides)
    }
}
