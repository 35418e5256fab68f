//! Slide records
//!
//! A slide is either a photograph or a transition marker that opens a
//! named sub-collection. Records arrive as loosely-typed JSON objects;
//! only presence is checked, and empty strings count as absent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One unit of the presentation sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SlideRecord", into = "SlideRecord")]
pub enum Slide {
    /// A displayable photograph
    Image(ImageSlide),

    /// Start of a sub-collection; carries no image
    Transition(TransitionSlide),
}

/// Photograph slide
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImageSlide {
    /// Path relative to the static asset root (e.g. `images/summer/a.jpg`)
    pub image: Option<String>,

    /// Per-image caption
    pub caption: Option<String>,

    /// Heading for a slide that stands on its own (e.g. the empty-gallery notice)
    pub title: Option<String>,

    /// Name of the folder the image came from
    pub source_folder: Option<String>,

    /// Description shared by the whole folder
    pub folder_description: Option<String>,
}

/// Sub-collection boundary
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionSlide {
    /// Sub-collection title
    pub source_folder: Option<String>,

    /// Sub-collection description
    pub folder_description: Option<String>,
}

impl Slide {
    /// Build an image slide from a relative image path
    pub fn image(path: impl Into<String>) -> Self {
        Self::Image(ImageSlide {
            image: non_empty(Some(path.into())),
            ..ImageSlide::default()
        })
    }

    /// Build a transition slide for a named sub-collection
    pub fn transition(folder: impl Into<String>, description: impl Into<String>) -> Self {
        Self::Transition(TransitionSlide {
            source_folder: non_empty(Some(folder.into())),
            folder_description: non_empty(Some(description.into())),
        })
    }

    /// Whether this slide opens a sub-collection
    pub fn is_transition(&self) -> bool {
        matches!(self, Self::Transition(_))
    }

    /// Sub-collection title, if any
    pub fn source_folder(&self) -> Option<&str> {
        match self {
            Self::Image(slide) => slide.source_folder.as_deref(),
            Self::Transition(slide) => slide.source_folder.as_deref(),
        }
    }

    /// Sub-collection description, if any
    pub fn folder_description(&self) -> Option<&str> {
        match self {
            Self::Image(slide) => slide.folder_description.as_deref(),
            Self::Transition(slide) => slide.folder_description.as_deref(),
        }
    }
}

impl ImageSlide {
    /// Attach a title
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = non_empty(Some(title.into()));
        self
    }

    /// Attach a caption
    #[must_use]
    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = non_empty(Some(caption.into()));
        self
    }

    /// Attach the folder the image belongs to
    #[must_use]
    pub fn with_folder(mut self, folder: impl Into<String>, description: impl Into<String>) -> Self {
        self.source_folder = non_empty(Some(folder.into()));
        self.folder_description = non_empty(Some(description.into()));
        self
    }
}

/// Wire shape of a slide record
///
/// Every key is optional; `is_transition: true` selects the transition variant.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SlideRecord {
    #[serde(default, deserialize_with = "truthy")]
    is_transition: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    caption: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_folder: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    folder_description: Option<String>,
}

impl From<SlideRecord> for Slide {
    fn from(record: SlideRecord) -> Self {
        if record.is_transition {
            Slide::Transition(TransitionSlide {
                source_folder: non_empty(record.source_folder),
                folder_description: non_empty(record.folder_description),
            })
        } else {
            Slide::Image(ImageSlide {
                image: non_empty(record.image),
                caption: non_empty(record.caption),
                title: non_empty(record.title),
                source_folder: non_empty(record.source_folder),
                folder_description: non_empty(record.folder_description),
            })
        }
    }
}

impl From<Slide> for SlideRecord {
    fn from(slide: Slide) -> Self {
        match slide {
            Slide::Image(slide) => SlideRecord {
                is_transition: false,
                image: slide.image,
                caption: slide.caption,
                title: slide.title,
                source_folder: slide.source_folder,
                folder_description: slide.folder_description,
            },
            Slide::Transition(slide) => SlideRecord {
                is_transition: true,
                source_folder: slide.source_folder,
                folder_description: slide.folder_description,
                ..SlideRecord::default()
            },
        }
    }
}

/// Loose flag: `null`, `false`, `0` and `""` are false, any other value is true
fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}
