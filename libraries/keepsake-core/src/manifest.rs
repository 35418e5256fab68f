//! Manifest building
//!
//! Turns a folder tree of photos into the ordered slide payload:
//!
//! ```text
//! images/
//!   01 Beginnings/
//!     description.txt      -> folder_description
//!     first.jpg
//!     first.txt            -> caption of first.jpg
//!   02 Summer/
//!     beach.png
//! ```
//!
//! Each folder with at least one image contributes a transition slide
//! followed by its images. Folders and files are ordered by
//! case-insensitive name.

use crate::error::{KeepsakeError, Result};
use crate::slide::{ImageSlide, Slide};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Supported image file extensions
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];

/// Supported background audio extensions
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a"];

/// Folder description sidecar file
const DESCRIPTION_FILE: &str = "description.txt";

/// Title and caption shown when no photos were found
const PLACEHOLDER_TITLE: &str = "No Photos Found";
const PLACEHOLDER_CAPTION: &str = "Add folders with images to static/images.";

/// Builds the slide list from an images directory
pub struct ManifestBuilder {
    /// Directory holding one subdirectory per sub-collection
    images_dir: PathBuf,

    /// Prefix of the emitted image paths, relative to the static root
    url_prefix: String,
}

impl ManifestBuilder {
    /// Create a builder for `images_dir`
    pub fn new(images_dir: impl Into<PathBuf>) -> Self {
        Self {
            images_dir: images_dir.into(),
            url_prefix: "images".to_string(),
        }
    }

    /// Set the prefix used for emitted image paths (default `images`)
    #[must_use]
    pub fn url_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.url_prefix = prefix.into();
        self
    }

    /// Scan the images directory
    ///
    /// A missing directory yields an empty list.
    pub fn scan(&self) -> Result<Vec<Slide>> {
        if !self.images_dir.exists() {
            tracing::debug!("No images directory at {}", self.images_dir.display());
            return Ok(Vec::new());
        }

        if !self.images_dir.is_dir() {
            return Err(KeepsakeError::invalid_path(format!(
                "{} is not a directory",
                self.images_dir.display()
            )));
        }

        let mut slides = Vec::new();

        for folder in self.collection_folders()? {
            let images = list_media(&folder, IMAGE_EXTENSIONS)?;
            if images.is_empty() {
                continue;
            }

            let folder_name = file_name(&folder);
            let description = read_sidecar(&folder.join(DESCRIPTION_FILE))?;

            slides.push(Slide::transition(folder_name.clone(), description.clone()));

            for image in images {
                let caption = match image.file_stem() {
                    Some(stem) => {
                        read_sidecar(&folder.join(format!("{}.txt", stem.to_string_lossy())))?
                    }
                    None => String::new(),
                };

                let slide = ImageSlide {
                    image: Some(format!(
                        "{}/{}/{}",
                        self.url_prefix,
                        folder_name,
                        file_name(&image)
                    )),
                    ..ImageSlide::default()
                }
                .with_caption(caption)
                .with_folder(folder_name.clone(), description.clone());

                slides.push(Slide::Image(slide));
            }
        }

        Ok(slides)
    }

    /// Scan, substituting a single placeholder slide when nothing was found
    pub fn build_or_placeholder(&self) -> Result<Vec<Slide>> {
        let slides = self.scan()?;
        if slides.is_empty() {
            return Ok(vec![Slide::Image(
                ImageSlide::default()
                    .with_title(PLACEHOLDER_TITLE)
                    .with_caption(PLACEHOLDER_CAPTION),
            )]);
        }
        Ok(slides)
    }

    /// Scan and write the result as pretty-printed JSON
    ///
    /// Returns the number of slides written.
    pub fn write_manifest(&self, output: &Path) -> Result<usize> {
        let slides = self.scan()?;
        let json = serde_json::to_string_pretty(&slides)?;
        fs::write(output, json)?;

        tracing::info!("Generated {} slides in {}", slides.len(), output.display());
        Ok(slides.len())
    }

    /// Non-hidden subdirectories, ordered by case-insensitive name
    fn collection_folders(&self) -> Result<Vec<PathBuf>> {
        let mut folders = Vec::new();

        for entry in WalkDir::new(&self.images_dir).min_depth(1).max_depth(1) {
            let entry = entry?;
            if entry.file_type().is_dir() && !entry.file_name().to_string_lossy().starts_with('.')
            {
                folders.push(entry.into_path());
            }
        }

        folders.sort_by_key(|path| file_name(path).to_lowercase());
        Ok(folders)
    }
}

/// First background track in `audio_dir`, as `<prefix>/<file>`
pub fn resolve_audio_track(audio_dir: &Path, prefix: &str) -> Option<String> {
    match list_media(audio_dir, AUDIO_EXTENSIONS) {
        Ok(files) => files
            .first()
            .map(|file| format!("{}/{}", prefix, file_name(file))),
        Err(e) => {
            tracing::warn!("Failed to list audio in {}: {}", audio_dir.display(), e);
            None
        }
    }
}

/// Check if a file has one of the given extensions (case-insensitive)
fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Media files directly inside `dir`, ordered by case-insensitive name
fn list_media(dir: &Path, extensions: &[&str]) -> Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry?;
        if entry.file_type().is_file() && has_extension(entry.path(), extensions) {
            files.push(entry.into_path());
        }
    }

    files.sort_by_key(|path| file_name(path).to_lowercase());
    Ok(files)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Trimmed contents of a sidecar text file, or empty when absent
fn read_sidecar(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Ok(String::new());
    }
    Ok(fs::read_to_string(path)?.trim().to_string())
}
