/// Shared application state
use crate::config::{MediaSettings, ServerConfig};
use keepsake_core::ManifestBuilder;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(config: ServerConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    pub fn media(&self) -> &MediaSettings {
        &self.config.media
    }

    /// Manifest builder emitting paths relative to the static root
    pub fn manifest_builder(&self) -> ManifestBuilder {
        let media = self.media();
        ManifestBuilder::new(media.images_dir()).url_prefix(media.images_subdir.clone())
    }
}
