/// Server configuration
use crate::error::{Result, ServerError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_server")]
    pub server: ServerSettings,

    #[serde(default = "default_media")]
    pub media: MediaSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MediaSettings {
    /// Root served under `/static`
    #[serde(default = "default_static_dir")]
    pub static_dir: PathBuf,

    /// Photo folders, relative to `static_dir`
    #[serde(default = "default_images_subdir")]
    pub images_subdir: String,

    /// Background audio, relative to `static_dir`
    #[serde(default = "default_audio_subdir")]
    pub audio_subdir: String,

    /// Page assets served for every other path
    #[serde(default = "default_web_dir")]
    pub web_dir: PathBuf,
}

impl MediaSettings {
    pub fn images_dir(&self) -> PathBuf {
        self.static_dir.join(&self.images_subdir)
    }

    pub fn audio_dir(&self) -> PathBuf {
        self.static_dir.join(&self.audio_subdir)
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    ///
    /// Reads `path` when given, otherwise `config.toml` if it exists.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let config_path = PathBuf::from("config.toml");
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        // Override with environment variables, e.g. KEEPSAKE_SERVER__PORT
        settings = settings.add_source(
            config::Environment::with_prefix("KEEPSAKE")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.port == 0 {
            return Err(ServerError::Config("server.port must not be 0".to_string()));
        }

        if !self.media.static_dir.is_dir() {
            return Err(ServerError::Config(format!(
                "Static directory not found at {:?}",
                self.media.static_dir
            )));
        }

        if !self.media.web_dir.is_dir() {
            tracing::warn!(
                "Web directory {:?} not found, only the API will be served",
                self.media.web_dir
            );
        }

        Ok(())
    }
}

// Default values
fn default_server() -> ServerSettings {
    ServerSettings {
        host: default_host(),
        port: default_port(),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_media() -> MediaSettings {
    MediaSettings {
        static_dir: default_static_dir(),
        images_subdir: default_images_subdir(),
        audio_subdir: default_audio_subdir(),
        web_dir: default_web_dir(),
    }
}

fn default_static_dir() -> PathBuf {
    PathBuf::from("./static")
}

fn default_images_subdir() -> String {
    "images".to_string()
}

fn default_audio_subdir() -> String {
    "audio".to_string()
}

fn default_web_dir() -> PathBuf {
    PathBuf::from("./web")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            media: default_media(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.media.images_dir(), PathBuf::from("./static/images"));
        assert_eq!(config.media.audio_dir(), PathBuf::from("./static/audio"));
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        writeln!(file, "[server]\nport = 9000\n\n[media]\nimages_subdir = \"photos\"").unwrap();

        let config = ServerConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.media.images_subdir, "photos");
        assert_eq!(config.media.audio_subdir, "audio");
    }

    #[test]
    fn validate_rejects_missing_static_dir_and_zero_port() {
        let dir = TempDir::new().unwrap();
        let mut config = ServerConfig::default();

        config.media.static_dir = dir.path().join("missing");
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));

        config.media.static_dir = dir.path().to_path_buf();
        assert!(config.validate().is_ok());

        config.server.port = 0;
        assert!(matches!(config.validate(), Err(ServerError::Config(_))));
    }
}
