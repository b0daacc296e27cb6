//! Config file under the XDG config directory

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::application::ports::ConfigStore;
use crate::domain::config::TrackerConfig;
use crate::domain::error::ConfigError;

const APP_DIR: &str = "clip-tracker";
const FILE_NAME: &str = "config.toml";

/// TOML config file, `$XDG_CONFIG_HOME/clip-tracker/config.toml` by default
pub struct XdgConfigStore {
    path: PathBuf,
}

impl XdgConfigStore {
    pub fn new() -> Self {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            path: base.join(APP_DIR).join(FILE_NAME),
        }
    }

    /// Store at an explicit location
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn ensure_parent(&self) -> Result<(), ConfigError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent)
                .await
                .map_err(|e| ConfigError::WriteError(e.to_string())),
            _ => Ok(()),
        }
    }
}

impl Default for XdgConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

fn parse(content: &str) -> Result<TrackerConfig, ConfigError> {
    toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn render(config: &TrackerConfig) -> Result<String, ConfigError> {
    toml::to_string_pretty(config).map_err(|e| ConfigError::WriteError(e.to_string()))
}

/// Sibling file used to replace the config in one rename
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

#[async_trait]
impl ConfigStore for XdgConfigStore {
    async fn load(&self) -> Result<TrackerConfig, ConfigError> {
        match fs::read_to_string(&self.path).await {
            Ok(content) => parse(&content),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No config file");
                Ok(TrackerConfig::empty())
            }
            Err(e) => Err(ConfigError::ReadError(e.to_string())),
        }
    }

    async fn save(&self, config: &TrackerConfig) -> Result<(), ConfigError> {
        let content = render(config)?;
        self.ensure_parent().await?;

        let staging = staging_path(&self.path);
        fs::write(&staging, content)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        fs::rename(&staging, &self.path)
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn init(&self) -> Result<(), ConfigError> {
        let content = render(&TrackerConfig::defaults())?;
        self.ensure_parent().await?;

        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => {
                    ConfigError::AlreadyExists(self.path.to_string_lossy().to_string())
                }
                _ => ConfigError::WriteError(e.to_string()),
            })?;

        file.write_all(content.as_bytes())
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| ConfigError::WriteError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_path_ends_in_app_dir() {
        let path = XdgConfigStore::new().path();
        assert!(path.ends_with("clip-tracker/config.toml"));
    }

    #[test]
    fn staging_file_sits_next_to_config() {
        assert_eq!(
            staging_path(Path::new("/etc/clip-tracker/config.toml")),
            PathBuf::from("/etc/clip-tracker/config.toml.tmp")
        );
    }

    #[test]
    fn parse_flat_keys() {
        let config = parse("trim_items = true\nmin_text_item_size = 2\nmax_text_item_size = 4096\n").unwrap();
        assert_eq!(config.trim_items, Some(true));
        assert_eq!(config.min_text_item_size, Some(2));
        assert_eq!(config.max_text_item_size, Some(4096));
        assert!(config.track_primary.is_none());
    }

    #[test]
    fn parse_rejects_wrong_types() {
        assert!(matches!(
            parse("trim_items = \"yes\""),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[tokio::test]
    async fn load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));
        assert_eq!(store.load().await.unwrap(), TrackerConfig::empty());
    }

    #[tokio::test]
    async fn save_replaces_previous_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("config.toml"));

        store.save(&TrackerConfig::defaults()).await.unwrap();
        let partial = TrackerConfig {
            track_primary: Some(true),
            ..Default::default()
        };
        store.save(&partial).await.unwrap();

        assert_eq!(store.load().await.unwrap(), partial);
        assert!(!staging_path(&store.path()).exists());
    }

    #[tokio::test]
    async fn init_writes_defaults_once() {
        let dir = tempfile::tempdir().unwrap();
        let store = XdgConfigStore::with_path(dir.path().join("nested").join("config.toml"));

        store.init().await.unwrap();
        assert_eq!(store.load().await.unwrap(), TrackerConfig::defaults());

        let err = store.init().await.unwrap_err();
        assert!(matches!(err, ConfigError::AlreadyExists(_)));
    }
}
