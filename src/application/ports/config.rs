//! Configuration port interface

use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::config::TrackerConfig;
use crate::domain::error::ConfigError;

/// Port for configuration storage
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Load the stored configuration; a missing store yields an empty config
    async fn load(&self) -> Result<TrackerConfig, ConfigError>;

    /// Replace the stored configuration
    async fn save(&self, config: &TrackerConfig) -> Result<(), ConfigError>;

    /// Location of the stored configuration
    fn path(&self) -> PathBuf;

    /// Write the defaults. Fails with [`ConfigError::AlreadyExists`] when a
    /// configuration is already stored.
    async fn init(&self) -> Result<(), ConfigError>;
}
