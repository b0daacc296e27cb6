//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::TrackerConfig;
use crate::domain::error::ConfigError;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if !is_valid_config_key(key) {
        return Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
        });
    }
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;
    validate_bounds(&config)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match lookup(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output("(not set)"),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            &lookup(&config, key).unwrap_or_else(|| "(not set)".to_string()),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

/// Current value of `key` as text
fn lookup(config: &TrackerConfig, key: &str) -> Option<String> {
    match key {
        "trim_items" => config.trim_items.map(|b| b.to_string()),
        "min_text_item_size" => config.min_text_item_size.map(|n| n.to_string()),
        "max_text_item_size" => config.max_text_item_size.map(|n| n.to_string()),
        "track_primary" => config.track_primary.map(|b| b.to_string()),
        _ => None,
    }
}

/// Parse `value` for `key` and store it in `config`
fn apply_value(config: &mut TrackerConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "trim_items" => config.trim_items = Some(parse_bool_for(key, value)?),
        "track_primary" => config.track_primary = Some(parse_bool_for(key, value)?),
        "min_text_item_size" => config.min_text_item_size = Some(parse_number(key, value)?),
        "max_text_item_size" => config.max_text_item_size = Some(parse_number(key, value)?),
        _ => {
            return Err(ConfigError::ValidationError {
                key: key.to_string(),
                message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
            })
        }
    }
    Ok(())
}

/// Reject a minimum text size above the maximum
fn validate_bounds(config: &TrackerConfig) -> Result<(), ConfigError> {
    let min = config.min_text_item_size_or_default();
    let max = config.max_text_item_size_or_default();
    if min > max {
        return Err(ConfigError::ValidationError {
            key: "min_text_item_size".to_string(),
            message: format!("Minimum size {} is larger than maximum size {}", min, max),
        });
    }
    Ok(())
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}

fn parse_bool_for(key: &str, value: &str) -> Result<bool, ConfigError> {
    parse_bool(value).map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: "Value must be 'true' or 'false'".to_string(),
    })
}

fn parse_number<N: std::str::FromStr>(key: &str, value: &str) -> Result<N, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Invalid number '{}'", value),
    })
}
