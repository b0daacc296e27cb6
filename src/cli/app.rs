//! Runners for the watch and select commands

use std::process::ExitCode;
use std::rc::Rc;

use tracing::{debug, error, warn};

use crate::application::ports::{ConfigStore, LiveClipboard};
use crate::application::{ClipboardTracker, SelectionWatch};
use crate::domain::config::TrackerConfig;
use crate::domain::item::Item;
use crate::domain::selection::SelectionTarget;
use crate::infrastructure::{SystemDisplay, XdgConfigStore};

use super::presenter::Presenter;
use super::signals::shutdown_requested;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Selections to track for `config`
pub fn watched_selections(config: &TrackerConfig) -> Vec<SelectionTarget> {
    if config.track_primary_or_default() {
        SelectionTarget::ALL.to_vec()
    } else {
        vec![SelectionTarget::Clipboard]
    }
}

/// Watch the system selections until interrupted
pub async fn run_watch(config: TrackerConfig) -> ExitCode {
    let presenter = Presenter::new();
    let targets = watched_selections(&config);
    let settings = Rc::new(config);

    let display = SystemDisplay::new();
    let mut watch = match SelectionWatch::new(&display, &targets, settings) {
        Ok(watch) => watch,
        Err(e) => {
            error!(error = %e, "Cannot start selection tracking");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let names: Vec<&str> = targets.iter().map(|t| t.as_str()).collect();
    presenter.info(&format!("Watching {} (Ctrl+C to stop)", names.join(", ")));

    let shutdown = shutdown_requested();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = display.changed() => {
                display.dispatch();
                for change in watch.process_pending() {
                    presenter.change(&change);
                }
            }
        }
    }

    debug!("Watch loop stopped");
    ExitCode::from(EXIT_SUCCESS)
}

/// Put `text` on `target` and serve it until another application takes the
/// selection over
pub async fn run_select(text: String, target: SelectionTarget, config: TrackerConfig) -> ExitCode {
    let presenter = Presenter::new();
    let display = SystemDisplay::new();

    let mut tracker = match ClipboardTracker::new(target, &display, Rc::new(config)) {
        Ok(tracker) => tracker,
        Err(e) => {
            error!(error = %e, "Cannot open selection");
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if let Err(e) = tracker.select_item(&Item::text(text.as_str())) {
        presenter.error(&e.to_string());
        return ExitCode::from(EXIT_ERROR);
    }
    presenter.success(&format!("Selected on {} (Ctrl+C to stop serving)", target));

    let shutdown = shutdown_requested();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = display.changed() => {
                display.dispatch();
                match tracker.real().wait_for_text() {
                    Ok(Some(current)) if current == text => {}
                    _ => {
                        debug!(selection = %target, "Selection taken over");
                        break;
                    }
                }
            }
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: TrackerConfig) -> TrackerConfig {
    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            warn!(error = %e, "Ignoring config file");
            TrackerConfig::empty()
        }
    };

    // Merge: defaults < file < cli
    TrackerConfig::defaults()
        .merge(file_config)
        .merge(cli_config)
}
