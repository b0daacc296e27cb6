//! clip-tracker CLI entry point

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use clip_tracker::cli::{
    app::{load_merged_config, run_select, run_watch, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use clip_tracker::domain::config::TrackerConfig;
use clip_tracker::infrastructure::XdgConfigStore;

fn init_tracing(verbose: bool) -> Result<(), tracing_subscriber::filter::ParseError> {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    if let Err(e) = init_tracing(cli.verbose) {
        presenter.error(&format!("Invalid log filter: {}", e));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    match cli.command {
        Commands::Config { action } => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            ExitCode::SUCCESS
        }
        Commands::Watch(args) => {
            let config = load_merged_config(args.to_config()).await;
            if config.min_text_item_size_or_default() > config.max_text_item_size_or_default() {
                presenter.error("Minimum text size is larger than maximum text size");
                return ExitCode::from(EXIT_USAGE_ERROR);
            }
            run_watch(config).await
        }
        Commands::Select { text, selection } => {
            let config = load_merged_config(TrackerConfig::empty()).await;
            run_select(text, selection.into(), config).await
        }
    }
}
