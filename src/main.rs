//! clip-cycle CLI entry point

use std::process::ExitCode;

use clap::Parser;

use clip_cycle::cli::{
    app::{init_logging, load_merged_config, watcher_options, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    ctl_cmd::handle_ctl_command,
    presenter::Presenter,
    watcher_app::run_watcher,
};
use clip_cycle::domain::config::{AppConfig, ClipboardBackend};
use clip_cycle::infrastructure::XdgConfigStore;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let presenter = Presenter::new();

    match cli.command {
        Some(Commands::Config { action }) => {
            let store = XdgConfigStore::new();
            if let Err(e) = handle_config_command(action, &store, &presenter).await {
                presenter.error(&e.to_string());
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        Some(Commands::Ctl { action }) => {
            if let Err(e) = handle_ctl_command(action, &presenter).await {
                presenter.error(&e);
                return ExitCode::from(EXIT_ERROR);
            }
            return ExitCode::SUCCESS;
        }
        None => {}
    }

    let cli_config = AppConfig {
        max_history: cli.max_history,
        poll_interval: cli.poll_interval.clone(),
        backend: cli.backend.map(|b| ClipboardBackend::from(b).to_string()),
        cycle: cli.cycle.then_some(true),
        notify: cli.notify.then_some(true),
        ..Default::default()
    };

    let config = load_merged_config(cli_config).await;

    let options = match watcher_options(&config) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    log::debug!("Starting watcher with {:?}", options);
    run_watcher(options).await
}
