use std::io::IsTerminal;

use anyhow::{Context, Result};
use clap::Parser;
use linkdeck_core::command::Session;
use linkdeck_core::config::{load_config, Config};
use linkdeck_core::telemetry;
use linkdeck_tui::bootstrap::{load_app, load_session, resolve_theme};
use linkdeck_tui::cli::{Cli, Commands};
use linkdeck_tui::{report, runtime};

/// Width of the plain-text gallery printed when stdout is not a terminal.
const SNAPSHOT_WIDTH: usize = 100;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let (mut config, config_path) = load_config(cli.config.as_deref())?;
    if let Some(source) = &cli.source {
        config.source.clone_from(source);
    }

    let _telemetry = match telemetry::init(&config.logging) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("linkdeck: logging disabled: {err}");
            None
        }
    };
    tracing::info!(
        config = ?config_path,
        source = %config.source,
        command = ?cli.command_or_default(),
        "starting"
    );

    match cli.command_or_default() {
        Commands::View => view(&config),
        Commands::List(args) => {
            let session = load(&config)?;
            print!(
                "{}",
                report::list_report(&session, &args.tags, args.search.as_deref())
            );
            Ok(())
        }
        Commands::Tags => {
            print!("{}", report::tags_report(&load(&config)?));
            Ok(())
        }
        Commands::Export => {
            print!("{}", report::export_report(&load(&config)?));
            Ok(())
        }
    }
}

fn load(config: &Config) -> Result<Session> {
    load_session(config, resolve_theme(config))
        .with_context(|| format!("failed to load links from {}", config.source))
}

fn view(config: &Config) -> Result<()> {
    let app = load_app(config);
    let interactive = std::io::stdin().is_terminal() && std::io::stdout().is_terminal();
    if !interactive {
        println!("{}", app.snapshot_text(SNAPSHOT_WIDTH));
        return Ok(());
    }
    runtime::run(app, &config.state_path).map_err(anyhow::Error::msg)
}
