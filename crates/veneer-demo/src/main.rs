//! Headless driver for the veneer toolkit.
//!
//! `run` starts the toolkit on an in-memory document, opens the demo settings
//! panel in a modal, simulates a few edits and a save, prints the resulting
//! markup, and waits for every toast to finish its lifecycle. `check` validates
//! a configuration file.

use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    time::Duration,
};

use clap::{Parser, Subcommand};
use config::Config;
use dom::Document;
use logging::LogArgs;
use tokio::{runtime, time};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};
use veneer::Toolkit;

#[derive(Parser, Debug)]
#[command(name = "veneer-demo", about = "Drive the veneer toolkit headlessly", version)]
/// Command-line interface for the `veneer-demo` binary.
struct Cli {
    /// Optional subcommand; defaults to `run`.
    #[command(subcommand)]
    command: Option<Command>,

    /// Logging controls
    #[command(flatten)]
    log: LogArgs,

    /// Optional path to the config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
/// Top-level CLI subcommands.
enum Command {
    /// Run the demo session and print the document markup.
    Run {
        /// Skip waiting for toasts to expire
        #[arg(long)]
        no_wait: bool,
    },
    /// Load and validate the configuration then exit.
    Check {
        /// Path to configuration file to check (defaults to ~/.veneer/config.toml)
        path: Option<PathBuf>,

        /// Dump the parsed configuration as JSON to stdout
        #[arg(long)]
        dump: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(&cli.log.spec());

    match cli.command {
        Some(Command::Check { path, dump }) => {
            let explicit = path.as_deref().or(cli.config.as_deref());
            check(explicit, dump)
        }
        Some(Command::Run { no_wait }) => run(cli.config.as_deref(), !no_wait),
        None => run(cli.config.as_deref(), true),
    }
}

/// Validate a config file, optionally printing it as JSON.
fn check(explicit: Option<&Path>, dump: bool) -> ExitCode {
    let cfg = match config::load(explicit) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return ExitCode::FAILURE;
        }
    };
    if !dump {
        println!("OK");
        return ExitCode::SUCCESS;
    }
    match serde_json::to_string_pretty(&cfg) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Load config and run the demo session on a current-thread runtime.
fn run(explicit: Option<&Path>, wait: bool) -> ExitCode {
    let cfg = match config::load(explicit) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("{}", e.pretty());
            return ExitCode::FAILURE;
        }
    };
    let rt = match runtime::Builder::new_current_thread().enable_time().build() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {e}");
            return ExitCode::FAILURE;
        }
    };
    match rt.block_on(session(cfg, wait)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "demo_failed");
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// The scripted demo session.
async fn session(cfg: Config, wait: bool) -> veneer::Result<()> {
    let tk = Toolkit::new(Document::new(), cfg);
    let doc = tk.document().clone();
    let info = Toolkit::info();
    info!(name = info.name, version = info.version, "demo_start");

    let cancel = CancellationToken::new();
    let driver = {
        let tk = tk.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move { tk.run(cancel).await })
    };

    tk.start()?;
    let panel = tk.demo_settings_panel()?;
    let modal = tk.create_modal("Settings", panel.node());
    modal.show()?;

    let input = |key: &str| {
        panel
            .input(key)
            .ok_or_else(|| veneer::Error::Schema(format!("demo panel has no field {key:?}")))
    };
    doc.toggle(input("enableFeature1")?, false)?;
    doc.input(input("textOption")?, "Edited from the demo")?;
    doc.input(input("numberOption")?, "7")?;
    doc.choose(input("selectOption")?, "option3")?;
    doc.click(panel.save_button())?;

    println!("{}", doc.outer_html(doc.root()).unwrap_or_default());
    match serde_json::to_string_pretty(&panel.values()) {
        Ok(json) => println!("{json}"),
        Err(e) => debug!(error = %e, "values_not_serializable"),
    }

    if let Some(close) = modal.close_button() {
        doc.click(close)?;
    }

    if wait {
        while tk.overlays().live_toasts() > 0 {
            time::sleep(Duration::from_millis(50)).await;
        }
    }
    tk.stop()?;
    cancel.cancel();
    if let Err(e) = driver.await {
        error!(error = %e, "overlay_driver_join_failed");
    }

    println!("{}", doc.outer_html(doc.root()).unwrap_or_default());
    info!(nodes = doc.node_count(), "demo_done");
    Ok(())
}
