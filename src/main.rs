use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};

use xcode_watch::check::{InvocationEvent, Orchestrator, run_scheduled};
use xcode_watch::config::Config;
use xcode_watch::store::{SqliteParameterStore, VersionStore};

#[derive(Parser)]
#[command(name = "xcode-watch")]
#[command(version, about = "Watches the Xcode release feed and announces new stable builds")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one version check and print the result as JSON
    Check {
        /// Resend the setup notification instead of comparing versions
        #[arg(long)]
        setup: bool,

        /// Invocation event as a JSON object. Anything that is not a JSON
        /// object is rejected before the check runs.
        #[arg(long, value_name = "JSON")]
        event: Option<String>,
    },
    /// Run a version check on a fixed interval until interrupted
    Watch {
        /// Seconds between checks (defaults to CHECK_INTERVAL_SECS)
        #[arg(long)]
        interval_secs: Option<u64>,
    },
    /// Print the recorded version
    Status,
    /// Forget the recorded version so the next check runs the initial setup
    Reset,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env();

    let _guard = xcode_watch::logging::init(cli.verbose, cli.log_file.as_deref(), config.log_format)
        .context("Failed to initialize logging")?;

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(run(cli.command.unwrap_or(Command::Check {
            setup: false,
            event: None,
        }), config))
}

async fn run(command: Command, config: Config) -> anyhow::Result<ExitCode> {
    let versions = open_version_store(&config)?;

    match command {
        Command::Check { setup, event } => {
            let mut event = match event {
                Some(json) => serde_json::from_str::<InvocationEvent>(&json)
                    .context("Invalid --event JSON")?,
                None => InvocationEvent::default(),
            };
            event.send_setup_notification |= setup;

            let orchestrator = Orchestrator::from_config(&config, versions);
            let response = orchestrator.run(&event).await;
            println!("{}", serde_json::to_string_pretty(&response)?);

            if !response.is_success() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Watch { interval_secs } => {
            let period = Duration::from_secs(interval_secs.unwrap_or(config.check_interval_secs));
            let orchestrator = Orchestrator::from_config(&config, versions);

            run_scheduled(&orchestrator, period, async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await;
        }
        Command::Status => match versions.read()? {
            Some(version) => println!("{}", version),
            None => println!("No version recorded in {}", versions.parameter_name()),
        },
        Command::Reset => {
            versions.reset()?;
            println!("Reset {}", versions.parameter_name());
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn open_version_store(config: &Config) -> anyhow::Result<VersionStore> {
    if let Some(dir) = config.parameter_db_path.parent() {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create data directory {:?}", dir))?;
    }

    let store = SqliteParameterStore::new(&config.parameter_db_path)
        .with_context(|| format!("Failed to open {:?}", config.parameter_db_path))?;

    Ok(VersionStore::new(Arc::new(store), &config.parameter_name))
}
