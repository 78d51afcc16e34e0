use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use stepkit::commands::validators;
use stepkit::{commands::*, command::CommandSpec, config::Config, constants, log};
use std::io;

#[derive(Parser)]
#[command(name = "stepkit")]
#[command(about = "Logging, retry, progress and analytics helpers for CI steps")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, default_value_t = constants::config::DEFAULT_CONFIG_FILE.to_string())]
    config: String,

    /// Emit JSON log lines instead of colored text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug log records
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a program, retrying on failure, with its output routed through the logger
    Run {
        /// Reattempts after the first failed attempt
        #[arg(long)]
        retry: Option<usize>,

        /// Seconds to wait between attempts
        #[arg(long)]
        wait: Option<u64>,

        /// Show a progress indicator while the program runs
        #[arg(long)]
        progress: bool,

        /// Program and arguments to run
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        command: Vec<String>,
    },

    /// Read colored text from stdin and re-emit it as log records
    Pipe {
        /// Producer of the emitted records (bitrise_cli or step)
        #[arg(long)]
        producer: Option<log::Producer>,
    },

    /// Send an analytics event
    Track {
        /// Event name
        event: String,

        /// Event property as key=value (can be specified multiple times)
        #[arg(short, long = "property")]
        property: Vec<String>,

        /// Send inline instead of through the worker pool
        #[arg(long)]
        sync: bool,

        /// Override the tracking endpoint
        #[arg(long)]
        endpoint: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = execute(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn execute(cli: Cli) -> Result<()> {
    let mut config = Config::load_or_default(&cli.config)?;
    config.apply_env();
    if cli.json {
        config.log.format = log::LogFormat::Json;
    }
    if cli.debug {
        config.log.debug = true;
    }

    let logger = log::build_logger(
        config.log.format,
        config.log.producer,
        config.log.debug,
        io::stdout(),
    );
    log::init_default(logger.clone())?;

    match cli.command {
        Commands::Run {
            retry,
            wait,
            progress,
            command,
        } => {
            validators::validate_run_args(&command)?;

            if let Some(retry) = retry {
                config.retry.times = retry;
            }
            if let Some(wait) = wait {
                config.retry.wait_secs = wait;
            }
            let model = config.retry.model();

            let context = CommandContext { config, logger };
            RunCommand::new(CommandSpec::from_argv(&command), model)
                .with_progress(progress)
                .execute(&context)
                .await?;
        }
        Commands::Pipe { producer } => {
            let context = CommandContext { config, logger };
            PipeCommand { producer }.execute(&context).await?;
        }
        Commands::Track {
            event,
            property,
            sync,
            endpoint,
        } => {
            validators::validate_event_name(&event)?;
            validators::validate_property_args(&property)?;
            validators::validate_endpoint(&endpoint)?;

            let properties = track::parse_properties(&property)?;
            let context = CommandContext { config, logger };
            TrackCommand {
                event,
                properties,
                sync,
                endpoint,
            }
            .execute(&context)
            .await?;
        }
    }

    Ok(())
}
