use clap::{Parser, Subcommand};
use hmrelay_core::cli;
use hmrelay_core::cli::config::DEFAULT_CONFIG_PATH;
use hmrelay_core::conf::{RelayConfig, load_config};
use hmrelay_core::logging::init_logging;
use hmrelay_core::server;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(
    name = "hmrelay",
    version,
    about = "hmrelay: health monitor to Metron value metric relay"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configuration tooling
    Config {
        #[command(subcommand)]
        cmd: cli::config::ConfigCmd,
    },

    /// Run the relay (default)
    Run {
        /// Path to the configuration file
        #[arg(long = "config-path", alias = "configPath", default_value = DEFAULT_CONFIG_PATH)]
        config_path: String,
    },
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Config { cmd }) => {
            if let Err(e) = cli::config::run(cmd) {
                eprintln!("config error: {e}");
                std::process::exit(1);
            }
        }

        Some(Command::Run { config_path }) => run(&config_path),

        None => run(DEFAULT_CONFIG_PATH),
    }
}

fn run(config_path: &str) {
    let cfg = load_or_exit(config_path);

    init_logging(cfg.debug_port());
    tracing::info!(config_path, "configuration loaded");

    if let Err(e) = server::run(cfg) {
        tracing::error!(error = %format!("{e:#}"), "hmrelay failed");
        std::process::exit(1);
    }
}

/// Configuration problems are fatal before any port is opened.
fn load_or_exit(config_path: &str) -> RelayConfig {
    match load_config(Path::new(config_path)) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            std::process::exit(1);
        }
    }
}
