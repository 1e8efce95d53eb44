use crate::conf::{RelayConfig, load_config};
use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "config/hmrelay.json";

#[derive(Subcommand, Debug)]
pub enum ConfigCmd {
    /// Validate configuration and exit
    Check {
        /// Path to config file
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,
    },

    /// Print resolved configuration
    Dump {
        #[arg(default_value = DEFAULT_CONFIG_PATH)]
        path: PathBuf,

        /// Output as JSON
        #[arg(long, conflicts_with = "yaml")]
        json: bool,

        /// Output as YAML
        #[arg(long)]
        yaml: bool,
    },
}

pub fn run(cmd: ConfigCmd) -> Result<()> {
    match cmd {
        ConfigCmd::Check { path } => check(&path),
        ConfigCmd::Dump { path, json, yaml } => dump(&path, json, yaml),
    }
}

pub fn check(path: &Path) -> Result<()> {
    let cfg = load_config(path)?;

    for line in check_summary(&cfg) {
        println!("✔ {line}");
    }

    Ok(())
}

pub(crate) fn check_summary(cfg: &RelayConfig) -> Vec<String> {
    let endpoint = |port: Option<u16>| match port {
        Some(port) => format!("port {port}"),
        None => "disabled".to_string(),
    };

    vec![
        "Config loaded successfully".to_string(),
        format!(
            "ingesting monitor lines on {}:{}",
            cfg.incoming_host, cfg.incoming_port
        ),
        format!("forwarding to metron on 127.0.0.1:{}", cfg.metron_port),
        format!("info endpoint: {}", endpoint(cfg.info_port())),
        format!("debug endpoint: {}", endpoint(cfg.debug_port())),
    ]
}

pub fn dump(path: &Path, json: bool, yaml: bool) -> Result<()> {
    let cfg = load_config(path)?;

    if yaml {
        dump_yaml(&cfg)?;
    } else if json || !yaml {
        // default: json
        dump_json(&cfg)?;
    }

    Ok(())
}

fn dump_json<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_json::to_string_pretty(value)?;
    println!("{s}");
    Ok(())
}

fn dump_yaml<T: Serialize>(value: &T) -> Result<()> {
    let s = serde_yaml::to_string(value)?;
    println!("{s}");
    Ok(())
}
