//! Common utilities: global options, logging and config file I/O

use anyhow::{Context, Result};
use clap::Args;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::Level;

/// Global options shared by every subcommand
#[derive(Debug, Clone, Serialize, Deserialize, Args)]
pub struct GlobalConfig {
    /// Enable debug output (overrides --log-level)
    #[arg(long, global = true)]
    pub debug: bool,
    
    /// Log level: error, warn, info, debug, trace
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            debug: false,
            log_level: "info".to_string(),
        }
    }
}

impl GlobalConfig {
    /// Effective maximum log level
    pub fn level(&self) -> Result<Level> {
        if self.debug {
            return Ok(Level::DEBUG);
        }
        self.log_level
            .parse::<Level>()
            .map_err(|_| anyhow::anyhow!("Unknown log level: {}", self.log_level))
    }
}

/// Install the tracing subscriber. Logs go to stderr so results on stdout
/// stay machine-readable.
pub fn init_logging(config: &GlobalConfig) -> Result<()> {
    let level = config.level()?;
    
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;
    
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("json")
}

/// Load configuration from file
pub fn load_config<T: for<'a> Deserialize<'a>>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    
    if is_json(path) {
        return serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse JSON config: {:?}", path));
    }
    
    toml::from_str(&content)
        .with_context(|| format!("Failed to parse TOML config: {:?}", path))
}

/// Save configuration to file
pub fn save_config<T: Serialize>(config: &T, path: &Path) -> Result<()> {
    let content = if is_json(path) {
        serde_json::to_string_pretty(config)?
    } else {
        toml::to_string_pretty(config)?
    };
    
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {:?}", path))?;
    Ok(())
}
