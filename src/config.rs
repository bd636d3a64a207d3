// src/config.rs

//! Manages engine configuration: defaults, loading from TOML, and validation.

use crate::core::Canvas;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::{AddrParseError, Ipv4Addr};
use std::time::Duration;
use tracing::warn;

/// Settings consumed by the presentation side of the loop.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Canvas width in pixels. New text items enter at this x position.
    #[serde(default = "default_width")]
    pub width: u32,
    /// Canvas height in pixels. New text items get a y position below this.
    #[serde(default = "default_height")]
    pub height: u32,
    /// The headless presenter logs a summary every this many ticks. `0` disables it.
    #[serde(default = "default_log_every")]
    pub log_every: u64,
}

impl DisplayConfig {
    pub fn canvas(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            log_every: default_log_every(),
        }
    }
}

fn default_width() -> u32 {
    1920
}
fn default_height() -> u32 {
    1080
}
fn default_log_every() -> u64 {
    400 // ten seconds at the default tick rate
}

/// The main configuration structure for the engine.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Config {
    /// IPv4 address to listen on.
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Pending-connection queue length passed to `listen`.
    #[serde(default = "default_backlog")]
    pub backlog: u32,
    /// Upper bound on the bytes taken from one socket per readiness event.
    #[serde(default = "default_read_buffer_size")]
    pub read_buffer_size: usize,
    /// Period of the presentation tick, e.g. `"25ms"`.
    #[serde(with = "humantime_serde", default = "default_tick_interval")]
    pub tick_interval: Duration,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub display: DisplayConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    9050
}
fn default_backlog() -> u32 {
    2
}
fn default_read_buffer_size() -> usize {
    4096
}
fn default_tick_interval() -> Duration {
    Duration::from_millis(25)
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            backlog: default_backlog(),
            read_buffer_size: default_read_buffer_size(),
            tick_interval: default_tick_interval(),
            log_level: default_log_level(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file. Missing keys fall back to
    /// their defaults.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml(&contents).with_context(|| format!("Invalid config in '{path}'"))
    }

    /// Parses and validates a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// The address the listener binds to.
    pub fn listen_ip(&self) -> Result<Ipv4Addr, AddrParseError> {
        self.host.trim().parse()
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        self.listen_ip()
            .map_err(|e| anyhow!("host '{}' is not an IPv4 address: {}", self.host, e))?;
        if self.backlog == 0 {
            return Err(anyhow!("backlog cannot be 0"));
        }
        if self.read_buffer_size == 0 {
            return Err(anyhow!("read_buffer_size cannot be 0"));
        }
        if self.tick_interval.is_zero() {
            return Err(anyhow!("tick_interval cannot be 0"));
        }
        if self.display.width == 0 || self.display.height == 0 {
            return Err(anyhow!("display.width and display.height must be non-zero"));
        }

        if self.tick_interval > Duration::from_secs(1) {
            warn!(
                "tick_interval of {:?} is long; displayed values will lag behind the feed.",
                self.tick_interval
            );
        }
        Ok(())
    }
}
