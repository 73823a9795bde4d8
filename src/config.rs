// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

use crate::constants::{env as vars, server};
use crate::settings::{Settings, ValidatedSettings};

/// Service configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server binds to
    pub listen_addr: SocketAddr,
    /// Settings applied to requests that carry no settings document
    pub default_settings: Option<ValidatedSettings>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let listen_addr = lookup(vars::LISTEN_ADDR)
            .unwrap_or_else(|| server::DEFAULT_LISTEN_ADDR.to_string());
        let listen_addr: SocketAddr = listen_addr.parse().with_context(|| {
            format!(
                "{} is not a socket address: {}",
                vars::LISTEN_ADDR,
                listen_addr
            )
        })?;

        // An invalid settings file is fatal, the service must not start with it
        let default_settings = lookup(vars::SETTINGS_FILE)
            .map(|path| load_settings_file(Path::new(&path)))
            .transpose()?;

        Ok(Config {
            listen_addr,
            default_settings,
        })
    }
}

/// Read and validate a YAML (or JSON) settings document
pub fn load_settings_file(path: &Path) -> Result<ValidatedSettings> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let settings: Settings = serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;

    settings
        .into_validated()
        .with_context(|| format!("Invalid settings in {}", path.display()))
}
