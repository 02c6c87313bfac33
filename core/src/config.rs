use std::time::Duration;

use camino::{Utf8Path as Path, Utf8PathBuf as PathBuf};
use color_eyre::eyre::{Context, Result};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlServer {
    address: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlDataDir {
    path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlReminders {
    sweep_interval_secs: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlPasswordHashing {
    memory_kib: Option<u32>,
    iterations: Option<u32>,
    parallelism: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct TomlConfig {
    #[serde(rename = "Server")]
    pub server: Option<TomlServer>,
    #[serde(rename = "DataDir")]
    pub data_dir: TomlDataDir,
    #[serde(rename = "Reminders")]
    pub reminders: Option<TomlReminders>,
    #[serde(rename = "PasswordHashing")]
    pub password_hashing: Option<TomlPasswordHashing>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataDir {
    pub path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderConfig {
    pub sweep_interval: Duration,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        ReminderConfig {
            sweep_interval: Duration::from_secs(300),
        }
    }
}

/// argon2id cost parameters for capsule passwords
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordHashingConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashingConfig {
    fn default() -> Self {
        PasswordHashingConfig {
            memory_kib: argon2::Params::DEFAULT_M_COST,
            iterations: argon2::Params::DEFAULT_T_COST,
            parallelism: argon2::Params::DEFAULT_P_COST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub address: Option<String>,
    pub port: Option<u16>,
    pub data_dir: DataDir,
    pub reminders: ReminderConfig,
    pub password_hashing: PasswordHashingConfig,
}

pub async fn read_config(path: &Path) -> Result<Config> {
    let toml_str = tokio::fs::read_to_string(path)
        .await
        .context(format!("Error reading config file {}", path))?;
    parse_config(&toml_str)
}

pub fn parse_config(toml_str: &str) -> Result<Config> {
    let toml_config: TomlConfig = toml::from_str(toml_str).context("Error parsing config file")?;
    let (address, port) = match toml_config.server {
        Some(server) => (server.address, server.port),
        None => (None, None),
    };
    let reminders = match toml_config.reminders {
        Some(TomlReminders {
            sweep_interval_secs: Some(0),
        }) => {
            color_eyre::eyre::bail!("Reminders.sweep_interval_secs must be greater than 0")
        }
        Some(TomlReminders {
            sweep_interval_secs: Some(secs),
        }) => ReminderConfig {
            sweep_interval: Duration::from_secs(secs),
        },
        _ => ReminderConfig::default(),
    };
    let defaults = PasswordHashingConfig::default();
    let password_hashing = match toml_config.password_hashing {
        Some(ph) => PasswordHashingConfig {
            memory_kib: ph.memory_kib.unwrap_or(defaults.memory_kib),
            iterations: ph.iterations.unwrap_or(defaults.iterations),
            parallelism: ph.parallelism.unwrap_or(defaults.parallelism),
        },
        None => defaults,
    };
    Ok(Config {
        address,
        port,
        data_dir: DataDir {
            path: toml_config.data_dir.path.into(),
        },
        reminders,
        password_hashing,
    })
}
