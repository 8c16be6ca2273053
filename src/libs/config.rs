//! Application configuration.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). Every section is optional; a missing file or section
//! falls back to defaults so the tracker runs against the local SQLite
//! store with the standard 0.95 threshold ratio out of the box.
//!
//! ```rust,no_run
//! use aimtrack::libs::config::Config;
//!
//! let config = Config::read()?;
//! let store = config.store_config();
//! println!("backend: {:?}", store.backend);
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! `AIMTRACK_API_URL` and `AIMTRACK_AUTH_TOKEN` (also read from `.env`)
//! override the remote store settings from the file.

use super::data_storage::DataStorage;
use super::scoring::{ScoreAggregator, DEFAULT_THRESHOLD_RATIO};
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";

pub const ENV_API_URL: &str = "AIMTRACK_API_URL";
pub const ENV_AUTH_TOKEN: &str = "AIMTRACK_AUTH_TOKEN";

/// A configurable section offered by the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Which document store adapter to use.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SQLite file in the data directory.
    #[default]
    Local,
    /// JSON document API over HTTP.
    Remote,
    /// In-process only, nothing persisted.
    Memory,
}

impl StoreBackend {
    pub const ALL: [StoreBackend; 3] = [StoreBackend::Local, StoreBackend::Remote, StoreBackend::Memory];
}

/// Document store connection settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    /// Base URL of the remote document API, e.g. `https://scores.example.com/api`.
    #[serde(default)]
    pub api_url: String,
    /// Sent as `Authorization: Bearer <token>` when not empty.
    #[serde(default)]
    pub auth_token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            backend: StoreBackend::Local,
            api_url: String::new(),
            auth_token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Applies `AIMTRACK_API_URL` / `AIMTRACK_AUTH_TOKEN` when they are set and non-empty.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(ENV_API_URL) {
            if !url.trim().is_empty() {
                self.api_url = url;
            }
        }
        if let Ok(token) = env::var(ENV_AUTH_TOKEN) {
            if !token.trim().is_empty() {
                self.auth_token = token;
            }
        }
        self
    }
}

/// Score aggregation settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    /// Fraction of the highscore a session best must reach, in `(0, 1]`.
    pub threshold_ratio: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        ScoringConfig {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store: Option<StoreConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub scoring: Option<ScoringConfig>,
}

impl Config {
    /// Loads `config.json`, returning defaults when the file does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns `false` if there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Effective store settings: file values (or defaults) plus env overrides.
    pub fn store_config(&self) -> StoreConfig {
        self.store.clone().unwrap_or_default().with_env_overrides()
    }

    /// Aggregator for the configured ratio, optionally overridden per session.
    pub fn aggregator(&self, ratio_override: Option<f64>) -> Result<ScoreAggregator> {
        let ratio = ratio_override.unwrap_or_else(|| self.scoring.clone().unwrap_or_default().threshold_ratio);
        Ok(ScoreAggregator::new(ratio)?)
    }

    pub fn modules() -> Vec<ConfigModule> {
        vec![
            ConfigModule {
                key: "store".to_string(),
                name: "Document store".to_string(),
            },
            ConfigModule {
                key: "scoring".to_string(),
                name: "Scoring".to_string(),
            },
        ]
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let modules = Self::modules();

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "store" => {
                    let default = config.store.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleStore);

                    let backends: Vec<String> = StoreBackend::ALL.iter().map(|b| format!("{:?}", b).to_lowercase()).collect();
                    let current = StoreBackend::ALL.iter().position(|b| *b == default.backend).unwrap_or(0);
                    let backend = Select::with_theme(&ColorfulTheme::default())
                        .with_prompt(Message::PromptStoreBackend.to_string())
                        .items(&backends)
                        .default(current)
                        .interact()?;
                    let backend = StoreBackend::ALL[backend];

                    let mut store = StoreConfig { backend, ..default.clone() };
                    if backend == StoreBackend::Remote {
                        store.api_url = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStoreApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?;
                        store.auth_token = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStoreAuthToken.to_string())
                            .default(default.auth_token)
                            .allow_empty(true)
                            .interact_text()?;
                        store.timeout_secs = Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptStoreTimeout.to_string())
                            .default(default.timeout_secs)
                            .interact_text()?;
                    }
                    config.store = Some(store);
                }
                "scoring" => {
                    let default = config.scoring.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleScoring);

                    let range_msg = Message::ThresholdRatioRange.to_string();
                    config.scoring = Some(ScoringConfig {
                        threshold_ratio: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptThresholdRatio.to_string())
                            .default(default.threshold_ratio)
                            .validate_with(|input: &f64| -> Result<(), &str> {
                                if *input > 0.0 && *input <= 1.0 {
                                    Ok(())
                                } else {
                                    Err(&range_msg)
                                }
                            })
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
