//! Configuration management with validation and defaults
//!
//! One config tree resolved at startup: backend selection, fixed session
//! values handed to the game content, and presentation geometry.

use crate::errors::{WrapperError, WrapperResult};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Top-level wrapper configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WrapperConfig {
    pub backend: BackendConfig,
    pub session: SessionConfig,
    pub presentation: PresentationConfig,
}

/// Which backend the bridge dispatches to
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BackendMode {
    /// Local weighted-random settlement simulator
    Mock,
    /// Remote wagering API over HTTP
    Remote,
}

/// Backend selection and transport settings
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub mode: BackendMode,
    /// Base URL of the remote wagering API, e.g. `https://api.example.com/api/v1`
    pub base_url: String,
    /// Per-request timeout so a hung backend cannot pin the in-flight round
    pub request_timeout_ms: u64,
    /// Artificial latency in mock mode, standing in for network round trips
    pub mock_latency_ms: u64,
    /// Prize table document for mock mode; built-in demo table when unset
    pub prize_table_path: Option<String>,
    /// Payout per won ticket in mock settle, as a multiple of the wager
    pub mock_payout_multiplier: i64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: BackendMode::Mock,
            base_url: "https://api.eql.games/api/v1".to_string(),
            request_timeout_ms: 10_000,
            mock_latency_ms: 150,
            prize_table_path: None,
            mock_payout_multiplier: 10,
        }
    }
}

/// Fixed values the bridge reports to the game content
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Opening balance in minor currency units (integer cents)
    pub starting_balance: i64,
    pub currency_code: String,
    pub currency_symbol: String,
    pub language_code: String,
    pub play_mode: String,
    pub accessibility_mode: String,
    pub wrapper_version: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            starting_balance: 10_000,
            currency_code: "USD".to_string(),
            currency_symbol: "$".to_string(),
            language_code: "en-US".to_string(),
            play_mode: "DEMO".to_string(),
            accessibility_mode: "standard".to_string(),
            wrapper_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Display and footer geometry reported through the presentation getters
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PresentationConfig {
    pub display_width: u32,
    pub display_height: u32,
    pub footer_height: u32,
}

impl Default for PresentationConfig {
    fn default() -> Self {
        Self {
            display_width: 1280,
            display_height: 720,
            footer_height: 50,
        }
    }
}

impl WrapperConfig {
    /// Demo preset: mock backend, default prize table, demo balance
    pub fn demo() -> Self {
        Self::default()
    }

    /// Remote preset pointed at a wagering API base URL
    pub fn remote(base_url: impl Into<String>) -> Self {
        Self {
            backend: BackendConfig {
                mode: BackendMode::Remote,
                base_url: base_url.into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Load from a TOML document on disk
    pub fn load(path: impl AsRef<Path>) -> WrapperResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)
            .map_err(|e| WrapperError::Configuration(format!("invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate for logical consistency
    pub fn validate(&self) -> WrapperResult<()> {
        if self.backend.mode == BackendMode::Remote && self.backend.base_url.is_empty() {
            return Err(WrapperError::Configuration(
                "remote mode requires a backend base_url".to_string(),
            ));
        }
        if self.backend.request_timeout_ms == 0 {
            return Err(WrapperError::Configuration(
                "request_timeout_ms must be > 0".to_string(),
            ));
        }
        if self.backend.mock_payout_multiplier <= 0 {
            return Err(WrapperError::Configuration(
                "mock_payout_multiplier must be > 0".to_string(),
            ));
        }
        if self.session.starting_balance < 0 {
            return Err(WrapperError::Configuration(
                "starting_balance must not be negative".to_string(),
            ));
        }
        if self.presentation.footer_height >= self.presentation.display_height {
            return Err(WrapperError::Configuration(
                "footer_height must be smaller than display_height".to_string(),
            ));
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.request_timeout_ms)
    }

    pub fn mock_latency(&self) -> Duration {
        Duration::from_millis(self.backend.mock_latency_ms)
    }
}
