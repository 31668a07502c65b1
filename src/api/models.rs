//! API request and response models
//!
//! Wire shapes for the game-facing facade, camelCase to match what hosted
//! game content expects.

use crate::presentation::Size;
use crate::types::SettleTicket;
use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Wager submission body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerBody {
    pub amount: i64,
    #[serde(default = "default_lines")]
    pub lines: u32,
    #[serde(default)]
    pub playback_data: Option<serde_json::Value>,
}

fn default_lines() -> u32 {
    1
}

/// Settlement submission body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleBody {
    pub tickets: Vec<SettleTicket>,
}

/// Transaction update body; the payload is opaque
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBody {
    pub data: serde_json::Value,
}

/// Snapshot of the session: account counters plus the fixed values
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub balance: i64,
    pub wins: i64,
    pub cost: i64,
    pub currency_code: String,
    pub currency_symbol: String,
    pub language_code: String,
    pub play_mode: String,
    pub accessibility_mode: String,
    pub wrapper_version: String,
    /// Current wall-clock epoch milliseconds
    pub time: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_data: Option<serde_json::Value>,
    pub bonus_rounds: Vec<serde_json::Value>,
}

/// Display and footer geometry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayResponse {
    pub display: Size,
    pub wrapper: Size,
    pub footer_visible: bool,
}

/// Footer visibility after a show/hide call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisibilityResponse {
    pub visible: bool,
}
