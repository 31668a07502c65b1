//! Core wager/settle data model
//!
//! Shared shapes for both backends. Wire names are camelCase to match the
//! wagering API contract consumed by hosted game content.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle of a wager round
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TicketStatus {
    Active,
    Settled,
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TicketStatus::Active => write!(f, "active"),
            TicketStatus::Settled => write!(f, "settled"),
        }
    }
}

/// A single wager round: created at wager time, closed at settle time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: String,
    /// Wagered amount in minor currency units (integer cents)
    pub wager: i64,
    pub won: bool,
    /// Opaque encoding of the round's visual result, interpreted only by
    /// presentation
    pub scenario: String,
    pub status: TicketStatus,
}

/// Wager submission forwarded to the configured backend
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WagerRequest {
    pub amount: i64,
    pub lines: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub playback_data: Option<serde_json::Value>,
}

impl WagerRequest {
    pub fn new(amount: i64) -> Self {
        Self {
            amount,
            lines: 1,
            playback_data: None,
        }
    }
}

/// Successful wager response from either backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WagerOutcome {
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Server-echoed balance, adopted by the session when present
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
}

/// Ticket reference submitted for settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettleTicket {
    pub id: String,
    pub won: bool,
}

/// Settlement response covering a batch of tickets
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleOutcome {
    /// Total credited for the batch, zero when nothing won
    #[serde(default)]
    pub total_win: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<i64>,
    /// Ids the backend acknowledged as settled
    #[serde(default)]
    pub settled: Vec<String>,
}

/// Response to a transaction update; the payload is echoed opaquely
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOutcome {
    pub transaction_id: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

/// Acknowledgment for a single mock-engine settlement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementAck {
    pub id: String,
    pub status: TicketStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Running balance/wins/cost for the current session, all integer cents
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountState {
    pub balance: i64,
    pub wins: i64,
    pub cost: i64,
}

impl AccountState {
    pub fn with_balance(balance: i64) -> Self {
        Self {
            balance,
            wins: 0,
            cost: 0,
        }
    }
}
