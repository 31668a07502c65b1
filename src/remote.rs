//! Remote wagering API client
//!
//! HTTP rendition of the backend contract: `POST /wager`,
//! `PUT /transaction/{id}`, `POST /settle`. Non-success statuses become
//! transport errors carrying the status text; malformed bodies become
//! validation errors instead of being silently ignored.

use crate::backend::Backend;
use crate::config::WrapperConfig;
use crate::errors::{WrapperError, WrapperResult};
use crate::types::{
    SettleOutcome, SettleTicket, Ticket, TicketStatus, UpdateOutcome, WagerOutcome, WagerRequest,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Client for the remote wagering API
pub struct RemoteBackend {
    client: reqwest::Client,
    base_url: String,
}

/// Wager response as the wire carries it; optional fields are filled from
/// the request when the server does not echo them
#[derive(Debug, Deserialize)]
struct WagerWire {
    id: String,
    won: bool,
    scenario: String,
    #[serde(default)]
    wager: Option<i64>,
    #[serde(default)]
    status: Option<TicketStatus>,
    #[serde(default)]
    balance: Option<i64>,
}

#[derive(Serialize)]
struct SettleBody<'a> {
    tickets: &'a [SettleTicket],
}

impl RemoteBackend {
    pub fn new(config: &WrapperConfig) -> WrapperResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            client,
            base_url: config.backend.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-success response to a transport error with the status text
    fn check(response: reqwest::Response) -> WrapperResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(WrapperError::Transport {
                status,
                message: status
                    .canonical_reason()
                    .unwrap_or("unknown status")
                    .to_string(),
            })
        }
    }
}

#[async_trait]
impl Backend for RemoteBackend {
    async fn wager(&self, request: WagerRequest) -> WrapperResult<WagerOutcome> {
        debug!(amount = request.amount, lines = request.lines, "remote wager");
        let response = self
            .client
            .post(self.url("/wager"))
            .json(&request)
            .send()
            .await?;
        let wire: WagerWire = Self::check(response)?.json().await?;
        Ok(WagerOutcome {
            ticket: Ticket {
                id: wire.id,
                wager: wire.wager.unwrap_or(request.amount),
                won: wire.won,
                scenario: wire.scenario,
                status: wire.status.unwrap_or(TicketStatus::Active),
            },
            balance: wire.balance,
        })
    }

    async fn update(
        &self,
        transaction_id: &str,
        data: serde_json::Value,
    ) -> WrapperResult<UpdateOutcome> {
        debug!(transaction_id, "remote update");
        let response = self
            .client
            .put(self.url(&format!("/transaction/{}", transaction_id)))
            .json(&data)
            .send()
            .await?;
        let echoed: serde_json::Value = Self::check(response)?.json().await?;
        Ok(UpdateOutcome {
            transaction_id: transaction_id.to_string(),
            data: echoed,
        })
    }

    async fn settle(&self, tickets: &[SettleTicket]) -> WrapperResult<SettleOutcome> {
        debug!(count = tickets.len(), "remote settle");
        let response = self
            .client
            .post(self.url("/settle"))
            .json(&SettleBody { tickets })
            .send()
            .await?;
        let outcome: SettleOutcome = Self::check(response)?.json().await?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = WrapperConfig::remote("http://127.0.0.1:9000/api/v1/");
        let backend = RemoteBackend::new(&config).unwrap();
        assert_eq!(backend.url("/wager"), "http://127.0.0.1:9000/api/v1/wager");
    }

    #[test]
    fn test_wager_wire_fills_missing_fields_from_request() {
        let wire: WagerWire =
            serde_json::from_str(r#"{"id": "t-1", "won": false, "scenario": "ABC"}"#).unwrap();
        assert!(wire.wager.is_none());
        assert!(wire.status.is_none());
        assert!(wire.balance.is_none());
    }

    #[test]
    fn test_wager_wire_rejects_missing_required_fields() {
        let wire: Result<WagerWire, _> = serde_json::from_str(r#"{"id": "t-1"}"#);
        assert!(wire.is_err());
    }
}
