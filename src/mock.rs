//! Mock settlement engine
//!
//! Local simulator standing in for the remote wagering API: draws a prize
//! entry by weight, a scenario variant uniformly within it, and issues a
//! synthetic ticket. An artificial latency stands in for network round
//! trips.

use crate::backend::Backend;
use crate::config::WrapperConfig;
use crate::errors::{WrapperError, WrapperResult};
use crate::prizes::{PrizeEntry, PrizeTable};
use crate::types::{
    SettleOutcome, SettleTicket, SettlementAck, Ticket, TicketStatus, UpdateOutcome, WagerOutcome,
    WagerRequest,
};
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

/// Weighted-random settlement simulator
pub struct MockBackend {
    table: PrizeTable,
    latency: Duration,
    payout_multiplier: i64,
    rng: Mutex<StdRng>,
    /// Tickets issued this session, keyed by id. Settlement looks up the
    /// original wager and win flag here.
    issued: Mutex<HashMap<String, Ticket>>,
}

/// Walk the table in fixed order, subtracting each weight from `r`, and
/// select the first entry whose cumulative boundary is crossed. Earlier
/// entries win boundary ties. If floating-point rounding leaves `r`
/// positive after the walk, fall back to the first entry.
fn select_entry(table: &PrizeTable, mut r: f64) -> &PrizeEntry {
    for entry in table.entries() {
        r -= entry.weight;
        if r <= 0.0 {
            return entry;
        }
    }
    &table.entries()[0]
}

impl MockBackend {
    pub fn new(table: PrizeTable, config: &WrapperConfig) -> Self {
        Self::with_rng(table, config, StdRng::from_entropy())
    }

    /// Deterministic engine for reproducible draws
    pub fn with_seed(table: PrizeTable, config: &WrapperConfig, seed: u64) -> Self {
        Self::with_rng(table, config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(table: PrizeTable, config: &WrapperConfig, rng: StdRng) -> Self {
        Self {
            table,
            latency: config.mock_latency(),
            payout_multiplier: config.backend.mock_payout_multiplier,
            rng: Mutex::new(rng),
            issued: Mutex::new(HashMap::new()),
        }
    }

    /// Draw a ticket: weighted prize selection, then a uniform scenario
    /// variant within the selected entry
    pub fn draw_ticket(&self, amount: i64, count: u32) -> WrapperResult<Ticket> {
        if count < 1 {
            return Err(WrapperError::Validation(
                "wager count must be >= 1".to_string(),
            ));
        }
        self.table.validate()?;

        let mut rng = self.rng.lock().unwrap();
        let r = rng.gen::<f64>() * self.table.total_weight();
        let entry = select_entry(&self.table, r);
        let scenario_index = rng.gen_range(0..entry.scenarios.len());

        let ticket = Ticket {
            id: Uuid::new_v4().to_string(),
            wager: amount,
            won: entry.win,
            scenario: entry.scenarios[scenario_index].scenario.clone(),
            status: TicketStatus::Active,
        };
        debug!(id = %ticket.id, won = ticket.won, scenario = %ticket.scenario, "mock draw");
        Ok(ticket)
    }

    /// Pure acknowledgment; win amounts are never recomputed here. Callers
    /// learn win/loss from the wager result's `won` flag.
    pub fn settle_ticket(&self, ticket_id: &str) -> SettlementAck {
        if let Some(ticket) = self.issued.lock().unwrap().get_mut(ticket_id) {
            ticket.status = TicketStatus::Settled;
        }
        SettlementAck {
            id: ticket_id.to_string(),
            status: TicketStatus::Settled,
            timestamp: chrono::Utc::now(),
        }
    }

    fn payout_for(&self, ticket: &SettleTicket) -> i64 {
        let issued = self.issued.lock().unwrap();
        match issued.get(&ticket.id) {
            // Only tickets this engine issued as winners pay out.
            Some(original) if original.won && ticket.won => {
                original.wager * self.payout_multiplier
            }
            _ => 0,
        }
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn wager(&self, request: WagerRequest) -> WrapperResult<WagerOutcome> {
        tokio::time::sleep(self.latency).await;
        let ticket = self.draw_ticket(request.amount, request.lines)?;
        self.issued
            .lock()
            .unwrap()
            .insert(ticket.id.clone(), ticket.clone());
        Ok(WagerOutcome {
            ticket,
            balance: None,
        })
    }

    async fn update(
        &self,
        transaction_id: &str,
        data: serde_json::Value,
    ) -> WrapperResult<UpdateOutcome> {
        tokio::time::sleep(self.latency).await;
        Ok(UpdateOutcome {
            transaction_id: transaction_id.to_string(),
            data,
        })
    }

    async fn settle(&self, tickets: &[SettleTicket]) -> WrapperResult<SettleOutcome> {
        tokio::time::sleep(self.latency).await;
        let total_win: i64 = tickets.iter().map(|t| self.payout_for(t)).sum();
        let settled = tickets
            .iter()
            .map(|t| self.settle_ticket(&t.id).id)
            .collect();
        Ok(SettleOutcome {
            total_win,
            balance: None,
            settled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prizes::ScenarioVariant;

    fn fast_config() -> WrapperConfig {
        let mut config = WrapperConfig::demo();
        config.backend.mock_latency_ms = 0;
        config
    }

    fn single_loss_table() -> PrizeTable {
        PrizeTable::new(vec![PrizeEntry {
            weight: 1.0,
            win: false,
            scenarios: vec![ScenarioVariant::new("AAA")],
        }])
        .unwrap()
    }

    #[test]
    fn test_single_entry_table_is_deterministic() {
        let engine = MockBackend::with_seed(single_loss_table(), &fast_config(), 7);
        for _ in 0..50 {
            let ticket = engine.draw_ticket(100, 1).unwrap();
            assert!(!ticket.won);
            assert_eq!(ticket.scenario, "AAA");
            assert_eq!(ticket.wager, 100);
            assert_eq!(ticket.status, TicketStatus::Active);
        }
    }

    #[test]
    fn test_boundary_ties_go_to_earlier_entry() {
        let table = PrizeTable::new(vec![
            PrizeEntry {
                weight: 1.0,
                win: false,
                scenarios: vec![ScenarioVariant::new("ABC")],
            },
            PrizeEntry {
                weight: 1.0,
                win: true,
                scenarios: vec![ScenarioVariant::new("AAA")],
            },
        ])
        .unwrap();

        assert!(!select_entry(&table, 0.5).win);
        // r landing exactly on the first boundary selects the first entry.
        assert!(!select_entry(&table, 1.0).win);
        assert!(select_entry(&table, 1.5).win);
    }

    #[test]
    fn test_rounding_fallback_selects_first_entry() {
        let table = PrizeTable::demo();
        let past_the_end = table.total_weight() + 1.0;
        let first = &table.entries()[0];
        assert_eq!(select_entry(&table, past_the_end).win, first.win);
    }

    #[test]
    fn test_draws_converge_to_configured_weights() {
        let table = PrizeTable::demo();
        let engine = MockBackend::with_seed(table.clone(), &fast_config(), 42);

        let mut win_scenarios = std::collections::HashMap::new();
        for entry in table.entries() {
            for variant in &entry.scenarios {
                win_scenarios.insert(variant.scenario.clone(), entry.weight);
            }
        }

        let draws = 100_000usize;
        let mut counts: std::collections::HashMap<String, usize> = Default::default();
        for _ in 0..draws {
            let ticket = engine.draw_ticket(100, 1).unwrap();
            *counts.entry(ticket.scenario).or_default() += 1;
        }

        // Aggregate per prize entry and compare against expected shares.
        let total_weight = table.total_weight();
        for entry in table.entries() {
            let observed: usize = entry
                .scenarios
                .iter()
                .map(|v| counts.get(&v.scenario).copied().unwrap_or(0))
                .sum();
            let expected = entry.weight / total_weight;
            let actual = observed as f64 / draws as f64;
            assert!(
                (actual - expected).abs() < 0.01,
                "entry weight {} expected share {:.3}, observed {:.3}",
                entry.weight,
                expected,
                actual
            );
        }
    }

    #[test]
    fn test_winning_scenario_belongs_to_a_winning_entry() {
        let table = PrizeTable::demo();
        let engine = MockBackend::with_seed(table.clone(), &fast_config(), 99);

        for _ in 0..5_000 {
            let ticket = engine.draw_ticket(100, 1).unwrap();
            let owner = table
                .entries()
                .iter()
                .find(|e| e.scenarios.iter().any(|v| v.scenario == ticket.scenario))
                .expect("scenario must come from the table");
            assert_eq!(ticket.won, owner.win);
        }
    }

    #[test]
    fn test_zero_count_is_rejected() {
        let engine = MockBackend::with_seed(single_loss_table(), &fast_config(), 1);
        assert!(matches!(
            engine.draw_ticket(100, 0),
            Err(WrapperError::Validation(_))
        ));
    }

    #[test]
    fn test_settle_ticket_is_a_pure_ack() {
        let engine = MockBackend::with_seed(single_loss_table(), &fast_config(), 1);
        let ack = engine.settle_ticket("unknown-id");
        assert_eq!(ack.id, "unknown-id");
        assert_eq!(ack.status, TicketStatus::Settled);
    }

    #[tokio::test]
    async fn test_backend_wager_issues_unique_tickets() {
        let engine = MockBackend::with_seed(PrizeTable::demo(), &fast_config(), 5);
        let a = engine.wager(WagerRequest::new(100)).await.unwrap();
        let b = engine.wager(WagerRequest::new(100)).await.unwrap();
        assert_ne!(a.ticket.id, b.ticket.id);
        assert!(a.balance.is_none());
    }

    #[tokio::test]
    async fn test_backend_settle_pays_winners_only() {
        let mut config = fast_config();
        config.backend.mock_payout_multiplier = 10;
        // All-win table so the drawn ticket is guaranteed to be a winner.
        let table = PrizeTable::new(vec![PrizeEntry {
            weight: 1.0,
            win: true,
            scenarios: vec![ScenarioVariant::new("777")],
        }])
        .unwrap();
        let engine = MockBackend::with_seed(table, &config, 3);

        let outcome = engine.wager(WagerRequest::new(250)).await.unwrap();
        let result = engine
            .settle(&[
                SettleTicket {
                    id: outcome.ticket.id.clone(),
                    won: true,
                },
                SettleTicket {
                    id: "never-issued".to_string(),
                    won: true,
                },
            ])
            .await
            .unwrap();

        assert_eq!(result.total_win, 2_500);
        assert_eq!(result.settled.len(), 2);
    }

    #[tokio::test]
    async fn test_backend_update_echoes_payload() {
        let engine = MockBackend::with_seed(single_loss_table(), &fast_config(), 1);
        let payload = serde_json::json!({"step": 2});
        let outcome = engine.update("tx-1", payload.clone()).await.unwrap();
        assert_eq!(outcome.transaction_id, "tx-1");
        assert_eq!(outcome.data, payload);
    }
}
