//! Session bridge
//!
//! The single object the game content talks to. Owns the account state,
//! dispatches wager/update/settle to the configured backend, and enforces
//! the one-active-round contract. Results come back through one channel
//! only: the returned `Result`.

use crate::backend::Backend;
use crate::config::{SessionConfig, WrapperConfig};
use crate::errors::{WrapperError, WrapperResult};
use crate::presentation::{format_currency, InfoNotice, Size, WrapperView};
use crate::types::{AccountState, SettleOutcome, SettleTicket, UpdateOutcome, WagerOutcome, WagerRequest};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use tracing::{info, warn};

/// One player session against one backend
pub struct Session {
    backend: Arc<dyn Backend>,
    config: SessionConfig,
    account: RwLock<AccountState>,
    /// Ticket ids already settled; settle never double-credits
    settled: Mutex<HashSet<String>>,
    /// One active round at a time; overlapping wagers are rejected
    in_flight: AtomicBool,
    view: RwLock<WrapperView>,
    playback_data: RwLock<Option<serde_json::Value>>,
    bonus_rounds: RwLock<Vec<serde_json::Value>>,
}

/// Clears the in-flight flag on both resolution paths
struct RoundGuard<'a>(&'a AtomicBool);

impl Drop for RoundGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>, config: &WrapperConfig) -> Self {
        Self {
            backend,
            config: config.session.clone(),
            account: RwLock::new(AccountState::with_balance(config.session.starting_balance)),
            settled: Mutex::new(HashSet::new()),
            in_flight: AtomicBool::new(false),
            view: RwLock::new(WrapperView::new(config.presentation.clone())),
            playback_data: RwLock::new(None),
            bonus_rounds: RwLock::new(Vec::new()),
        }
    }

    /// Submit a wager. On success the balance is debited, the cumulative
    /// cost accrues, and a server-echoed balance (when present) wins. On
    /// failure the account is untouched.
    pub async fn wager(
        &self,
        amount: i64,
        lines: u32,
        playback_data: Option<serde_json::Value>,
    ) -> WrapperResult<WagerOutcome> {
        if amount <= 0 {
            return Err(WrapperError::Validation(format!(
                "wager amount must be positive, got {}",
                amount
            )));
        }
        if lines < 1 {
            return Err(WrapperError::Validation(
                "wager lines must be >= 1".to_string(),
            ));
        }
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Acquire)
            .is_err()
        {
            warn!(amount, "wager rejected: round already in flight");
            return Err(WrapperError::RoundInProgress);
        }
        let _guard = RoundGuard(&self.in_flight);

        let request = WagerRequest {
            amount,
            lines,
            playback_data: playback_data.clone(),
        };
        let outcome = self.backend.wager(request).await?;

        // Adopted only once the round is accepted; a failed wager changes
        // nothing, playback data included.
        if playback_data.is_some() {
            *self.playback_data.write().unwrap() = playback_data;
        }

        let mut account = self.account.write().unwrap();
        account.balance -= amount;
        account.cost += amount;
        if let Some(balance) = outcome.balance {
            account.balance = balance;
        }
        info!(
            id = %outcome.ticket.id,
            amount,
            won = outcome.ticket.won,
            balance = account.balance,
            "wager accepted"
        );
        Ok(outcome)
    }

    /// Forward an arbitrary payload for an open transaction; no account
    /// mutation beyond reporting
    pub async fn update(
        &self,
        transaction_id: &str,
        data: serde_json::Value,
    ) -> WrapperResult<UpdateOutcome> {
        self.backend.update(transaction_id, data).await
    }

    /// Close tickets. Already-settled ids are filtered out first, so a
    /// repeated settle credits nothing. Ids are reserved in the settled set
    /// before dispatch, so two concurrent settles of the same ticket cannot
    /// both reach the backend; a failed dispatch releases its reservation.
    pub async fn settle(&self, tickets: Vec<SettleTicket>) -> WrapperResult<SettleOutcome> {
        let fresh: Vec<SettleTicket> = {
            let mut settled = self.settled.lock().unwrap();
            tickets
                .into_iter()
                .filter(|t| settled.insert(t.id.clone()))
                .collect()
        };
        if fresh.is_empty() {
            return Ok(SettleOutcome {
                total_win: 0,
                balance: None,
                settled: Vec::new(),
            });
        }

        let outcome = match self.backend.settle(&fresh).await {
            Ok(outcome) => outcome,
            Err(e) => {
                let mut settled = self.settled.lock().unwrap();
                for ticket in &fresh {
                    settled.remove(&ticket.id);
                }
                return Err(e);
            }
        };

        let mut account = self.account.write().unwrap();
        if outcome.total_win > 0 {
            account.wins += outcome.total_win;
            account.balance += outcome.total_win;
        }
        if let Some(balance) = outcome.balance {
            account.balance = balance;
        }
        info!(
            total_win = outcome.total_win,
            balance = account.balance,
            "settle applied"
        );
        Ok(outcome)
    }

    // Account getters

    pub fn account(&self) -> AccountState {
        *self.account.read().unwrap()
    }

    pub fn balance(&self) -> i64 {
        self.account.read().unwrap().balance
    }

    pub fn wins(&self) -> i64 {
        self.account.read().unwrap().wins
    }

    pub fn cost(&self) -> i64 {
        self.account.read().unwrap().cost
    }

    /// Current wall-clock time in epoch milliseconds
    pub fn time(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    // Fixed configuration values

    pub fn currency_code(&self) -> &str {
        &self.config.currency_code
    }

    pub fn currency_symbol(&self) -> &str {
        &self.config.currency_symbol
    }

    pub fn language_code(&self) -> &str {
        &self.config.language_code
    }

    pub fn play_mode(&self) -> &str {
        &self.config.play_mode
    }

    pub fn accessibility_mode(&self) -> &str {
        &self.config.accessibility_mode
    }

    pub fn wrapper_version(&self) -> &str {
        &self.config.wrapper_version
    }

    pub fn playback_data(&self) -> Option<serde_json::Value> {
        self.playback_data.read().unwrap().clone()
    }

    pub fn bonus_rounds(&self) -> Vec<serde_json::Value> {
        self.bonus_rounds.read().unwrap().clone()
    }

    // Presentation pass-throughs

    pub fn format_currency(&self, cents: i64) -> String {
        format_currency(cents, &self.config.currency_symbol)
    }

    pub fn display_size(&self) -> Size {
        self.view.read().unwrap().display_size()
    }

    pub fn wrapper_size(&self) -> Size {
        self.view.read().unwrap().wrapper_size()
    }

    pub fn wrapper_visible(&self) -> bool {
        self.view.read().unwrap().footer_visible()
    }

    pub fn show_wrapper(&self) {
        self.view.write().unwrap().show();
    }

    pub fn hide_wrapper(&self) {
        self.view.write().unwrap().hide();
    }

    pub fn show_info(&self, notice: InfoNotice) {
        self.view.write().unwrap().show_info(notice);
    }

    pub fn dismiss_info(&self) -> Option<InfoNotice> {
        self.view.write().unwrap().dismiss_info()
    }

    pub fn current_notice(&self) -> Option<InfoNotice> {
        self.view.read().unwrap().current_notice().cloned()
    }
}
