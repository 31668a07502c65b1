//! Backend abstraction
//!
//! Both the mock settlement simulator and the remote wagering API satisfy
//! the same wager/update/settle contract shape, keeping the session bridge
//! backend-agnostic.

use crate::config::{BackendMode, WrapperConfig};
use crate::errors::WrapperResult;
use crate::mock::MockBackend;
use crate::prizes::PrizeTable;
use crate::remote::RemoteBackend;
use crate::types::{SettleOutcome, SettleTicket, UpdateOutcome, WagerOutcome, WagerRequest};
use async_trait::async_trait;
use std::sync::Arc;

/// Wager/update/settle contract shared by all backends
#[async_trait]
pub trait Backend: Send + Sync {
    /// Submit a wager and receive the round's ticket
    async fn wager(&self, request: WagerRequest) -> WrapperResult<WagerOutcome>;

    /// Forward an arbitrary data payload for an open transaction
    async fn update(
        &self,
        transaction_id: &str,
        data: serde_json::Value,
    ) -> WrapperResult<UpdateOutcome>;

    /// Close a batch of tickets and learn the total win
    async fn settle(&self, tickets: &[SettleTicket]) -> WrapperResult<SettleOutcome>;
}

/// Build the backend selected by configuration
pub fn build_backend(config: &WrapperConfig) -> WrapperResult<Arc<dyn Backend>> {
    match config.backend.mode {
        BackendMode::Mock => {
            let table = match &config.backend.prize_table_path {
                Some(path) => PrizeTable::load(path)?,
                None => PrizeTable::demo(),
            };
            Ok(Arc::new(MockBackend::new(table, config)))
        }
        BackendMode::Remote => Ok(Arc::new(RemoteBackend::new(config)?)),
    }
}
