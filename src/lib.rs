//! Reelgate - Game Wrapper Bridge
//!
//! Thin bridge between hosted game content and a wagering backend: a
//! session object tracking balance/wins/cost, a weighted-random mock
//! settlement engine for demo play, a remote HTTP backend client, and a
//! small facade serving it all to the game over loopback HTTP.

pub mod api;
pub mod backend;
pub mod config;
pub mod errors;
pub mod mock;
pub mod presentation;
pub mod prizes;
pub mod remote;
pub mod session;
pub mod types;

pub use backend::{build_backend, Backend};
pub use config::{BackendMode, WrapperConfig};
pub use errors::{WrapperError, WrapperResult};
pub use mock::MockBackend;
pub use prizes::{PrizeEntry, PrizeTable, ScenarioVariant};
pub use remote::RemoteBackend;
pub use session::Session;
pub use types::{AccountState, SettleOutcome, SettleTicket, Ticket, TicketStatus, WagerOutcome};
