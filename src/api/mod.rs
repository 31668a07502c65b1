//! Game-facing HTTP facade
//!
//! Exposes the session bridge's operations over loopback HTTP so hosted
//! game content can drive rounds and read session state.

pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod server;

pub use server::{ApiConfig, ApiServer};
