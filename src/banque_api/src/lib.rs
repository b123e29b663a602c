pub mod account;
pub mod auth;
pub mod client;
pub mod constants;
pub mod engine;
pub mod repository;
pub mod sample;
pub mod state;
pub mod transaction;
pub mod types;
pub mod user;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;

use auth::Session;
use client::Gateway;
use engine::MutationEngine;
use repository::BankRepository;
use state::BankState;

/// Wire a gateway, a session and a fresh state holder into an engine.
pub fn get_engine(gateway: Arc<dyn Gateway>, session: Session) -> MutationEngine {
    let repository = Arc::new(BankRepository::new(gateway, session));
    MutationEngine::new(repository, Arc::new(BankState::new()))
}
