// Verified Raffle
// Raffle core for verified humans: browse raffles, enter, and draw a winner

// Core modules
pub mod config;
pub mod randomness;
pub mod seed;

// Raffle modules
pub mod raffle_state;
pub mod raffle_error;
pub mod raffle_store;
pub mod raffle_query;
pub mod raffle_entry;
pub mod raffle_draw;
pub mod raffle_instruction;
pub mod raffle_processor;

use std::sync::Arc;

pub use config::ServiceConfig;
pub use raffle_error::{RaffleError, RaffleResult};
pub use raffle_processor::Processor;
pub use raffle_query::RaffleFilter;
pub use raffle_state::{ParticipantId, Raffle, RaffleId, RaffleStatus};
pub use raffle_store::{InMemoryRaffleStore, RaffleRepository};

/// Processor over an in-memory store seeded with the demo raffles
pub fn demo_processor(config: ServiceConfig) -> RaffleResult<Processor<InMemoryRaffleStore>> {
    let raffles = seed::demo_raffles(chrono::Utc::now().timestamp())?;
    let store = InMemoryRaffleStore::with_raffles(raffles)?;
    Ok(Processor::new(Arc::new(store), config))
}
