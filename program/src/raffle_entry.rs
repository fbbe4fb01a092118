use log::{info, warn};
use std::sync::Arc;

use crate::{
    config::{simulate_latency, ServiceConfig},
    raffle_error::RaffleResult,
    raffle_store::RaffleRepository,
    raffle_state::{ParticipantId, RaffleId},
};

/// Records participants into active raffles.
///
/// Callers are expected to have settled any entry payment and obtained the
/// participant identifier from the identity provider before calling in.
pub struct EntryService<R: RaffleRepository> {
    store: Arc<R>,
    config: ServiceConfig,
}

impl<R: RaffleRepository> Clone for EntryService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<R: RaffleRepository> EntryService<R> {
    pub fn new(store: Arc<R>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Append `participant` to the raffle.
    ///
    /// Not idempotent: a repeated call fails with `AlreadyEntered`.
    pub async fn enter_raffle(
        &self,
        raffle_id: &RaffleId,
        participant: ParticipantId,
    ) -> RaffleResult<()> {
        simulate_latency(self.config.latency.enter).await;

        let entered_at = chrono::Utc::now().timestamp();
        match self
            .store
            .append_participant(raffle_id, participant.clone(), entered_at)
            .await
        {
            Ok(()) => {
                info!("Entry recorded: raffle={}, participant={}", raffle_id, participant);
                Ok(())
            }
            Err(e) => {
                warn!("Entry rejected: raffle={}, participant={}: {}", raffle_id, participant, e);
                Err(e)
            }
        }
    }
}
