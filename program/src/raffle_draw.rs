use log::{info, warn};
use std::sync::Arc;

use crate::{
    config::{simulate_latency, ServiceConfig},
    randomness::{RandomSource, ThreadRandom},
    raffle_error::RaffleResult,
    raffle_store::RaffleRepository,
    raffle_state::{ParticipantId, RaffleId},
};

/// Closes active raffles by drawing one participant uniformly at random
pub struct DrawService<R: RaffleRepository> {
    store: Arc<R>,
    rng: Arc<dyn RandomSource>,
    config: ServiceConfig,
}

impl<R: RaffleRepository> Clone for DrawService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            rng: Arc::clone(&self.rng),
            config: self.config.clone(),
        }
    }
}

impl<R: RaffleRepository> DrawService<R> {
    pub fn new(store: Arc<R>, config: ServiceConfig) -> Self {
        Self::with_random_source(store, Arc::new(ThreadRandom), config)
    }

    pub fn with_random_source(
        store: Arc<R>,
        rng: Arc<dyn RandomSource>,
        config: ServiceConfig,
    ) -> Self {
        Self { store, rng, config }
    }

    /// Select the winner and mark the raffle completed.
    ///
    /// A completed raffle fails with `NotActive`; read the stored winner
    /// through the query service instead.
    pub async fn draw_winner(&self, raffle_id: &RaffleId) -> RaffleResult<ParticipantId> {
        simulate_latency(self.config.latency.draw).await;

        // End date is advisory, an early draw is allowed
        if let Some(raffle) = self.store.get(raffle_id).await {
            let now = chrono::Utc::now().timestamp();
            if raffle.is_active() && !raffle.has_ended(now) {
                warn!(
                    "Drawing raffle {} before its end date ({} seconds early)",
                    raffle_id,
                    raffle.end_date - now
                );
            }
        }

        match self.store.set_winner(raffle_id, self.rng.as_ref()).await {
            Ok(winner) => {
                info!("Raffle {} completed, winner={}", raffle_id, winner);
                Ok(winner)
            }
            Err(e) => {
                warn!("Draw rejected: raffle={}: {}", raffle_id, e);
                Err(e)
            }
        }
    }
}
