use borsh::{BorshDeserialize, BorshSerialize};
use log::debug;
use std::sync::Arc;

use crate::{
    config::{simulate_latency, ServiceConfig},
    raffle_store::RaffleRepository,
    raffle_state::{
        EntryRecord, ParticipantId, Raffle, RaffleId, RaffleStatus, WinnerRecord,
    },
};

/// Which raffles `list_raffles` returns
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub enum RaffleFilter {
    Active,
    Completed,
    All,
    /// Raffles whose participants include this identifier
    EnteredBy(ParticipantId),
}

impl RaffleFilter {
    pub fn matches(&self, raffle: &Raffle) -> bool {
        match self {
            RaffleFilter::Active => raffle.status == RaffleStatus::Active,
            RaffleFilter::Completed => raffle.status == RaffleStatus::Completed,
            RaffleFilter::All => true,
            RaffleFilter::EnteredBy(participant) => raffle.has_entered(participant),
        }
    }
}

/// Read-only lookups over the raffle store
pub struct RaffleQueryService<R: RaffleRepository> {
    store: Arc<R>,
    config: ServiceConfig,
}

impl<R: RaffleRepository> Clone for RaffleQueryService<R> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            config: self.config.clone(),
        }
    }
}

impl<R: RaffleRepository> RaffleQueryService<R> {
    pub fn new(store: Arc<R>, config: ServiceConfig) -> Self {
        Self { store, config }
    }

    /// Raffles matching `filter`, in store insertion order
    pub async fn list_raffles(&self, filter: &RaffleFilter) -> Vec<Raffle> {
        simulate_latency(self.config.latency.list).await;

        let raffles: Vec<Raffle> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|raffle| filter.matches(raffle))
            .collect();
        debug!("Listed {} raffles for {:?}", raffles.len(), filter);
        raffles
    }

    /// `None` when no raffle has this id
    pub async fn get_raffle(&self, id: &RaffleId) -> Option<Raffle> {
        simulate_latency(self.config.latency.get).await;
        self.store.get(id).await
    }

    /// `None` for an unknown raffle, an empty list for a raffle nobody entered
    pub async fn get_participants(&self, id: &RaffleId) -> Option<Vec<ParticipantId>> {
        simulate_latency(self.config.latency.participants).await;
        self.store.get(id).await.map(|raffle| raffle.participants)
    }

    /// Same store path as `RaffleFilter::EnteredBy`. False for an unknown raffle.
    pub async fn check_if_entered(&self, id: &RaffleId, participant: &ParticipantId) -> bool {
        simulate_latency(self.config.latency.check).await;
        self.store
            .get(id)
            .await
            .map_or(false, |raffle| RaffleFilter::EnteredBy(participant.clone()).matches(&raffle))
    }

    /// Entry log, most recent first
    pub async fn get_raffle_entries(&self, id: &RaffleId) -> Option<Vec<EntryRecord>> {
        simulate_latency(self.config.latency.entries).await;

        let mut entries = self.store.entries(id).await?;
        entries.reverse();
        // Stable sort keeps reverse entry order among equal timestamps
        entries.sort_by(|a, b| b.entered_at.cmp(&a.entered_at));
        Some(entries)
    }

    /// Winners of completed raffles, latest end date first.
    ///
    /// `limit` falls back to the configured board size.
    pub async fn top_winners(&self, limit: Option<usize>) -> Vec<WinnerRecord> {
        simulate_latency(self.config.latency.winners).await;

        let mut completed: Vec<Raffle> = self
            .store
            .list()
            .await
            .into_iter()
            .filter(|raffle| raffle.status == RaffleStatus::Completed)
            .collect();
        completed.sort_by(|a, b| b.end_date.cmp(&a.end_date));

        completed
            .into_iter()
            .filter_map(|raffle| {
                let address = raffle.winner?;
                Some((address, raffle.id, raffle.prize, raffle.end_date))
            })
            .take(limit.unwrap_or(self.config.winners_board_limit))
            .zip(1u32..)
            .map(|((address, raffle_id, prize, date), rank)| WinnerRecord {
                rank,
                address,
                raffle_id,
                prize,
                date,
            })
            .collect()
    }
}
