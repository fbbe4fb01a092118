use async_trait::async_trait;
use log::{debug, info};
use std::{collections::HashMap, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::{
    randomness::RandomSource,
    raffle_error::{RaffleError, RaffleResult},
    raffle_state::{EntryRecord, ParticipantId, Raffle, RaffleId, RaffleStatus, UnixTimestamp},
};

/// Storage behind the query, entry and draw services.
///
/// Every read returns owned snapshots, never live references. The two
/// mutations run their precondition checks and the write as a single unit
/// with respect to other callers on the same raffle.
#[async_trait]
pub trait RaffleRepository: Send + Sync {
    /// Snapshot of one raffle
    async fn get(&self, id: &RaffleId) -> Option<Raffle>;

    /// Snapshot of every raffle in insertion order
    async fn list(&self) -> Vec<Raffle>;

    /// Entry log of one raffle in entry order
    async fn entries(&self, id: &RaffleId) -> Option<Vec<EntryRecord>>;

    /// Add `participant` to an active raffle.
    ///
    /// Fails with `NotFound`, `RaffleClosed` or `AlreadyEntered`, checked in that order.
    async fn append_participant(
        &self,
        id: &RaffleId,
        participant: ParticipantId,
        entered_at: UnixTimestamp,
    ) -> RaffleResult<()>;

    /// Pick a winner with `rng` and complete the raffle.
    ///
    /// Fails with `NotFound`, `NotActive` or `NoParticipants`, checked in that order.
    async fn set_winner(&self, id: &RaffleId, rng: &dyn RandomSource)
        -> RaffleResult<ParticipantId>;
}

#[derive(Debug)]
struct Slot {
    raffle: Raffle,
    entries: Vec<EntryRecord>,
}

#[derive(Debug, Default)]
struct Index {
    order: Vec<Arc<Mutex<Slot>>>,
    by_id: HashMap<RaffleId, usize>,
}

impl Index {
    fn push(&mut self, raffle: Raffle, recorded_at: UnixTimestamp) -> RaffleResult<()> {
        raffle.validate()?;
        if self.by_id.contains_key(&raffle.id) {
            return Err(RaffleError::DuplicateRaffle);
        }

        // Seeded participants have no entry time of their own
        let entered_at = recorded_at.min(raffle.end_date);
        let entries = raffle
            .participants
            .iter()
            .map(|participant| EntryRecord {
                participant: participant.clone(),
                entered_at,
            })
            .collect();

        self.by_id.insert(raffle.id.clone(), self.order.len());
        self.order.push(Arc::new(Mutex::new(Slot { raffle, entries })));
        Ok(())
    }
}

/// Process-local store: an insertion-ordered index with one lock per raffle
#[derive(Debug, Default)]
pub struct InMemoryRaffleStore {
    index: RwLock<Index>,
}

impl InMemoryRaffleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `raffles`, kept in the given order
    pub fn with_raffles(raffles: impl IntoIterator<Item = Raffle>) -> RaffleResult<Self> {
        let now = chrono::Utc::now().timestamp();
        let mut index = Index::default();
        for raffle in raffles {
            index.push(raffle, now)?;
        }
        Ok(Self {
            index: RwLock::new(index),
        })
    }

    /// Add one raffle. Creation is not exposed through the services.
    pub async fn insert(&self, raffle: Raffle) -> RaffleResult<()> {
        let id = raffle.id.clone();
        self.index
            .write()
            .await
            .push(raffle, chrono::Utc::now().timestamp())?;
        info!("Raffle inserted: {}", id);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.index.read().await.order.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn slot(&self, id: &RaffleId) -> Option<Arc<Mutex<Slot>>> {
        let index = self.index.read().await;
        index.by_id.get(id).map(|&i| Arc::clone(&index.order[i]))
    }

    async fn slots(&self) -> Vec<Arc<Mutex<Slot>>> {
        self.index.read().await.order.iter().map(Arc::clone).collect()
    }
}

#[async_trait]
impl RaffleRepository for InMemoryRaffleStore {
    async fn get(&self, id: &RaffleId) -> Option<Raffle> {
        let slot = self.slot(id).await?;
        let slot = slot.lock().await;
        Some(slot.raffle.clone())
    }

    async fn list(&self) -> Vec<Raffle> {
        let mut raffles = Vec::new();
        for slot in self.slots().await {
            raffles.push(slot.lock().await.raffle.clone());
        }
        raffles
    }

    async fn entries(&self, id: &RaffleId) -> Option<Vec<EntryRecord>> {
        let slot = self.slot(id).await?;
        let slot = slot.lock().await;
        Some(slot.entries.clone())
    }

    async fn append_participant(
        &self,
        id: &RaffleId,
        participant: ParticipantId,
        entered_at: UnixTimestamp,
    ) -> RaffleResult<()> {
        let slot = self.slot(id).await.ok_or(RaffleError::NotFound)?;
        let mut slot = slot.lock().await;

        if slot.raffle.status != RaffleStatus::Active {
            debug!("Raffle {} is closed, entry refused", id);
            return Err(RaffleError::RaffleClosed);
        }

        if slot.raffle.has_entered(&participant) {
            debug!("{} already entered raffle {}", participant, id);
            return Err(RaffleError::AlreadyEntered);
        }

        slot.raffle.participants.push(participant.clone());
        slot.entries.push(EntryRecord {
            participant,
            entered_at,
        });
        Ok(())
    }

    async fn set_winner(
        &self,
        id: &RaffleId,
        rng: &dyn RandomSource,
    ) -> RaffleResult<ParticipantId> {
        let slot = self.slot(id).await.ok_or(RaffleError::NotFound)?;
        let mut slot = slot.lock().await;

        if slot.raffle.status != RaffleStatus::Active {
            debug!("Raffle {} is not active, draw refused", id);
            return Err(RaffleError::NotActive);
        }

        let count = slot.raffle.participants.len();
        if count == 0 {
            debug!("Raffle {} has no participants, draw refused", id);
            return Err(RaffleError::NoParticipants);
        }

        let winner = slot.raffle.participants[rng.pick_index(count) % count].clone();

        // Status and winner change together under the slot lock
        slot.raffle.winner = Some(winner.clone());
        slot.raffle.status = RaffleStatus::Completed;
        Ok(winner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::randomness::SeededRandom;

    fn participant(id: &str) -> ParticipantId {
        ParticipantId::new(id).unwrap()
    }

    fn store() -> InMemoryRaffleStore {
        InMemoryRaffleStore::with_raffles(vec![
            Raffle::new("a", "A", "", "", 1_000),
            Raffle::new("b", "B", "", "", 2_000),
            Raffle::new("c", "C", "", "", 3_000),
        ])
        .unwrap()
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = store();
        store.insert(Raffle::new("0", "Zero", "", "", 0)).await.unwrap();
        let ids: Vec<String> = store
            .list()
            .await
            .into_iter()
            .map(|r| r.id.to_string())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c", "0"]);
    }

    #[tokio::test]
    async fn duplicate_and_invalid_inserts_rejected() {
        let store = store();
        assert_eq!(
            store.insert(Raffle::new("a", "Again", "", "", 0)).await,
            Err(RaffleError::DuplicateRaffle)
        );

        let mut broken = Raffle::new("d", "D", "", "", 0);
        broken.winner = Some(participant("0xA"));
        assert!(matches!(
            store.insert(broken).await,
            Err(RaffleError::InvalidRaffle(_))
        ));
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn seeded_participants_get_entry_records() {
        let mut raffle = Raffle::new("p", "P", "", "", 500);
        raffle.participants = vec![participant("0x1"), participant("0x2")];
        let store = InMemoryRaffleStore::with_raffles(vec![raffle]).unwrap();

        let entries = store.entries(&"p".into()).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].participant, participant("0x1"));
        assert!(entries.iter().all(|e| e.entered_at <= 500));
    }

    #[tokio::test]
    async fn append_checks_in_order() {
        let store = store();
        let id = RaffleId::from("a");

        assert_eq!(
            store
                .append_participant(&"missing".into(), participant("0x1"), 10)
                .await,
            Err(RaffleError::NotFound)
        );

        store.append_participant(&id, participant("0x1"), 10).await.unwrap();
        assert_eq!(
            store.append_participant(&id, participant("0x1"), 11).await,
            Err(RaffleError::AlreadyEntered)
        );

        store.set_winner(&id, &SeededRandom::new(1)).await.unwrap();
        // Closed wins over duplicate
        assert_eq!(
            store.append_participant(&id, participant("0x1"), 12).await,
            Err(RaffleError::RaffleClosed)
        );
        assert_eq!(
            store.append_participant(&id, participant("0x2"), 12).await,
            Err(RaffleError::RaffleClosed)
        );

        let entries = store.entries(&id).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].entered_at, 10);
    }

    #[tokio::test]
    async fn set_winner_checks_in_order() {
        let store = store();
        let rng = SeededRandom::new(3);
        let id = RaffleId::from("b");

        assert_eq!(
            store.set_winner(&"missing".into(), &rng).await,
            Err(RaffleError::NotFound)
        );
        assert_eq!(
            store.set_winner(&id, &rng).await,
            Err(RaffleError::NoParticipants)
        );
        assert_eq!(store.get(&id).await.unwrap().status, RaffleStatus::Active);

        store.append_participant(&id, participant("0xA"), 1).await.unwrap();
        let winner = store.set_winner(&id, &rng).await.unwrap();
        assert_eq!(winner, participant("0xA"));

        let raffle = store.get(&id).await.unwrap();
        assert_eq!(raffle.status, RaffleStatus::Completed);
        assert_eq!(raffle.winner, Some(winner));
        assert_eq!(
            store.set_winner(&id, &rng).await,
            Err(RaffleError::NotActive)
        );
    }

    #[tokio::test]
    async fn snapshots_are_detached() {
        let store = store();
        let id = RaffleId::from("c");
        let mut snapshot = store.get(&id).await.unwrap();
        snapshot.participants.push(participant("0xZ"));
        assert!(store.get(&id).await.unwrap().participants.is_empty());
    }
}
