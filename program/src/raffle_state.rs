use borsh::{BorshDeserialize, BorshSerialize};
use std::{collections::HashSet, fmt};

use crate::raffle_error::RaffleError;

/// Seconds since the Unix epoch
pub type UnixTimestamp = i64;

/// Opaque raffle identifier, assigned at creation and never changed
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RaffleId(String);

impl RaffleId {
    pub fn new(id: impl Into<String>) -> Self {
        RaffleId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RaffleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RaffleId {
    fn from(id: &str) -> Self {
        RaffleId::new(id)
    }
}

/// Entrant identifier, in practice a wallet address supplied by the identity provider
#[derive(BorshSerialize, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParticipantId(String);

impl ParticipantId {
    /// The identifier is trusted as-is; only blank input is refused.
    pub fn new(id: impl Into<String>) -> Result<Self, RaffleError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RaffleError::InvalidParticipant);
        }
        Ok(ParticipantId(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Decoding goes through the same check as construction
impl BorshDeserialize for ParticipantId {
    fn deserialize_reader<R: borsh::io::Read>(reader: &mut R) -> borsh::io::Result<Self> {
        let id = String::deserialize_reader(reader)?;
        ParticipantId::new(id).map_err(|e| {
            borsh::io::Error::new(borsh::io::ErrorKind::InvalidData, e.to_string())
        })
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<&str> for ParticipantId {
    type Error = RaffleError;

    fn try_from(id: &str) -> Result<Self, Self::Error> {
        ParticipantId::new(id)
    }
}

/// Status of a raffle
#[derive(BorshSerialize, BorshDeserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RaffleStatus {
    /// Raffle is open for entries
    Active,
    /// Raffle is complete and winner has been chosen
    Completed,
}

impl TryFrom<u8> for RaffleStatus {
    type Error = &'static str;

    fn try_from(val: u8) -> Result<Self, Self::Error> {
        match val {
            0 => Ok(RaffleStatus::Active),
            1 => Ok(RaffleStatus::Completed),
            _ => Err("Invalid raffle status"),
        }
    }
}

impl From<RaffleStatus> for u8 {
    fn from(status: RaffleStatus) -> Self {
        match status {
            RaffleStatus::Active => 0,
            RaffleStatus::Completed => 1,
        }
    }
}

impl fmt::Display for RaffleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RaffleStatus::Active => f.write_str("active"),
            RaffleStatus::Completed => f.write_str("completed"),
        }
    }
}

/// Raffle record
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct Raffle {
    /// Unique identifier for this raffle
    pub id: RaffleId,
    pub title: String,
    pub description: String,
    pub prize: String,
    /// Intended close time. Advisory only, entries and draws do not check it.
    pub end_date: UnixTimestamp,
    pub image_url: Option<String>,
    /// Entrants in entry order, no duplicates
    pub participants: Vec<ParticipantId>,
    /// Status of the raffle
    pub status: RaffleStatus,
    /// Winner of the raffle (set once, on completion)
    pub winner: Option<ParticipantId>,
}

impl Raffle {
    /// Create a new, empty, active raffle
    pub fn new(
        id: impl Into<RaffleId>,
        title: impl Into<String>,
        description: impl Into<String>,
        prize: impl Into<String>,
        end_date: UnixTimestamp,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            prize: prize.into(),
            end_date,
            image_url: None,
            participants: Vec::new(),
            status: RaffleStatus::Active,
            winner: None,
        }
    }

    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == RaffleStatus::Active
    }

    /// Check if the raffle has passed its advisory end date
    pub fn has_ended(&self, current_time: UnixTimestamp) -> bool {
        current_time >= self.end_date
    }

    pub fn has_entered(&self, participant: &ParticipantId) -> bool {
        self.participants.contains(participant)
    }

    /// Verify the record satisfies the lifecycle invariants
    pub fn validate(&self) -> Result<(), RaffleError> {
        let mut seen = HashSet::with_capacity(self.participants.len());
        if !self.participants.iter().all(|p| seen.insert(p)) {
            return Err(RaffleError::InvalidRaffle("duplicate participant"));
        }

        match (self.status, &self.winner) {
            (RaffleStatus::Active, Some(_)) => {
                Err(RaffleError::InvalidRaffle("active raffle has a winner"))
            }
            (RaffleStatus::Completed, None) => {
                Err(RaffleError::InvalidRaffle("completed raffle has no winner"))
            }
            (RaffleStatus::Completed, Some(winner)) if !self.has_entered(winner) => {
                Err(RaffleError::InvalidRaffle("winner is not a participant"))
            }
            _ => Ok(()),
        }
    }
}

/// An accepted entry and when it was recorded
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct EntryRecord {
    pub participant: ParticipantId,
    pub entered_at: UnixTimestamp,
}

/// One line of the winners board
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct WinnerRecord {
    /// 1-based position on the board
    pub rank: u32,
    pub address: ParticipantId,
    pub raffle_id: RaffleId,
    pub prize: String,
    /// End date of the raffle that was won
    pub date: UnixTimestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn participant(id: &str) -> ParticipantId {
        ParticipantId::new(id).unwrap()
    }

    #[test]
    fn status_byte_tags() {
        assert_eq!(u8::from(RaffleStatus::Active), 0);
        assert_eq!(u8::from(RaffleStatus::Completed), 1);
        assert_eq!(RaffleStatus::try_from(1u8), Ok(RaffleStatus::Completed));
        assert!(RaffleStatus::try_from(2u8).is_err());
    }

    #[test]
    fn blank_participant_rejected() {
        assert_eq!(ParticipantId::new(""), Err(RaffleError::InvalidParticipant));
        assert_eq!(ParticipantId::new("   "), Err(RaffleError::InvalidParticipant));
        assert!(ParticipantId::new("0xAAA").is_ok());
    }

    #[test]
    fn new_raffle_is_active_and_empty() {
        let raffle = Raffle::new("R1", "Title", "Desc", "Prize", 100);
        assert!(raffle.is_active());
        assert!(raffle.participants.is_empty());
        assert!(raffle.winner.is_none());
        assert!(raffle.validate().is_ok());
    }

    #[test]
    fn has_ended_is_inclusive() {
        let raffle = Raffle::new("R1", "Title", "Desc", "Prize", 100);
        assert!(!raffle.has_ended(99));
        assert!(raffle.has_ended(100));
    }

    #[test]
    fn validate_catches_broken_records() {
        let mut raffle = Raffle::new("R1", "Title", "Desc", "Prize", 100);
        raffle.participants = vec![participant("0xA"), participant("0xA")];
        assert!(raffle.validate().is_err());

        let mut raffle = Raffle::new("R1", "Title", "Desc", "Prize", 100);
        raffle.winner = Some(participant("0xA"));
        assert!(raffle.validate().is_err());

        let mut raffle = Raffle::new("R1", "Title", "Desc", "Prize", 100);
        raffle.status = RaffleStatus::Completed;
        assert!(raffle.validate().is_err());

        raffle.participants = vec![participant("0xA")];
        raffle.winner = Some(participant("0xB"));
        assert!(raffle.validate().is_err());

        raffle.winner = Some(participant("0xA"));
        assert!(raffle.validate().is_ok());
    }
}
