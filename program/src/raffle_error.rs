use log::debug;
use thiserror::Error;

/// Errors that may be returned by the raffle services
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RaffleError {
    /// No raffle exists with the requested id
    #[error("Raffle not found")]
    NotFound,

    /// Entry attempted on a raffle that is no longer accepting participants
    #[error("Raffle is closed")]
    RaffleClosed,

    /// Participant is already in the raffle
    #[error("Already entered")]
    AlreadyEntered,

    /// Draw attempted on a raffle that is not active
    #[error("Raffle is not active")]
    NotActive,

    /// Draw attempted with nobody entered
    #[error("No participants")]
    NoParticipants,

    /// Participant identifier is empty
    #[error("Invalid participant identifier")]
    InvalidParticipant,

    /// Invalid instruction data passed
    #[error("Invalid instruction data")]
    InvalidInstructionData,

    /// A raffle with this id is already in the store
    #[error("Raffle already exists")]
    DuplicateRaffle,

    /// Raffle record breaks a lifecycle invariant
    #[error("Invalid raffle record: {0}")]
    InvalidRaffle(&'static str),

    /// Response could not be encoded
    #[error("Serialization failed: {0}")]
    Serialization(String),
}

impl RaffleError {
    /// Stable numeric code for callers on the other side of the instruction boundary
    pub fn code(&self) -> u32 {
        match self {
            RaffleError::NotFound => 0,
            RaffleError::RaffleClosed => 1,
            RaffleError::AlreadyEntered => 2,
            RaffleError::NotActive => 3,
            RaffleError::NoParticipants => 4,
            RaffleError::InvalidParticipant => 5,
            RaffleError::InvalidInstructionData => 6,
            RaffleError::DuplicateRaffle => 7,
            RaffleError::InvalidRaffle(_) => 8,
            RaffleError::Serialization(_) => 9,
        }
    }

    /// Log the error the way the processor reports a failed instruction
    pub fn print(&self) {
        debug!("{} (code {})", self, self.code());
    }
}

impl From<std::io::Error> for RaffleError {
    fn from(e: std::io::Error) -> Self {
        RaffleError::Serialization(e.to_string())
    }
}

pub type RaffleResult<T> = Result<T, RaffleError>;
