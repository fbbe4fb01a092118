use borsh::{BorshDeserialize, BorshSerialize};

use crate::{
    raffle_error::RaffleError,
    raffle_query::RaffleFilter,
    raffle_state::{EntryRecord, ParticipantId, Raffle, RaffleId, WinnerRecord},
};

#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub enum RaffleInstruction {
    /// List raffles matching a filter, in store order
    ListRaffles {
        filter: RaffleFilter,
    },

    /// Fetch one raffle
    GetRaffle {
        raffle_id: RaffleId,
    },

    /// Enter a raffle
    ///
    /// Payment, if any, is confirmed by the wallet layer before this is sent.
    EnterRaffle {
        raffle_id: RaffleId,
        participant: ParticipantId,
    },

    /// Draw a winner and complete the raffle
    DrawWinner {
        raffle_id: RaffleId,
    },

    /// Has this participant entered the raffle
    CheckIfEntered {
        raffle_id: RaffleId,
        participant: ParticipantId,
    },

    /// Participant list of one raffle
    GetParticipants {
        raffle_id: RaffleId,
    },

    /// Entry log of one raffle, most recent first
    GetRaffleEntries {
        raffle_id: RaffleId,
    },

    /// Winners board
    TopWinners {
        /// Board size, configured default when absent
        limit: Option<u32>,
    },
}

impl RaffleInstruction {
    /// Unpacks a byte buffer into a RaffleInstruction
    pub fn unpack(input: &[u8]) -> Result<Self, RaffleError> {
        borsh::from_slice(input).map_err(|_| RaffleError::InvalidInstructionData)
    }

    /// Packs a RaffleInstruction into a byte buffer
    pub fn pack(&self) -> Result<Vec<u8>, RaffleError> {
        Ok(borsh::to_vec(self)?)
    }

    /// Instruction name used in logs
    pub fn name(&self) -> &'static str {
        match self {
            RaffleInstruction::ListRaffles { .. } => "List Raffles",
            RaffleInstruction::GetRaffle { .. } => "Get Raffle",
            RaffleInstruction::EnterRaffle { .. } => "Enter Raffle",
            RaffleInstruction::DrawWinner { .. } => "Draw Winner",
            RaffleInstruction::CheckIfEntered { .. } => "Check If Entered",
            RaffleInstruction::GetParticipants { .. } => "Get Participants",
            RaffleInstruction::GetRaffleEntries { .. } => "Get Raffle Entries",
            RaffleInstruction::TopWinners { .. } => "Top Winners",
        }
    }
}

/// Result of a processed instruction, one variant per instruction
#[derive(BorshSerialize, BorshDeserialize, Clone, Debug, PartialEq)]
pub enum RaffleResponse {
    Raffles(Vec<Raffle>),
    /// `None` when the id is unknown
    Raffle(Option<Raffle>),
    Entered,
    Winner(ParticipantId),
    IsEntered(bool),
    Participants(Option<Vec<ParticipantId>>),
    Entries(Option<Vec<EntryRecord>>),
    Winners(Vec<WinnerRecord>),
}

impl RaffleResponse {
    pub fn unpack(input: &[u8]) -> Result<Self, RaffleError> {
        borsh::from_slice(input).map_err(|_| RaffleError::InvalidInstructionData)
    }

    pub fn pack(&self) -> Result<Vec<u8>, RaffleError> {
        Ok(borsh::to_vec(self)?)
    }
}

/// Creates a `ListRaffles` instruction
pub fn list_raffles(filter: RaffleFilter) -> RaffleInstruction {
    RaffleInstruction::ListRaffles { filter }
}

/// Creates a `GetRaffle` instruction
pub fn get_raffle(raffle_id: &RaffleId) -> RaffleInstruction {
    RaffleInstruction::GetRaffle {
        raffle_id: raffle_id.clone(),
    }
}

/// Creates an `EnterRaffle` instruction
pub fn enter_raffle(raffle_id: &RaffleId, participant: &ParticipantId) -> RaffleInstruction {
    RaffleInstruction::EnterRaffle {
        raffle_id: raffle_id.clone(),
        participant: participant.clone(),
    }
}

/// Creates a `DrawWinner` instruction
pub fn draw_winner(raffle_id: &RaffleId) -> RaffleInstruction {
    RaffleInstruction::DrawWinner {
        raffle_id: raffle_id.clone(),
    }
}

/// Creates a `CheckIfEntered` instruction
pub fn check_if_entered(raffle_id: &RaffleId, participant: &ParticipantId) -> RaffleInstruction {
    RaffleInstruction::CheckIfEntered {
        raffle_id: raffle_id.clone(),
        participant: participant.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpack_rejects_garbage() {
        assert_eq!(
            RaffleInstruction::unpack(&[]),
            Err(RaffleError::InvalidInstructionData)
        );
        assert_eq!(
            RaffleInstruction::unpack(&[0xff, 1, 2]),
            Err(RaffleError::InvalidInstructionData)
        );
    }

    #[test]
    fn unpack_rejects_trailing_bytes() {
        let mut data = draw_winner(&"R1".into()).pack().unwrap();
        data.push(0);
        assert_eq!(
            RaffleInstruction::unpack(&data),
            Err(RaffleError::InvalidInstructionData)
        );
    }

    #[test]
    fn blank_participant_fails_to_decode() {
        // Tag 2 (EnterRaffle), raffle id "R1", participant ""
        let mut data = vec![2u8];
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(b"R1");
        data.extend_from_slice(&0u32.to_le_bytes());
        assert_eq!(
            RaffleInstruction::unpack(&data),
            Err(RaffleError::InvalidInstructionData)
        );
    }

    #[test]
    fn enter_raffle_decodes() {
        let participant = ParticipantId::new("0xAAA").unwrap();
        let data = enter_raffle(&"R1".into(), &participant).pack().unwrap();
        match RaffleInstruction::unpack(&data).unwrap() {
            RaffleInstruction::EnterRaffle {
                raffle_id,
                participant: decoded,
            } => {
                assert_eq!(raffle_id.as_str(), "R1");
                assert_eq!(decoded, participant);
            }
            other => panic!("unexpected instruction {:?}", other),
        }
    }
}
