use log::info;
use std::sync::Arc;

use crate::{
    config::ServiceConfig,
    randomness::RandomSource,
    raffle_draw::DrawService,
    raffle_entry::EntryService,
    raffle_error::RaffleResult,
    raffle_instruction::{RaffleInstruction, RaffleResponse},
    raffle_query::RaffleQueryService,
    raffle_store::RaffleRepository,
};

/// Dispatches raffle instructions to the query, entry and draw services,
/// all sharing one store.
pub struct Processor<R: RaffleRepository> {
    query: RaffleQueryService<R>,
    entry: EntryService<R>,
    draw: DrawService<R>,
}

impl<R: RaffleRepository> Processor<R> {
    pub fn new(store: Arc<R>, config: ServiceConfig) -> Self {
        Self {
            query: RaffleQueryService::new(Arc::clone(&store), config.clone()),
            entry: EntryService::new(Arc::clone(&store), config.clone()),
            draw: DrawService::new(store, config),
        }
    }

    pub fn with_random_source(
        store: Arc<R>,
        rng: Arc<dyn RandomSource>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            query: RaffleQueryService::new(Arc::clone(&store), config.clone()),
            entry: EntryService::new(Arc::clone(&store), config.clone()),
            draw: DrawService::with_random_source(store, rng, config),
        }
    }

    pub fn query(&self) -> &RaffleQueryService<R> {
        &self.query
    }

    pub fn entry(&self) -> &EntryService<R> {
        &self.entry
    }

    pub fn draw(&self) -> &DrawService<R> {
        &self.draw
    }

    /// Decode, run and encode one instruction
    pub async fn process_instruction(&self, instruction_data: &[u8]) -> RaffleResult<Vec<u8>> {
        let instruction = RaffleInstruction::unpack(instruction_data).map_err(|e| {
            e.print();
            e
        })?;
        match self.process(instruction).await {
            Ok(response) => response.pack(),
            Err(e) => {
                e.print();
                Err(e)
            }
        }
    }

    pub async fn process(&self, instruction: RaffleInstruction) -> RaffleResult<RaffleResponse> {
        info!("Instruction: {}", instruction.name());

        match instruction {
            RaffleInstruction::ListRaffles { filter } => Ok(RaffleResponse::Raffles(
                self.query.list_raffles(&filter).await,
            )),
            RaffleInstruction::GetRaffle { raffle_id } => Ok(RaffleResponse::Raffle(
                self.query.get_raffle(&raffle_id).await,
            )),
            RaffleInstruction::EnterRaffle {
                raffle_id,
                participant,
            } => {
                self.entry.enter_raffle(&raffle_id, participant).await?;
                Ok(RaffleResponse::Entered)
            }
            RaffleInstruction::DrawWinner { raffle_id } => Ok(RaffleResponse::Winner(
                self.draw.draw_winner(&raffle_id).await?,
            )),
            RaffleInstruction::CheckIfEntered {
                raffle_id,
                participant,
            } => Ok(RaffleResponse::IsEntered(
                self.query.check_if_entered(&raffle_id, &participant).await,
            )),
            RaffleInstruction::GetParticipants { raffle_id } => Ok(RaffleResponse::Participants(
                self.query.get_participants(&raffle_id).await,
            )),
            RaffleInstruction::GetRaffleEntries { raffle_id } => Ok(RaffleResponse::Entries(
                self.query.get_raffle_entries(&raffle_id).await,
            )),
            RaffleInstruction::TopWinners { limit } => Ok(RaffleResponse::Winners(
                self.query
                    .top_winners(limit.map(|limit| limit as usize))
                    .await,
            )),
        }
    }
}
