// Demo raffles loaded at process start until a persistent store replaces them
use crate::{
    raffle_error::RaffleResult,
    raffle_state::{ParticipantId, Raffle, RaffleStatus, UnixTimestamp},
};

const DAY: i64 = 24 * 60 * 60;
const PLACEHOLDER_IMAGE: &str = "/placeholder.svg?height=300&width=500";

/// The demo raffle set, with end dates relative to `now`
pub fn demo_raffles(now: UnixTimestamp) -> RaffleResult<Vec<Raffle>> {
    let mut past = Raffle::new(
        "raffle-past-1",
        "Past Raffle: 1 ETH Giveaway",
        "This raffle has already concluded. The winner received 1 ETH directly to their wallet.",
        "1 ETH",
        now - 30 * DAY,
    )
    .with_image_url(PLACEHOLDER_IMAGE);
    past.participants = vec![
        ParticipantId::new("0x123...456")?,
        ParticipantId::new("0x789...012")?,
        ParticipantId::new("0xabc...def")?,
    ];
    past.status = RaffleStatus::Completed;
    past.winner = Some(ParticipantId::new("0x789...012")?);

    Ok(vec![
        Raffle::new(
            "raffle-1",
            "Exclusive NFT Giveaway",
            "Win a limited edition NFT from a renowned digital artist. Only verified humans can participate in this exclusive giveaway.",
            "Limited Edition NFT",
            now + 7 * DAY,
        )
        .with_image_url(PLACEHOLDER_IMAGE),
        Raffle::new(
            "raffle-2",
            "Crypto Conference Tickets",
            "Win two VIP tickets to the upcoming blockchain conference in your city. Transportation not included.",
            "2x VIP Conference Tickets",
            now + 14 * DAY,
        )
        .with_image_url(PLACEHOLDER_IMAGE),
        Raffle::new(
            "raffle-3",
            "Hardware Wallet Giveaway",
            "Keep your crypto secure with a brand new hardware wallet. Only one lucky winner will be selected.",
            "Secure Hardware Wallet",
            now + 5 * DAY,
        )
        .with_image_url(PLACEHOLDER_IMAGE),
        past,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_set_is_valid() {
        let raffles = demo_raffles(1_700_000_000).unwrap();
        assert_eq!(raffles.len(), 4);
        assert!(raffles.iter().all(|r| r.validate().is_ok()));
        assert_eq!(raffles.iter().filter(|r| r.is_active()).count(), 3);
        assert!(raffles[3].has_ended(1_700_000_000));
    }
}
