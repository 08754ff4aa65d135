use chrono::NaiveDateTime;
use marquee_shared::{CinemaId, CineplexCode, MovieId, Seat, ShowtimeId, TicketTier};
use serde::{Deserialize, Serialize};

/// Timestamp layout inside a transaction id.
const TRANSACTION_STAMP: &str = "%Y%m%d%H%M";

/// A confirmed purchase of one or more seats. Never mutated after creation;
/// the stored tier and total are the ones that were charged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub transaction_id: String,
    pub customer_id: String,
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    pub showtime_id: ShowtimeId,
    pub seats: Vec<Seat>,
    pub ticket_tier: TicketTier,
    pub total_cents: i32,
    pub created_at: NaiveDateTime,
}

impl Booking {
    /// Transaction ids are the cineplex code followed by the minting
    /// timestamp, e.g. `GVC202407051930`.
    pub fn mint_transaction_id(code: &CineplexCode, at: NaiveDateTime) -> String {
        format!("{}{}", code, at.format(TRANSACTION_STAMP))
    }
}
