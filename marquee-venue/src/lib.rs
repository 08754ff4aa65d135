pub mod cinema;
pub mod showtime;

pub use cinema::{Cinema, CinemaError, CinemaRegistry};
pub use showtime::{Showtime, ShowtimeError, ShowtimeRegistry, ShowtimeUpdate};

use marquee_shared::ShowtimeId;

/// Booking knowledge the registries need for their referential guards,
/// implemented by the booking ledger one layer up.
pub trait BookingIndex {
    /// Number of bookings referencing the given showtime.
    fn count_for_showtime(&self, showtime_id: ShowtimeId) -> usize;
}

/// An index with no bookings at all, for callers without a ledger.
pub struct NoBookings;

impl BookingIndex for NoBookings {
    fn count_for_showtime(&self, _showtime_id: ShowtimeId) -> usize {
        0
    }
}
