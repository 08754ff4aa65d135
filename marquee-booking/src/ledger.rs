use crate::Booking;
use marquee_shared::ShowtimeId;
use marquee_venue::BookingIndex;

/// Insertion-ordered collection of confirmed bookings.
#[derive(Debug, Default)]
pub struct BookingLedger {
    bookings: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records, keeping their order.
    pub fn from_records(records: Vec<Booking>) -> Self {
        Self { bookings: records }
    }

    /// Current records, for persistence.
    pub fn records(&self) -> &[Booking] {
        &self.bookings
    }

    pub fn insert(&mut self, booking: Booking) {
        self.bookings.push(booking);
    }

    /// Copy of the newest booking with this transaction id.
    pub fn get(&self, transaction_id: &str) -> Option<Booking> {
        self.bookings
            .iter()
            .rev()
            .find(|b| b.transaction_id == transaction_id)
            .cloned()
    }

    /// Remove the newest booking with this transaction id.
    pub fn remove(&mut self, transaction_id: &str) -> Option<Booking> {
        let idx = self
            .bookings
            .iter()
            .rposition(|b| b.transaction_id == transaction_id)?;
        Some(self.bookings.remove(idx))
    }

    /// A customer's bookings, insertion order, copies.
    pub fn by_customer(&self, customer_id: &str) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .cloned()
            .collect()
    }

    /// Bookings of one showtime, insertion order, copies.
    pub fn by_showtime(&self, showtime_id: ShowtimeId) -> Vec<Booking> {
        self.bookings
            .iter()
            .filter(|b| b.showtime_id == showtime_id)
            .cloned()
            .collect()
    }
}

impl BookingIndex for BookingLedger {
    fn count_for_showtime(&self, showtime_id: ShowtimeId) -> usize {
        self.bookings
            .iter()
            .filter(|b| b.showtime_id == showtime_id)
            .count()
    }
}
