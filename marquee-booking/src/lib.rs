pub mod booking;
pub mod engine;
pub mod ledger;

pub use booking::Booking;
pub use engine::{BookingEngine, BookingError, Quote};
pub use ledger::BookingLedger;
