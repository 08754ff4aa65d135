pub mod pricing;
pub mod seating;

pub use pricing::{PriceScheme, PricingEngine};
pub use seating::{HallLayout, SeatGrid};
