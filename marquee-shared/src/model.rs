use serde::{Deserialize, Serialize};

/// Projection format of a showtime.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShowType {
    Digital,
    ThreeDimensional,
}

/// Comfort tier of a cinema hall.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CinemaClass {
    Normal,
    Premium,
}

/// Surcharge category applied to one ticket. `Peak` and `SuperPeak` can be
/// forced by the pricing engine regardless of what was requested.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketTier {
    Student,
    Senior,
    NonPeak,
    Peak,
    SuperPeak,
}

/// Screening status reported by the movie catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovieStatus {
    ComingSoon,
    Preview,
    NowShowing,
    EndOfShowing,
}

/// Zero-based (row, column) coordinate into a showtime's seat grid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Seat {
    pub row: u32,
    pub col: u32,
}

impl Seat {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enums_use_screaming_snake_case_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&ShowType::ThreeDimensional).unwrap(),
            "\"THREE_DIMENSIONAL\""
        );
        assert_eq!(
            serde_json::to_string(&TicketTier::SuperPeak).unwrap(),
            "\"SUPER_PEAK\""
        );
        assert_eq!(
            serde_json::from_str::<MovieStatus>("\"COMING_SOON\"").unwrap(),
            MovieStatus::ComingSoon
        );
    }

    #[test]
    fn seat_round_trips() {
        let seat = Seat::new(2, 7);
        let json = serde_json::to_string(&seat).unwrap();
        assert_eq!(serde_json::from_str::<Seat>(&json).unwrap(), seat);
    }
}
