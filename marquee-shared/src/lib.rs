pub mod cineplex;
pub mod model;

pub use cineplex::{CineplexCode, CineplexCodeError};
pub use model::{CinemaClass, MovieStatus, Seat, ShowType, TicketTier};

use uuid::Uuid;

/// Stable integer id assigned by the cinema registry at creation.
pub type CinemaId = u32;

pub type MovieId = Uuid;

pub type ShowtimeId = Uuid;
