use crate::{BookingIndex, ShowtimeRegistry};
use chrono::NaiveDateTime;
use marquee_shared::{CinemaClass, CinemaId, CineplexCode};
use serde::{Deserialize, Serialize};

/// One hall of a cineplex.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cinema {
    pub id: CinemaId,
    pub class: CinemaClass,
    pub cineplex_code: CineplexCode,
}

#[derive(Debug, thiserror::Error)]
pub enum CinemaError {
    #[error("cinema not found: {0}")]
    NotFound(CinemaId),

    #[error("cinema {0} has upcoming shows with bookings")]
    ActiveBookings(CinemaId),
}

/// Owns the cinema list. Ids are assigned sequentially at creation and stay
/// stable across reloads.
#[derive(Debug, Default)]
pub struct CinemaRegistry {
    cinemas: Vec<Cinema>,
    next_id: CinemaId,
}

impl CinemaRegistry {
    pub fn new() -> Self {
        Self {
            cinemas: Vec::new(),
            next_id: 1,
        }
    }

    /// Rebuild from persisted records; id assignment resumes past the
    /// highest id seen.
    pub fn from_records(records: Vec<Cinema>) -> Self {
        let next_id = records.iter().map(|c| c.id + 1).max().unwrap_or(1);
        Self {
            cinemas: records,
            next_id,
        }
    }

    /// Current records, for persistence.
    pub fn records(&self) -> &[Cinema] {
        &self.cinemas
    }

    pub fn add(&mut self, class: CinemaClass, cineplex_code: CineplexCode) -> CinemaId {
        let id = self.next_id;
        self.next_id += 1;
        self.cinemas.push(Cinema {
            id,
            class,
            cineplex_code,
        });
        id
    }

    /// Copy of one cinema, independent of the registry's state.
    pub fn get(&self, id: CinemaId) -> Option<Cinema> {
        self.cinemas.iter().find(|c| c.id == id).cloned()
    }

    /// All cinemas, insertion order, copies.
    pub fn list(&self) -> Vec<Cinema> {
        self.cinemas.clone()
    }

    /// Remove a cinema and its showtimes. Refused while any booking points
    /// at one of this cinema's showtimes that has not started yet; bookings
    /// on past shows are history and do not block.
    pub fn remove(
        &mut self,
        id: CinemaId,
        showtimes: &mut ShowtimeRegistry,
        bookings: &dyn BookingIndex,
        now: NaiveDateTime,
    ) -> Result<Cinema, CinemaError> {
        let idx = self
            .cinemas
            .iter()
            .position(|c| c.id == id)
            .ok_or(CinemaError::NotFound(id))?;

        let blocked = showtimes
            .by_cinema(id)
            .iter()
            .any(|s| s.starts_at > now && bookings.count_for_showtime(s.id) > 0);
        if blocked {
            return Err(CinemaError::ActiveBookings(id));
        }

        showtimes.remove_by_cinema(id);
        Ok(self.cinemas.remove(idx))
    }
}
