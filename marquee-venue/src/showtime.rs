use crate::BookingIndex;
use chrono::NaiveDateTime;
use marquee_catalog::SeatGrid;
use marquee_shared::{CinemaId, MovieId, Seat, ShowType, ShowtimeId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One scheduled screening in one cinema hall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Showtime {
    pub id: ShowtimeId,
    pub cinema_id: CinemaId,
    pub movie_id: MovieId,
    pub starts_at: NaiveDateTime,
    pub show_type: ShowType,
    pub seats: SeatGrid,
}

/// Field changes for [`ShowtimeRegistry::update`]. `None` leaves the field
/// alone.
#[derive(Debug, Default, Clone)]
pub struct ShowtimeUpdate {
    pub cinema_id: Option<CinemaId>,
    pub movie_id: Option<MovieId>,
    pub starts_at: Option<NaiveDateTime>,
    pub show_type: Option<ShowType>,
}

#[derive(Debug, thiserror::Error)]
pub enum ShowtimeError {
    #[error("showtime not found: {0}")]
    NotFound(ShowtimeId),

    #[error("cinema {cinema_id} already has a showtime at {starts_at}")]
    Clash {
        cinema_id: CinemaId,
        starts_at: NaiveDateTime,
    },

    #[error("showtime {0} has bookings; movie and show type are locked")]
    Immutable(ShowtimeId),

    #[error("showtime {0} still has bookings")]
    HasBookings(ShowtimeId),
}

/// Owns every scheduled showtime, in insertion order.
#[derive(Debug, Default)]
pub struct ShowtimeRegistry {
    showtimes: Vec<Showtime>,
}

impl ShowtimeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from persisted records, keeping their order.
    pub fn from_records(records: Vec<Showtime>) -> Self {
        Self { showtimes: records }
    }

    /// Current records, for persistence.
    pub fn records(&self) -> &[Showtime] {
        &self.showtimes
    }

    /// Exact-instant clash probe for one cinema.
    pub fn clashes(&self, cinema_id: CinemaId, starts_at: NaiveDateTime) -> bool {
        self.showtimes
            .iter()
            .any(|s| s.cinema_id == cinema_id && s.starts_at == starts_at)
    }

    /// Schedule a new showtime with a fresh grid. Fails when the cinema
    /// already screens something at that exact instant.
    pub fn add(
        &mut self,
        cinema_id: CinemaId,
        movie_id: MovieId,
        starts_at: NaiveDateTime,
        show_type: ShowType,
        seats: SeatGrid,
    ) -> Result<ShowtimeId, ShowtimeError> {
        if self.clashes(cinema_id, starts_at) {
            return Err(ShowtimeError::Clash {
                cinema_id,
                starts_at,
            });
        }
        let id = Uuid::new_v4();
        self.showtimes.push(Showtime {
            id,
            cinema_id,
            movie_id,
            starts_at,
            show_type,
            seats,
        });
        Ok(id)
    }

    /// Copy of one showtime, independent of the registry's state.
    pub fn get(&self, id: ShowtimeId) -> Option<Showtime> {
        self.showtimes.iter().find(|s| s.id == id).cloned()
    }

    /// Screenings of one movie, insertion order, copies.
    pub fn by_movie(&self, movie_id: MovieId) -> Vec<Showtime> {
        self.showtimes
            .iter()
            .filter(|s| s.movie_id == movie_id)
            .cloned()
            .collect()
    }

    /// Screenings in one cinema, insertion order, copies.
    pub fn by_cinema(&self, cinema_id: CinemaId) -> Vec<Showtime> {
        self.showtimes
            .iter()
            .filter(|s| s.cinema_id == cinema_id)
            .cloned()
            .collect()
    }

    /// Apply field changes. Once a showtime has bookings its movie and show
    /// type are locked; moving it to another cinema or instant re-runs clash
    /// detection against the target slot.
    pub fn update(
        &mut self,
        id: ShowtimeId,
        changes: ShowtimeUpdate,
        bookings: &dyn BookingIndex,
    ) -> Result<(), ShowtimeError> {
        let idx = self.index_of(id)?;
        if bookings.count_for_showtime(id) > 0
            && (changes.movie_id.is_some() || changes.show_type.is_some())
        {
            return Err(ShowtimeError::Immutable(id));
        }

        let target_cinema = changes.cinema_id.unwrap_or(self.showtimes[idx].cinema_id);
        let target_start = changes.starts_at.unwrap_or(self.showtimes[idx].starts_at);
        let moved = target_cinema != self.showtimes[idx].cinema_id
            || target_start != self.showtimes[idx].starts_at;
        if moved
            && self
                .showtimes
                .iter()
                .enumerate()
                .any(|(i, s)| i != idx && s.cinema_id == target_cinema && s.starts_at == target_start)
        {
            return Err(ShowtimeError::Clash {
                cinema_id: target_cinema,
                starts_at: target_start,
            });
        }

        let showtime = &mut self.showtimes[idx];
        showtime.cinema_id = target_cinema;
        showtime.starts_at = target_start;
        if let Some(movie_id) = changes.movie_id {
            showtime.movie_id = movie_id;
        }
        if let Some(show_type) = changes.show_type {
            showtime.show_type = show_type;
        }
        Ok(())
    }

    /// Remove a showtime that has no bookings.
    pub fn remove(
        &mut self,
        id: ShowtimeId,
        bookings: &dyn BookingIndex,
    ) -> Result<Showtime, ShowtimeError> {
        let idx = self.index_of(id)?;
        if bookings.count_for_showtime(id) > 0 {
            return Err(ShowtimeError::HasBookings(id));
        }
        Ok(self.showtimes.remove(idx))
    }

    /// Drop every showtime of a cinema. Guard checks happen in the cinema
    /// registry before this runs.
    pub(crate) fn remove_by_cinema(&mut self, cinema_id: CinemaId) {
        self.showtimes.retain(|s| s.cinema_id != cinema_id);
    }

    /// Unconditionally write seat availability for one showtime. Bounds and
    /// availability validation is the coordinator's job.
    pub fn set_seats(
        &mut self,
        id: ShowtimeId,
        seats: &[Seat],
        make_unavailable: bool,
    ) -> Result<(), ShowtimeError> {
        let idx = self.index_of(id)?;
        self.showtimes[idx].seats.bulk_assign(seats, make_unavailable);
        Ok(())
    }

    /// Every seat of one showtime back to available.
    pub fn reset_seats(&mut self, id: ShowtimeId) -> Result<(), ShowtimeError> {
        let idx = self.index_of(id)?;
        self.showtimes[idx].seats.reset();
        Ok(())
    }

    fn index_of(&self, id: ShowtimeId) -> Result<usize, ShowtimeError> {
        self.showtimes
            .iter()
            .position(|s| s.id == id)
            .ok_or(ShowtimeError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NoBookings;
    use chrono::NaiveDate;
    use marquee_catalog::HallLayout;

    struct Booked;

    impl BookingIndex for Booked {
        fn count_for_showtime(&self, _showtime_id: ShowtimeId) -> usize {
            1
        }
    }

    fn slot(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn grid() -> SeatGrid {
        HallLayout::default().grid()
    }

    #[test]
    fn same_cinema_same_instant_clashes() {
        let mut registry = ShowtimeRegistry::new();
        let movie = Uuid::new_v4();
        registry
            .add(1, movie, slot(5, 19), ShowType::Digital, grid())
            .unwrap();

        let clash = registry.add(1, Uuid::new_v4(), slot(5, 19), ShowType::ThreeDimensional, grid());
        assert!(matches!(clash, Err(ShowtimeError::Clash { cinema_id: 1, .. })));

        // Same instant in another cinema is fine, as is another instant here.
        registry
            .add(2, movie, slot(5, 19), ShowType::Digital, grid())
            .unwrap();
        registry
            .add(1, movie, slot(5, 22), ShowType::Digital, grid())
            .unwrap();
    }

    #[test]
    fn booked_showtime_locks_movie_and_show_type() {
        let mut registry = ShowtimeRegistry::new();
        let id = registry
            .add(1, Uuid::new_v4(), slot(5, 19), ShowType::Digital, grid())
            .unwrap();

        let change_movie = ShowtimeUpdate {
            movie_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(matches!(
            registry.update(id, change_movie.clone(), &Booked),
            Err(ShowtimeError::Immutable(_))
        ));
        // Without bookings the same change goes through.
        registry.update(id, change_movie, &NoBookings).unwrap();

        // Rescheduling stays allowed even when booked.
        let reschedule = ShowtimeUpdate {
            starts_at: Some(slot(6, 19)),
            ..Default::default()
        };
        registry.update(id, reschedule, &Booked).unwrap();
        assert_eq!(registry.get(id).unwrap().starts_at, slot(6, 19));
    }

    #[test]
    fn rescheduling_into_an_occupied_slot_clashes() {
        let mut registry = ShowtimeRegistry::new();
        let movie = Uuid::new_v4();
        registry
            .add(1, movie, slot(5, 19), ShowType::Digital, grid())
            .unwrap();
        let id = registry
            .add(1, movie, slot(5, 22), ShowType::Digital, grid())
            .unwrap();

        let onto_taken = ShowtimeUpdate {
            starts_at: Some(slot(5, 19)),
            ..Default::default()
        };
        assert!(matches!(
            registry.update(id, onto_taken, &NoBookings),
            Err(ShowtimeError::Clash { .. })
        ));

        // Updating without moving never trips clash detection on itself.
        let same_slot = ShowtimeUpdate {
            starts_at: Some(slot(5, 22)),
            ..Default::default()
        };
        registry.update(id, same_slot, &NoBookings).unwrap();
    }

    #[test]
    fn removal_requires_zero_bookings() {
        let mut registry = ShowtimeRegistry::new();
        let id = registry
            .add(1, Uuid::new_v4(), slot(5, 19), ShowType::Digital, grid())
            .unwrap();

        assert!(matches!(
            registry.remove(id, &Booked),
            Err(ShowtimeError::HasBookings(_))
        ));
        registry.remove(id, &NoBookings).unwrap();
        assert!(registry.get(id).is_none());
    }

    #[test]
    fn filtered_views_keep_insertion_order() {
        let mut registry = ShowtimeRegistry::new();
        let movie = Uuid::new_v4();
        let first = registry
            .add(1, movie, slot(5, 12), ShowType::Digital, grid())
            .unwrap();
        registry
            .add(2, Uuid::new_v4(), slot(5, 12), ShowType::Digital, grid())
            .unwrap();
        let second = registry
            .add(1, movie, slot(5, 15), ShowType::ThreeDimensional, grid())
            .unwrap();

        let ids: Vec<ShowtimeId> = registry.by_movie(movie).iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![first, second]);
        assert_eq!(registry.by_cinema(1).len(), 2);
    }

    #[test]
    fn get_returns_an_independent_copy() {
        let mut registry = ShowtimeRegistry::new();
        let id = registry
            .add(1, Uuid::new_v4(), slot(5, 19), ShowType::Digital, grid())
            .unwrap();

        let mut copy = registry.get(id).unwrap();
        copy.seats.assign(Seat::new(0, 0), true);
        assert!(registry.get(id).unwrap().seats.is_available(Seat::new(0, 0)));
    }
}
