use crate::{Booking, BookingLedger};
use chrono::{Local, NaiveDate, NaiveDateTime};
use marquee_catalog::{HallLayout, PriceScheme, PricingEngine};
use marquee_core::store::{collections, load_all, save_all};
use marquee_core::{MovieCatalog, RecordStore, StoreError};
use marquee_shared::{
    CinemaClass, CinemaId, CineplexCode, MovieId, MovieStatus, Seat, ShowType, ShowtimeId,
    TicketTier,
};
use marquee_venue::{
    Cinema, CinemaError, CinemaRegistry, Showtime, ShowtimeError, ShowtimeRegistry, ShowtimeUpdate,
};
use serde::Serialize;
use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{info, warn};

/// Engine-level failures surfaced to the presentation layer. The engine
/// never retries and never mutates state before validation completes.
#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("showtime not found: {0}")]
    ShowtimeNotFound(ShowtimeId),

    #[error("movie not found or not open for booking: {0}")]
    MovieNotFound(MovieId),

    #[error("cinema not found: {0}")]
    CinemaNotFound(CinemaId),

    #[error("booking not found: {0}")]
    BookingNotFound(String),

    #[error("a booking needs at least one seat")]
    NoSeats,

    #[error("seat ({}, {}) is outside the hall grid", .0.row, .0.col)]
    InvalidSeat(Seat),

    #[error("seat ({}, {}) is already taken", .0.row, .0.col)]
    SeatUnavailable(Seat),

    #[error(transparent)]
    Showtime(#[from] ShowtimeError),

    #[error(transparent)]
    Cinema(#[from] CinemaError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A priced estimate with the authoritative tier already applied, so what a
/// caller displays is what the booking will charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Quote {
    pub effective_tier: TicketTier,
    pub unit_cents: i32,
    pub total_cents: i32,
}

struct EngineState {
    cinemas: CinemaRegistry,
    showtimes: ShowtimeRegistry,
    ledger: BookingLedger,
    scheme: PriceScheme,
}

/// The transaction coordinator. Everything mutable sits behind one lock so
/// seat validation and seat mutation in [`create_booking`] form a single
/// critical section; every mutating call persists its collection before
/// returning.
///
/// [`create_booking`]: BookingEngine::create_booking
pub struct BookingEngine {
    state: Mutex<EngineState>,
    store: Arc<dyn RecordStore>,
    movies: Arc<dyn MovieCatalog>,
    layout: HallLayout,
}

impl BookingEngine {
    /// Hydrate every collection from the store. An empty store yields empty
    /// registries and the default price scheme. Seat occupancy is recomputed
    /// from the booking ledger: the stored grid is treated as a cache, so a
    /// crash between the booking write and the showtime write cannot leave
    /// a torn grid behind.
    pub fn open(
        store: Arc<dyn RecordStore>,
        movies: Arc<dyn MovieCatalog>,
        layout: HallLayout,
    ) -> Result<Self, BookingError> {
        let cinemas = CinemaRegistry::from_records(load_all(store.as_ref(), collections::CINEMAS)?);
        let mut showtimes =
            ShowtimeRegistry::from_records(load_all(store.as_ref(), collections::SHOWTIMES)?);
        let ledger = BookingLedger::from_records(load_all(store.as_ref(), collections::BOOKINGS)?);
        let scheme = load_all::<PriceScheme>(store.as_ref(), collections::PRICE_SCHEME)?
            .into_iter()
            .next()
            .unwrap_or_default();

        rebuild_occupancy(&mut showtimes, &ledger)?;

        Ok(Self {
            state: Mutex::new(EngineState {
                cinemas,
                showtimes,
                ledger,
                scheme,
            }),
            store,
            movies,
            layout,
        })
    }

    /// Book seats for a customer: validate the showtime, movie and cinema,
    /// check every seat is inside the grid and free, price with the
    /// authoritative tier, mint the transaction id, persist the booking,
    /// then flip the seats and persist the schedule.
    pub fn create_booking(
        &self,
        customer_id: &str,
        showtime_id: ShowtimeId,
        seats: &[Seat],
        requested_tier: TicketTier,
    ) -> Result<Booking, BookingError> {
        if seats.is_empty() {
            return Err(BookingError::NoSeats);
        }

        let mut guard = self.lock();

        let showtime = guard
            .showtimes
            .get(showtime_id)
            .ok_or(BookingError::ShowtimeNotFound(showtime_id))?;
        let movie = self
            .movies
            .movie(showtime.movie_id)
            .filter(|m| m.status != MovieStatus::ComingSoon)
            .ok_or(BookingError::MovieNotFound(showtime.movie_id))?;
        let cinema = guard
            .cinemas
            .get(showtime.cinema_id)
            .ok_or(BookingError::CinemaNotFound(showtime.cinema_id))?;

        // No mutation happens until every requested seat has passed.
        let mut requested = HashSet::new();
        for &seat in seats {
            if !showtime.seats.contains(seat) {
                return Err(BookingError::InvalidSeat(seat));
            }
            if !showtime.seats.is_available(seat) || !requested.insert(seat) {
                return Err(BookingError::SeatUnavailable(seat));
            }
        }

        let pricing = PricingEngine::new(guard.scheme.clone());
        let tier = pricing.resolve_tier(showtime.starts_at, requested_tier);
        let total = pricing.total_price(
            movie.blockbuster,
            showtime.show_type,
            cinema.class,
            tier,
            showtime.starts_at,
            seats.len(),
        );

        let created_at = Local::now().naive_local();
        let booking = Booking {
            transaction_id: Booking::mint_transaction_id(&cinema.cineplex_code, created_at),
            customer_id: customer_id.to_owned(),
            cinema_id: cinema.id,
            movie_id: movie.id,
            showtime_id,
            seats: seats.to_vec(),
            ticket_tier: tier,
            total_cents: total,
            created_at,
        };

        guard.ledger.insert(booking.clone());
        if let Err(err) = self.persist_bookings(&guard) {
            guard.ledger.remove(&booking.transaction_id);
            return Err(err.into());
        }

        guard.showtimes.set_seats(showtime_id, seats, true)?;
        self.persist_showtimes(&guard)?;

        info!(
            transaction_id = %booking.transaction_id,
            customer = customer_id,
            seats = seats.len(),
            total_cents = booking.total_cents,
            "booking confirmed"
        );
        Ok(booking)
    }

    /// Cancel a booking and release its seats. The showtime may already be
    /// gone when its cinema was retired; the ledger entry still goes away.
    pub fn cancel_booking(&self, transaction_id: &str) -> Result<Booking, BookingError> {
        let mut guard = self.lock();
        let booking = guard
            .ledger
            .remove(transaction_id)
            .ok_or_else(|| BookingError::BookingNotFound(transaction_id.to_owned()))?;
        if let Err(err) = self.persist_bookings(&guard) {
            guard.ledger.insert(booking);
            return Err(err.into());
        }

        if guard.showtimes.get(booking.showtime_id).is_some() {
            guard
                .showtimes
                .set_seats(booking.showtime_id, &booking.seats, false)?;
            self.persist_showtimes(&guard)?;
        }

        info!(transaction_id, "booking cancelled");
        Ok(booking)
    }

    /// Price estimate for a prospective booking. The returned tier is the
    /// one `create_booking` will charge for this showtime.
    pub fn quote(
        &self,
        showtime_id: ShowtimeId,
        requested_tier: TicketTier,
        seat_count: usize,
    ) -> Result<Quote, BookingError> {
        let guard = self.lock();
        let showtime = guard
            .showtimes
            .get(showtime_id)
            .ok_or(BookingError::ShowtimeNotFound(showtime_id))?;
        let movie = self
            .movies
            .movie(showtime.movie_id)
            .filter(|m| m.status != MovieStatus::ComingSoon)
            .ok_or(BookingError::MovieNotFound(showtime.movie_id))?;
        let cinema = guard
            .cinemas
            .get(showtime.cinema_id)
            .ok_or(BookingError::CinemaNotFound(showtime.cinema_id))?;

        let pricing = PricingEngine::new(guard.scheme.clone());
        let effective_tier = pricing.resolve_tier(showtime.starts_at, requested_tier);
        let unit_cents = pricing.unit_price(
            movie.blockbuster,
            showtime.show_type,
            cinema.class,
            effective_tier,
            showtime.starts_at,
        );
        let total_cents = pricing.total_price(
            movie.blockbuster,
            showtime.show_type,
            cinema.class,
            effective_tier,
            showtime.starts_at,
            seat_count,
        );
        Ok(Quote {
            effective_tier,
            unit_cents,
            total_cents,
        })
    }

    pub fn add_cinema(
        &self,
        class: CinemaClass,
        cineplex_code: CineplexCode,
    ) -> Result<CinemaId, BookingError> {
        let mut guard = self.lock();
        let id = guard.cinemas.add(class, cineplex_code);
        self.persist_cinemas(&guard)?;
        info!(cinema_id = id, "cinema added");
        Ok(id)
    }

    /// Retire a cinema and its showtimes; refused while upcoming shows in it
    /// still have bookings.
    pub fn remove_cinema(&self, id: CinemaId) -> Result<Cinema, BookingError> {
        let now = Local::now().naive_local();
        let mut guard = self.lock();
        let state = &mut *guard;
        let removed = state
            .cinemas
            .remove(id, &mut state.showtimes, &state.ledger, now)?;
        self.persist_cinemas(&guard)?;
        self.persist_showtimes(&guard)?;
        info!(cinema_id = id, "cinema removed");
        Ok(removed)
    }

    pub fn add_showtime(
        &self,
        cinema_id: CinemaId,
        movie_id: MovieId,
        starts_at: NaiveDateTime,
        show_type: ShowType,
    ) -> Result<ShowtimeId, BookingError> {
        let mut guard = self.lock();
        if guard.cinemas.get(cinema_id).is_none() {
            return Err(BookingError::CinemaNotFound(cinema_id));
        }
        let id = guard
            .showtimes
            .add(cinema_id, movie_id, starts_at, show_type, self.layout.grid())?;
        self.persist_showtimes(&guard)?;
        info!(showtime = %id, cinema_id, "showtime scheduled");
        Ok(id)
    }

    pub fn update_showtime(
        &self,
        id: ShowtimeId,
        changes: ShowtimeUpdate,
    ) -> Result<(), BookingError> {
        let mut guard = self.lock();
        if let Some(cinema_id) = changes.cinema_id {
            if guard.cinemas.get(cinema_id).is_none() {
                return Err(BookingError::CinemaNotFound(cinema_id));
            }
        }
        let state = &mut *guard;
        state.showtimes.update(id, changes, &state.ledger)?;
        self.persist_showtimes(&guard)?;
        info!(showtime = %id, "showtime updated");
        Ok(())
    }

    pub fn remove_showtime(&self, id: ShowtimeId) -> Result<Showtime, BookingError> {
        let mut guard = self.lock();
        let state = &mut *guard;
        let removed = state.showtimes.remove(id, &state.ledger)?;
        self.persist_showtimes(&guard)?;
        info!(showtime = %id, "showtime removed");
        Ok(removed)
    }

    pub fn cinema(&self, id: CinemaId) -> Option<Cinema> {
        self.lock().cinemas.get(id)
    }

    pub fn cinemas(&self) -> Vec<Cinema> {
        self.lock().cinemas.list()
    }

    pub fn showtime(&self, id: ShowtimeId) -> Option<Showtime> {
        self.lock().showtimes.get(id)
    }

    pub fn showtimes_by_movie(&self, movie_id: MovieId) -> Vec<Showtime> {
        self.lock().showtimes.by_movie(movie_id)
    }

    pub fn showtimes_by_cinema(&self, cinema_id: CinemaId) -> Vec<Showtime> {
        self.lock().showtimes.by_cinema(cinema_id)
    }

    pub fn booking(&self, transaction_id: &str) -> Option<Booking> {
        self.lock().ledger.get(transaction_id)
    }

    pub fn bookings_for_customer(&self, customer_id: &str) -> Vec<Booking> {
        self.lock().ledger.by_customer(customer_id)
    }

    /// Copy of the current scheme; edits to it do not leak back.
    pub fn price_scheme(&self) -> PriceScheme {
        self.lock().scheme.clone()
    }

    /// Replace the whole pricing configuration.
    pub fn update_price_scheme(&self, scheme: PriceScheme) -> Result<(), BookingError> {
        let mut guard = self.lock();
        guard.scheme = scheme;
        self.persist_scheme(&guard)?;
        info!("price scheme updated");
        Ok(())
    }

    /// Mark a date as a holiday; returns whether it was newly added.
    pub fn add_holiday(&self, date: NaiveDate) -> Result<bool, BookingError> {
        let mut guard = self.lock();
        let added = guard.scheme.add_holiday(date);
        if added {
            self.persist_scheme(&guard)?;
            info!(%date, "holiday added");
        }
        Ok(added)
    }

    /// Unmark a holiday; returns whether it was present.
    pub fn remove_holiday(&self, date: NaiveDate) -> Result<bool, BookingError> {
        let mut guard = self.lock();
        let removed = guard.scheme.remove_holiday(date);
        if removed {
            self.persist_scheme(&guard)?;
            info!(%date, "holiday removed");
        }
        Ok(removed)
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist_cinemas(&self, state: &EngineState) -> Result<(), StoreError> {
        save_all(
            self.store.as_ref(),
            collections::CINEMAS,
            state.cinemas.records(),
        )
    }

    fn persist_showtimes(&self, state: &EngineState) -> Result<(), StoreError> {
        save_all(
            self.store.as_ref(),
            collections::SHOWTIMES,
            state.showtimes.records(),
        )
    }

    fn persist_bookings(&self, state: &EngineState) -> Result<(), StoreError> {
        save_all(
            self.store.as_ref(),
            collections::BOOKINGS,
            state.ledger.records(),
        )
    }

    fn persist_scheme(&self, state: &EngineState) -> Result<(), StoreError> {
        save_all(
            self.store.as_ref(),
            collections::PRICE_SCHEME,
            std::slice::from_ref(&state.scheme),
        )
    }
}

/// Reset every grid and replay the ledger over it. Bookings that reference
/// missing showtimes or out-of-grid seats are reported and skipped rather
/// than rejected: they are history the staff can clean up.
fn rebuild_occupancy(
    showtimes: &mut ShowtimeRegistry,
    ledger: &BookingLedger,
) -> Result<(), ShowtimeError> {
    let ids: Vec<ShowtimeId> = showtimes.records().iter().map(|s| s.id).collect();
    for &id in &ids {
        showtimes.reset_seats(id)?;
        let Some(showtime) = showtimes.get(id) else {
            continue;
        };
        for booking in ledger.by_showtime(id) {
            let (seats, outside): (Vec<Seat>, Vec<Seat>) = booking
                .seats
                .iter()
                .copied()
                .partition(|&s| showtime.seats.contains(s));
            if !outside.is_empty() {
                warn!(
                    transaction_id = %booking.transaction_id,
                    "booking references seats outside the hall grid"
                );
            }
            showtimes.set_seats(id, &seats, true)?;
        }
    }
    for booking in ledger.records() {
        if showtimes.get(booking.showtime_id).is_none() {
            warn!(
                transaction_id = %booking.transaction_id,
                "booking references a missing showtime"
            );
        }
    }
    Ok(())
}
