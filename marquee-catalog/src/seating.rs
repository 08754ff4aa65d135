use marquee_shared::Seat;
use serde::{Deserialize, Serialize};

/// Canonical hall dimensions for newly scheduled showtimes. One default for
/// the whole system, overridable through configuration.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HallLayout {
    pub rows: u32,
    pub cols: u32,
}

impl Default for HallLayout {
    fn default() -> Self {
        Self { rows: 5, cols: 8 }
    }
}

impl HallLayout {
    pub fn new(rows: u32, cols: u32) -> Self {
        Self { rows, cols }
    }

    /// Fresh fully-available grid of these dimensions.
    pub fn grid(&self) -> SeatGrid {
        SeatGrid::new(self.rows, self.cols)
    }
}

/// Per-showtime seat availability matrix. `true` means the seat is free.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatGrid {
    rows: Vec<Vec<bool>>,
}

impl SeatGrid {
    /// New grid with every seat available.
    pub fn new(rows: u32, cols: u32) -> Self {
        Self {
            rows: vec![vec![true; cols as usize]; rows as usize],
        }
    }

    pub fn row_count(&self) -> u32 {
        self.rows.len() as u32
    }

    pub fn col_count(&self) -> u32 {
        self.rows.first().map(|r| r.len() as u32).unwrap_or(0)
    }

    /// Whether the coordinate falls inside the grid.
    pub fn contains(&self, seat: Seat) -> bool {
        (seat.row as usize) < self.rows.len() && (seat.col as usize) < self.col_count() as usize
    }

    /// Availability of one seat. The coordinate must be in bounds.
    pub fn is_available(&self, seat: Seat) -> bool {
        self.rows[seat.row as usize][seat.col as usize]
    }

    /// Unconditional single-seat write. Callers validate bounds first; an
    /// out-of-range coordinate is a caller bug.
    pub fn assign(&mut self, seat: Seat, make_unavailable: bool) {
        debug_assert!(self.contains(seat), "seat {seat:?} outside grid");
        self.rows[seat.row as usize][seat.col as usize] = !make_unavailable;
    }

    /// Applies `assign` to every coordinate. No rollback: the caller must
    /// have established that every write is wanted before calling.
    pub fn bulk_assign(&mut self, seats: &[Seat], make_unavailable: bool) {
        for &seat in seats {
            self.assign(seat, make_unavailable);
        }
    }

    /// Every seat back to available, dimensions preserved.
    pub fn reset(&mut self) {
        for row in &mut self.rows {
            row.fill(true);
        }
    }

    pub fn count_available(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.iter().filter(|&&free| free).count())
            .sum()
    }

    pub fn count_total(&self) -> usize {
        self.rows.iter().map(|row| row.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_fully_available() {
        let grid = SeatGrid::new(5, 8);
        assert_eq!(grid.count_total(), 40);
        assert_eq!(grid.count_available(), 40);
    }

    #[test]
    fn assign_flips_exactly_one_seat() {
        let mut grid = SeatGrid::new(3, 8);
        grid.assign(Seat::new(1, 4), true);
        assert!(!grid.is_available(Seat::new(1, 4)));
        assert_eq!(grid.count_available(), 23);

        grid.assign(Seat::new(1, 4), false);
        assert!(grid.is_available(Seat::new(1, 4)));
        assert_eq!(grid.count_available(), 24);
    }

    #[test]
    fn bulk_assign_conserves_seat_count() {
        let mut grid = SeatGrid::new(5, 8);
        let seats = [Seat::new(0, 0), Seat::new(2, 3), Seat::new(4, 7)];
        grid.bulk_assign(&seats, true);
        assert_eq!(grid.count_available() + seats.len(), grid.count_total());

        grid.bulk_assign(&seats, false);
        assert_eq!(grid.count_available(), grid.count_total());
    }

    #[test]
    fn contains_checks_both_axes() {
        let grid = SeatGrid::new(5, 8);
        assert!(grid.contains(Seat::new(4, 7)));
        assert!(!grid.contains(Seat::new(5, 0)));
        assert!(!grid.contains(Seat::new(0, 8)));
    }

    #[test]
    fn reset_restores_full_availability() {
        let mut grid = SeatGrid::new(2, 2);
        grid.bulk_assign(&[Seat::new(0, 0), Seat::new(1, 1)], true);
        grid.reset();
        assert_eq!(grid.count_available(), 4);
    }
}
