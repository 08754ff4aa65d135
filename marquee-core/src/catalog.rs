use marquee_shared::{MovieId, MovieStatus};
use serde::{Deserialize, Serialize};

/// The slice of movie metadata the booking core needs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: MovieId,
    pub title: String,
    pub blockbuster: bool,
    pub status: MovieStatus,
}

/// Read-only view of the movie catalog collaborator.
pub trait MovieCatalog: Send + Sync {
    /// Look up a movie by id. `None` when the catalog does not know it.
    fn movie(&self, id: MovieId) -> Option<MovieSummary>;
}
