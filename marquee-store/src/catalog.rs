use marquee_core::{MovieCatalog, MovieSummary};
use marquee_shared::MovieId;
use std::collections::HashMap;

/// Movie catalog backed by a plain map. Used by tests and by embedders that
/// sync titles from their own catalog source.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    movies: HashMap<MovieId, MovieSummary>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: impl IntoIterator<Item = MovieSummary>) -> Self {
        Self {
            movies: movies.into_iter().map(|m| (m.id, m)).collect(),
        }
    }

    pub fn insert(&mut self, movie: MovieSummary) {
        self.movies.insert(movie.id, movie);
    }
}

impl MovieCatalog for InMemoryCatalog {
    fn movie(&self, id: MovieId) -> Option<MovieSummary> {
        self.movies.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marquee_shared::MovieStatus;
    use uuid::Uuid;

    #[test]
    fn looks_up_by_id() {
        let movie = MovieSummary {
            id: Uuid::new_v4(),
            title: "Inferno Run".to_owned(),
            blockbuster: true,
            status: MovieStatus::NowShowing,
        };
        let catalog = InMemoryCatalog::with_movies([movie.clone()]);

        assert_eq!(catalog.movie(movie.id), Some(movie));
        assert_eq!(catalog.movie(Uuid::new_v4()), None);
    }
}
