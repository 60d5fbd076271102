//! The fixed movie catalog.
//!
//! Every generated dataset starts from the same 15 movies; only the user
//! ratings are random.

use crate::types::{Genre, Movie};

/// Build the catalog, in catalog order
pub fn movie_catalog() -> Vec<Movie> {
    vec![
        Movie::new(1, "The Matrix", Genre::SciFi, 4.5, 1999, &["cyberpunk", "action", "philosophy"]),
        Movie::new(2, "Inception", Genre::SciFi, 4.7, 2010, &["mind-bending", "action", "dreams"]),
        Movie::new(3, "The Shawshank Redemption", Genre::Drama, 4.9, 1994, &["prison", "hope", "friendship"]),
        Movie::new(4, "Pulp Fiction", Genre::Thriller, 4.6, 1994, &["crime", "nonlinear", "cult"]),
        Movie::new(5, "The Dark Knight", Genre::Action, 4.8, 2008, &["superhero", "crime", "dark"]),
        Movie::new(6, "Forrest Gump", Genre::Drama, 4.7, 1994, &["inspiring", "history", "life"]),
        Movie::new(7, "The Godfather", Genre::Drama, 4.9, 1972, &["mafia", "family", "crime"]),
        Movie::new(8, "Fight Club", Genre::Thriller, 4.6, 1999, &["psychological", "rebellion", "twist"]),
        Movie::new(9, "Interstellar", Genre::SciFi, 4.6, 2014, &["space", "time", "emotional"]),
        Movie::new(10, "The Hangover", Genre::Comedy, 4.2, 2009, &["party", "friendship", "vegas"]),
        Movie::new(11, "Titanic", Genre::Romance, 4.3, 1997, &["love", "tragedy", "historic"]),
        Movie::new(12, "Goodfellas", Genre::Thriller, 4.7, 1990, &["mafia", "crime", "biography"]),
        Movie::new(13, "Toy Story", Genre::Comedy, 4.5, 1995, &["animation", "family", "adventure"]),
        Movie::new(14, "The Silence of the Lambs", Genre::Thriller, 4.7, 1991, &["serial-killer", "psychological", "crime"]),
        Movie::new(15, "Saving Private Ryan", Genre::Action, 4.7, 1998, &["war", "historic", "heroic"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_catalog_ids_are_unique_and_ordered() {
        let catalog = movie_catalog();
        let ids: Vec<_> = catalog.iter().map(|m| m.id).collect();

        assert_eq!(ids, (1..=15).collect::<Vec<_>>());
        assert_eq!(ids.iter().collect::<HashSet<_>>().len(), 15);
    }

    #[test]
    fn test_catalog_ratings_in_range() {
        for movie in movie_catalog() {
            assert!((0.0..=5.0).contains(&movie.base_rating), "{}", movie.title);
            assert_eq!(movie.tags.len(), 3);
        }
    }
}
