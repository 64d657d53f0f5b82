use rand::seq::SliceRandom;

use crate::core::errors::{MovieError, Result};
use crate::domain::Movie;

/// Aggregate rating figures over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub average: f64,
    pub median: f64,
    pub best: Vec<Movie>,
    pub worst: Vec<Movie>,
}

pub struct StatsService;

impl StatsService {
    /// Computes average, median, and the records tied for best and worst
    /// rating. Ties report every tied record, not an arbitrary winner. The
    /// median of an even-sized collection is the mean of the two middle
    /// values.
    pub fn rating_stats(movies: &[Movie]) -> Result<RatingStats> {
        if movies.is_empty() {
            return Err(MovieError::EmptyCollection);
        }

        let mut ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
        ratings.sort_by(f64::total_cmp);

        let average = ratings.iter().sum::<f64>() / ratings.len() as f64;
        let mid = ratings.len() / 2;
        let median = if ratings.len() % 2 == 1 {
            ratings[mid]
        } else {
            (ratings[mid - 1] + ratings[mid]) / 2.0
        };

        let min = ratings[0];
        let max = ratings[ratings.len() - 1];
        let best = movies.iter().filter(|m| m.rating == max).cloned().collect();
        let worst = movies.iter().filter(|m| m.rating == min).cloned().collect();

        Ok(RatingStats {
            average,
            median,
            best,
            worst,
        })
    }

    /// Uniformly selects one record from the collection.
    pub fn random_pick(movies: &[Movie]) -> Result<&Movie> {
        movies
            .choose(&mut rand::thread_rng())
            .ok_or(MovieError::EmptyCollection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection() -> Vec<Movie> {
        vec![
            Movie::new("Titanic", 1997, 9.0, None),
            Movie::new("Inception", 2010, 8.8, None),
            Movie::new("Matrix", 1999, 8.7, None),
        ]
    }

    #[test]
    fn odd_sized_collection_uses_middle_rating_as_median() {
        let stats = StatsService::rating_stats(&collection()).unwrap();
        assert_eq!(stats.median, 8.8);
    }

    #[test]
    fn even_sized_collection_averages_the_two_middle_ratings() {
        let mut movies = collection();
        movies.push(Movie::new("Godfather", 1972, 9.2, None));
        let stats = StatsService::rating_stats(&movies).unwrap();
        assert_eq!(stats.median, (8.8 + 9.0) / 2.0);
    }

    #[test]
    fn tied_ratings_report_every_record() {
        let movies = vec![
            Movie::new("A", 2000, 9.0, None),
            Movie::new("B", 2001, 9.0, None),
            Movie::new("C", 2002, 5.0, None),
        ];
        let stats = StatsService::rating_stats(&movies).unwrap();
        let best: Vec<&str> = stats.best.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(best, vec!["A", "B"]);
        assert_eq!(stats.worst.len(), 1);
    }

    #[test]
    fn empty_collection_has_no_stats() {
        let err = StatsService::rating_stats(&[]).unwrap_err();
        assert!(matches!(err, MovieError::EmptyCollection));
    }

    #[test]
    fn random_pick_from_single_element_is_that_element() {
        let movies = vec![Movie::new("Heat", 1995, 8.3, None)];
        assert_eq!(StatsService::random_pick(&movies).unwrap().title, "Heat");
    }

    #[test]
    fn random_pick_from_empty_collection_fails() {
        let err = StatsService::random_pick(&[]).unwrap_err();
        assert!(matches!(err, MovieError::EmptyCollection));
    }
}
