use std::cmp::Reverse;

use strsim::normalized_levenshtein;

use crate::domain::Movie;

/// Similarity floor below which fuzzy candidates are discarded.
const FUZZY_THRESHOLD: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Result of a title search: direct substring hits, close fuzzy candidates
/// when nothing matched directly, or nothing at all.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Matches(Vec<Movie>),
    Suggestions(Vec<Movie>),
    NoMatch,
}

/// Rating floor and optional inclusive year window. Absent bounds mean no
/// constraint on that dimension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FilterCriteria {
    pub min_rating: Option<f64>,
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl FilterCriteria {
    fn accepts(&self, movie: &Movie) -> bool {
        if let Some(min) = self.min_rating {
            if movie.rating < min {
                return false;
            }
        }
        if let Some(start) = self.start_year {
            if movie.year < start {
                return false;
            }
        }
        if let Some(end) = self.end_year {
            if movie.year > end {
                return false;
            }
        }
        true
    }
}

pub struct QueryService;

impl QueryService {
    /// Case-insensitive substring search over titles, falling back to fuzzy
    /// matching when nothing matches directly. The fallback is deterministic:
    /// candidates above the similarity floor, best score first, ties broken
    /// by title.
    pub fn search(movies: &[Movie], query: &str) -> SearchOutcome {
        let needle = query.trim().to_lowercase();
        let matches: Vec<Movie> = movies
            .iter()
            .filter(|m| m.title.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        if !matches.is_empty() {
            return SearchOutcome::Matches(matches);
        }

        let mut scored: Vec<(f64, &Movie)> = movies
            .iter()
            .filter_map(|m| {
                let score = title_similarity(&m.title, &needle);
                (score > FUZZY_THRESHOLD).then_some((score, m))
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.title.cmp(&b.1.title)));

        if scored.is_empty() {
            SearchOutcome::NoMatch
        } else {
            SearchOutcome::Suggestions(scored.into_iter().map(|(_, m)| m.clone()).collect())
        }
    }

    /// Descending by rating; stable, so ties keep collection order.
    pub fn sort_by_rating(movies: &[Movie]) -> Vec<Movie> {
        let mut sorted = movies.to_vec();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        sorted
    }

    /// By release year in the requested order; stable, so ties keep
    /// collection order.
    pub fn sort_by_year(movies: &[Movie], order: SortOrder) -> Vec<Movie> {
        let mut sorted = movies.to_vec();
        match order {
            SortOrder::Ascending => sorted.sort_by_key(|m| m.year),
            SortOrder::Descending => sorted.sort_by_key(|m| Reverse(m.year)),
        }
        sorted
    }

    pub fn filter(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
        movies
            .iter()
            .filter(|m| criteria.accepts(m))
            .cloned()
            .collect()
    }
}

/// Best similarity between the query and either the whole lowercased title or
/// any single word of it. Matching per word lets "incepton" find "Inception"
/// even inside longer titles.
fn title_similarity(title: &str, needle: &str) -> f64 {
    let lowered = title.to_lowercase();
    let mut best = normalized_levenshtein(needle, &lowered);
    for word in lowered.split_whitespace() {
        best = best.max(normalized_levenshtein(needle, word));
    }
    best
}
