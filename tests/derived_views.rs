use movie_core::core::errors::MovieError;
use movie_core::core::services::{
    FilterCriteria, QueryService, SearchOutcome, SortOrder, StatsService,
};
use movie_core::domain::Movie;

fn collection() -> Vec<Movie> {
    vec![
        Movie::new("Titanic", 1997, 9.0, None),
        Movie::new("Inception", 2010, 8.8, None),
        Movie::new("Matrix", 1999, 8.7, None),
        Movie::new("Godfather", 1972, 9.2, None),
        Movie::new("Shawshank", 1994, 9.3, None),
    ]
}

fn titles(movies: &[Movie]) -> Vec<&str> {
    movies.iter().map(|m| m.title.as_str()).collect()
}

#[test]
fn stats_match_the_known_collection() {
    let stats = StatsService::rating_stats(&collection()).unwrap();
    assert!((stats.average - 9.0).abs() < 1e-9);
    assert_eq!(stats.median, 9.0);
    assert_eq!(titles(&stats.best), vec!["Shawshank"]);
    assert_eq!(stats.best[0].rating, 9.3);
    assert_eq!(titles(&stats.worst), vec!["Matrix"]);
    assert_eq!(stats.worst[0].rating, 8.7);
}

#[test]
fn average_stays_between_min_and_max_rating() {
    let movies = collection();
    let stats = StatsService::rating_stats(&movies).unwrap();
    let min = movies.iter().map(|m| m.rating).fold(f64::MAX, f64::min);
    let max = movies.iter().map(|m| m.rating).fold(f64::MIN, f64::max);
    assert!(stats.average >= min);
    assert!(stats.average <= max);
}

#[test]
fn filter_by_minimum_rating_keeps_the_expected_subset() {
    let criteria = FilterCriteria {
        min_rating: Some(9.0),
        ..Default::default()
    };
    let filtered = QueryService::filter(&collection(), &criteria);
    assert_eq!(titles(&filtered), vec!["Titanic", "Godfather", "Shawshank"]);
}

#[test]
fn filter_with_year_window_applies_both_bounds_inclusively() {
    let criteria = FilterCriteria {
        min_rating: Some(8.0),
        start_year: Some(1994),
        end_year: Some(1999),
    };
    let filtered = QueryService::filter(&collection(), &criteria);
    assert_eq!(titles(&filtered), vec!["Titanic", "Matrix", "Shawshank"]);
}

#[test]
fn filter_without_criteria_returns_everything() {
    let filtered = QueryService::filter(&collection(), &FilterCriteria::default());
    assert_eq!(filtered.len(), 5);
}

#[test]
fn filter_on_empty_collection_returns_empty() {
    let criteria = FilterCriteria {
        min_rating: Some(5.0),
        ..Default::default()
    };
    assert!(QueryService::filter(&[], &criteria).is_empty());
}

#[test]
fn sort_by_year_ascending_matches_release_order() {
    let sorted = QueryService::sort_by_year(&collection(), SortOrder::Ascending);
    assert_eq!(
        titles(&sorted),
        vec!["Godfather", "Shawshank", "Titanic", "Matrix", "Inception"]
    );
}

#[test]
fn sort_by_year_descending_is_the_reverse() {
    let sorted = QueryService::sort_by_year(&collection(), SortOrder::Descending);
    assert_eq!(
        titles(&sorted),
        vec!["Inception", "Matrix", "Titanic", "Shawshank", "Godfather"]
    );
}

#[test]
fn sort_by_rating_is_non_increasing_for_all_inputs() {
    for movies in [Vec::new(), collection()[..1].to_vec(), collection()] {
        let sorted = QueryService::sort_by_rating(&movies);
        assert_eq!(sorted.len(), movies.len());
        for pair in sorted.windows(2) {
            assert!(pair[0].rating >= pair[1].rating);
        }
    }
}

#[test]
fn sort_by_rating_keeps_input_order_among_ties() {
    let movies = vec![
        Movie::new("First", 2000, 8.0, None),
        Movie::new("Second", 2001, 8.0, None),
        Movie::new("Third", 2002, 9.0, None),
    ];
    let sorted = QueryService::sort_by_rating(&movies);
    assert_eq!(titles(&sorted), vec!["Third", "First", "Second"]);
}

#[test]
fn substring_search_is_case_insensitive() {
    match QueryService::search(&collection(), "MAT") {
        SearchOutcome::Matches(found) => assert_eq!(titles(&found), vec!["Matrix"]),
        other => panic!("expected direct matches, got {other:?}"),
    }
}

#[test]
fn fuzzy_fallback_finds_the_closest_title() {
    match QueryService::search(&collection(), "incepton") {
        SearchOutcome::Suggestions(close) => {
            assert_eq!(close[0].title, "Inception");
        }
        other => panic!("expected fuzzy suggestions, got {other:?}"),
    }
}

#[test]
fn fuzzy_fallback_is_deterministic() {
    let first = QueryService::search(&collection(), "incepton");
    let second = QueryService::search(&collection(), "incepton");
    assert_eq!(first, second);
}

#[test]
fn hopeless_queries_report_no_match() {
    assert_eq!(
        QueryService::search(&collection(), "zzzzzzzz"),
        SearchOutcome::NoMatch
    );
}

#[test]
fn random_pick_on_empty_collection_fails() {
    assert!(matches!(
        StatsService::random_pick(&[]),
        Err(MovieError::EmptyCollection)
    ));
}

#[test]
fn random_pick_on_singleton_returns_that_movie() {
    let movies = vec![Movie::new("Heat", 1995, 8.3, None)];
    assert_eq!(StatsService::random_pick(&movies).unwrap().title, "Heat");
}
