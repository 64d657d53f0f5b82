use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::core::errors::{MovieError, Result};

/// Oldest entry on IMDb: "Man Walking Around the Corner" (1887).
pub const MIN_YEAR: i32 = 1887;

pub const MIN_RATING: f64 = 0.0;
pub const MAX_RATING: f64 = 10.0;

/// One movie's stored attributes. The title is the identity key within a
/// collection; identity matching is case-sensitive and exact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    pub title: String,
    pub year: i32,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub poster: Option<String>,
}

impl Movie {
    pub fn new(title: impl Into<String>, year: i32, rating: f64, poster: Option<String>) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            poster,
        }
    }

    /// Single-line presentation shared by list, sort, and filter output.
    pub fn display_line(&self) -> String {
        format!("{} ({}): {:.1}", self.title, self.year, self.rating)
    }
}

/// Upper bound for accepted years; one past the current year covers announced
/// releases.
pub fn max_year() -> i32 {
    Utc::now().year() + 1
}

pub fn validate_title(raw: &str) -> Result<String> {
    let title = raw.trim();
    if title.is_empty() {
        return Err(MovieError::InvalidInput(
            "movie title must not be empty".into(),
        ));
    }
    Ok(title.to_string())
}

pub fn validate_year(raw: &str) -> Result<i32> {
    let year: i32 = raw.trim().parse().map_err(|_| {
        MovieError::InvalidInput(format!("`{}` is not a valid integer year", raw.trim()))
    })?;
    let max = max_year();
    if !(MIN_YEAR..=max).contains(&year) {
        return Err(MovieError::InvalidInput(format!(
            "year must be between {MIN_YEAR} and {max}"
        )));
    }
    Ok(year)
}

pub fn validate_rating(raw: &str) -> Result<f64> {
    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| MovieError::InvalidInput(format!("`{}` is not a valid rating", raw.trim())))?;
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(MovieError::InvalidInput(format!(
            "rating must be between {MIN_RATING} and {MAX_RATING}"
        )));
    }
    Ok(rating)
}
