use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{core::errors::MovieError, domain::Movie};

use super::{MovieStorage, Result};

/// One row of the tabular format, header `title,year,rating,poster`. An
/// absent poster is stored as the empty string.
#[derive(Debug, Serialize, Deserialize)]
struct MovieRow {
    title: String,
    year: i32,
    rating: f64,
    #[serde(default)]
    poster: String,
}

impl From<&Movie> for MovieRow {
    fn from(movie: &Movie) -> Self {
        Self {
            title: movie.title.clone(),
            year: movie.year,
            rating: movie.rating,
            poster: movie.poster.clone().unwrap_or_default(),
        }
    }
}

impl From<MovieRow> for Movie {
    fn from(row: MovieRow) -> Self {
        let poster = (!row.poster.is_empty()).then_some(row.poster);
        Movie::new(row.title, row.year, row.rating, poster)
    }
}

/// CSV-backed storage: one row per record, file row order preserved, which
/// keeps sort tie-breaks deterministic.
#[derive(Debug, Clone)]
pub struct CsvStorage {
    path: PathBuf,
}

impl CsvStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<Vec<Movie>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }
        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut movies = Vec::new();
        for row in reader.deserialize::<MovieRow>() {
            let row = row.map_err(|err| {
                MovieError::StorageError(format!(
                    "malformed movie file `{}`: {}",
                    self.path.display(),
                    err
                ))
            })?;
            movies.push(Movie::from(row));
        }
        Ok(movies)
    }

    fn write_all(&self, movies: &[Movie]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = csv::Writer::from_path(&self.path)?;
        for movie in movies {
            writer.serialize(MovieRow::from(movie))?;
        }
        writer.flush().map_err(MovieError::from)?;
        Ok(())
    }
}

impl MovieStorage for CsvStorage {
    fn list_movies(&self) -> Result<Vec<Movie>> {
        self.read_all()
    }

    fn add_movie(&self, movie: &Movie) -> Result<()> {
        let mut movies = self.read_all()?;
        match movies.iter_mut().find(|m| m.title == movie.title) {
            Some(existing) => *existing = movie.clone(),
            None => movies.push(movie.clone()),
        }
        self.write_all(&movies)
    }

    fn delete_movie(&self, title: &str) -> Result<bool> {
        let mut movies = self.read_all()?;
        let before = movies.len();
        movies.retain(|m| m.title != title);
        let removed = movies.len() != before;
        if removed {
            self.write_all(&movies)?;
        }
        Ok(removed)
    }

    fn update_movie(&self, title: &str, rating: f64) -> Result<()> {
        let mut movies = self.read_all()?;
        match movies.iter_mut().find(|m| m.title == title) {
            Some(movie) => {
                movie.rating = rating;
                self.write_all(&movies)
            }
            None => Err(MovieError::MovieNotFound(title.to_string())),
        }
    }
}
