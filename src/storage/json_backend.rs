use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

use crate::{core::errors::MovieError, domain::Movie};

use super::{MovieStorage, Result};

/// Stored value for one title inside the JSON document. The title itself is
/// the map key, matching the historical file format.
#[derive(Debug, Serialize, Deserialize)]
struct StoredMovie {
    year: i32,
    rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    poster: Option<String>,
}

/// JSON-backed storage: one document holding a map of title -> record.
/// Collections listed from this backend come out in title order (BTreeMap),
/// which keeps sort tie-breaks deterministic.
#[derive(Debug, Clone)]
pub struct JsonStorage {
    path: PathBuf,
}

impl JsonStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, StoredMovie>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            MovieError::StorageError(format!(
                "malformed movie file `{}`: {}",
                self.path.display(),
                err
            ))
        })
    }

    fn write_map(&self, movies: &BTreeMap<String, StoredMovie>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(movies)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

impl MovieStorage for JsonStorage {
    fn list_movies(&self) -> Result<Vec<Movie>> {
        let map = self.read_map()?;
        Ok(map
            .into_iter()
            .map(|(title, stored)| Movie::new(title, stored.year, stored.rating, stored.poster))
            .collect())
    }

    fn add_movie(&self, movie: &Movie) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(
            movie.title.clone(),
            StoredMovie {
                year: movie.year,
                rating: movie.rating,
                poster: movie.poster.clone(),
            },
        );
        self.write_map(&map)
    }

    fn delete_movie(&self, title: &str) -> Result<bool> {
        let mut map = self.read_map()?;
        let removed = map.remove(title).is_some();
        if removed {
            self.write_map(&map)?;
        }
        Ok(removed)
    }

    fn update_movie(&self, title: &str, rating: f64) -> Result<()> {
        let mut map = self.read_map()?;
        match map.get_mut(title) {
            Some(stored) => {
                stored.rating = rating;
                self.write_map(&map)
            }
            None => Err(MovieError::MovieNotFound(title.to_string())),
        }
    }
}
