pub mod csv_backend;
pub mod json_backend;

use crate::core::errors::MovieError;
use crate::domain::Movie;

pub type Result<T> = std::result::Result<T, MovieError>;

/// Uniform CRUD contract shared by every storage format. Each mutation loads
/// the full collection, applies its change, and rewrites the backing file;
/// there is no incremental persistence. An interruption mid-write can leave
/// the file malformed, which is an accepted limitation of this tool.
pub trait MovieStorage {
    /// Reads the full collection. A missing backing file is an empty
    /// collection; malformed content is a hard error, never silently dropped
    /// data.
    fn list_movies(&self) -> Result<Vec<Movie>>;

    /// Inserts the movie, overwriting any record with the same title.
    fn add_movie(&self, movie: &Movie) -> Result<()>;

    /// Removes the record with the exact title. Returns whether anything was
    /// removed; a missing title is not an error.
    fn delete_movie(&self, title: &str) -> Result<bool>;

    /// Replaces only the rating of the matching record.
    fn update_movie(&self, title: &str, rating: f64) -> Result<()>;
}

pub use csv_backend::CsvStorage;
pub use json_backend::JsonStorage;
