pub mod movie;

pub use movie::{
    max_year, validate_rating, validate_title, validate_year, Movie, MAX_RATING, MIN_RATING,
    MIN_YEAR,
};
