pub mod query_service;
pub mod stats_service;

pub use query_service::{FilterCriteria, QueryService, SearchOutcome, SortOrder};
pub use stats_service::{RatingStats, StatsService};
