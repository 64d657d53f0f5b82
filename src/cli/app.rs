use std::io::{self, BufRead};
use std::path::Path;

use crate::{
    config::AppConfig,
    core::{
        errors::{CliError, MovieError, Result},
        services::{FilterCriteria, QueryService, SearchOutcome, SortOrder, StatsService},
    },
    domain::{self, Movie},
    enrichment::OmdbClient,
    report::{histogram, website},
    storage::MovieStorage,
};

use super::output;

const HISTOGRAM_FILE: &str = "rating_histogram.svg";
const WEBSITE_FILE: &str = "index.html";

const MENU: &str = "\nMenu:
0. Exit
1. List movies
2. Add movie
3. Delete movie
4. Update movie rating
5. Stats
6. Random movie
7. Search movie
8. Movies sorted by rating
9. Movies sorted by year
10. Filter movies
11. Create rating histogram
12. Generate website";

/// Entry point used by the binary: wires the configured storage backend and
/// the optional enrichment client, then runs the menu loop over stdin.
pub fn run_cli(config: &AppConfig) -> std::result::Result<(), CliError> {
    let enrichment = match &config.omdb_api_key {
        Some(key) => Some(OmdbClient::new(key.clone())?),
        None => {
            output::warning("OMDB_API_KEY is not set; movie details must be entered manually.");
            None
        }
    };
    output::info(format!(
        "Using {} storage at {}",
        config.backend.label(),
        config.storage_path.display()
    ));
    tracing::info!(
        backend = config.backend.label(),
        path = %config.storage_path.display(),
        "storage configured"
    );

    let stdin = io::stdin();
    let mut app = MovieApp::new(config.open_storage(), enrichment, stdin.lock());
    app.run()
}

/// Drives the numbered menu over one storage backend, which it owns for the
/// process lifetime. Generic over its input so tests can feed scripted lines.
pub struct MovieApp<R> {
    storage: Box<dyn MovieStorage>,
    enrichment: Option<OmdbClient>,
    input: R,
}

impl<R: BufRead> MovieApp<R> {
    pub fn new(storage: Box<dyn MovieStorage>, enrichment: Option<OmdbClient>, input: R) -> Self {
        Self {
            storage,
            enrichment,
            input,
        }
    }

    /// Menu loop: redisplays after every action, exits on `0` or end of
    /// input, and degrades every command error to a message.
    pub fn run(&mut self) -> std::result::Result<(), CliError> {
        loop {
            println!("{MENU}");
            let Some(choice) = self.prompt("Enter choice (0-12):")? else {
                break;
            };
            if choice == "0" {
                output::info("Bye!");
                break;
            }
            if let Err(err) = self.dispatch(&choice) {
                output::error(err);
            }
        }
        Ok(())
    }

    fn dispatch(&mut self, choice: &str) -> std::result::Result<(), CliError> {
        match choice {
            "1" => self.list_movies(),
            "2" => self.add_movie(),
            "3" => self.delete_movie(),
            "4" => self.update_movie(),
            "5" => self.show_stats(),
            "6" => self.random_movie(),
            "7" => self.search_movies(),
            "8" => self.sorted_by_rating(),
            "9" => self.sorted_by_year(),
            "10" => self.filter_movies(),
            "11" => self.create_histogram(),
            "12" => self.generate_website(),
            _ => {
                output::warning("Invalid choice. Please enter a number between 0 and 12.");
                Ok(())
            }
        }
    }

    /// Prints the prompt and reads one trimmed line. `None` means end of
    /// input, which every caller treats as "abandon the current command".
    fn prompt(&mut self, message: &str) -> std::result::Result<Option<String>, CliError> {
        output::prompt(message);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompts until the validator accepts the input, reporting each
    /// rejection without touching storage.
    fn prompt_validated<T>(
        &mut self,
        message: &str,
        validate: impl Fn(&str) -> Result<T>,
    ) -> std::result::Result<Option<T>, CliError> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            match validate(&raw) {
                Ok(value) => return Ok(Some(value)),
                Err(err) => output::error(err),
            }
        }
    }

    /// Like `prompt_validated`, but a blank answer means "no constraint".
    /// The outer `None` still signals end of input.
    fn prompt_optional<T>(
        &mut self,
        message: &str,
        validate: impl Fn(&str) -> Result<T>,
    ) -> std::result::Result<Option<Option<T>>, CliError> {
        loop {
            let Some(raw) = self.prompt(message)? else {
                return Ok(None);
            };
            if raw.is_empty() {
                return Ok(Some(None));
            }
            match validate(&raw) {
                Ok(value) => return Ok(Some(Some(value))),
                Err(err) => output::error(err),
            }
        }
    }

    fn list_movies(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        if movies.is_empty() {
            output::info("No movies found.");
            return Ok(());
        }
        output::info(format!("{} movies in total", movies.len()));
        for movie in &movies {
            println!("{}", movie.display_line());
        }
        Ok(())
    }

    fn add_movie(&mut self) -> std::result::Result<(), CliError> {
        let Some(title) = self.prompt_validated("Enter new movie name:", |raw| {
            domain::validate_title(raw)
        })?
        else {
            return Ok(());
        };

        let movie = match self.fetch_enriched(&title)? {
            Some(movie) => movie,
            None => match self.prompt_movie_details(&title)? {
                Some(movie) => movie,
                None => return Ok(()),
            },
        };

        let existing = self.storage.list_movies()?;
        if existing.iter().any(|m| m.title == movie.title) {
            output::warning(format!(
                "Movie \"{}\" already exists and will be overwritten.",
                movie.title
            ));
        }

        self.storage.add_movie(&movie)?;
        output::success(format!("Movie \"{}\" successfully added.", movie.title));
        Ok(())
    }

    /// Best-effort OMDb lookup. Any failure reports the fallback to manual
    /// entry and returns `None`; the add operation itself never aborts on an
    /// enrichment error.
    fn fetch_enriched(&mut self, title: &str) -> std::result::Result<Option<Movie>, CliError> {
        let Some(client) = &self.enrichment else {
            return Ok(None);
        };
        match client.fetch(title) {
            Ok(enriched) => {
                output::success(format!(
                    "Found \"{}\" ({}) rated {:.1} via OMDb.",
                    enriched.title, enriched.year, enriched.rating
                ));
                Ok(Some(Movie::new(
                    enriched.title,
                    enriched.year,
                    enriched.rating,
                    enriched.poster,
                )))
            }
            Err(err) => {
                output::warning(format!("{err}; falling back to manual entry."));
                Ok(None)
            }
        }
    }

    fn prompt_movie_details(
        &mut self,
        title: &str,
    ) -> std::result::Result<Option<Movie>, CliError> {
        let Some(year) = self.prompt_validated("Enter new movie year:", |raw| {
            domain::validate_year(raw)
        })?
        else {
            return Ok(None);
        };
        let Some(rating) = self.prompt_validated("Enter new movie rating (0-10):", |raw| {
            domain::validate_rating(raw)
        })?
        else {
            return Ok(None);
        };
        let Some(poster) = self.prompt("Enter poster URL (optional):")? else {
            return Ok(None);
        };
        let poster = (!poster.is_empty()).then_some(poster);
        Ok(Some(Movie::new(title, year, rating, poster)))
    }

    fn delete_movie(&mut self) -> std::result::Result<(), CliError> {
        let Some(title) = self.prompt("Enter movie name:")? else {
            return Ok(());
        };
        if self.storage.delete_movie(&title)? {
            output::success(format!("Movie \"{title}\" successfully deleted."));
        } else {
            output::error(format!("Movie \"{title}\" does not exist!"));
        }
        Ok(())
    }

    fn update_movie(&mut self) -> std::result::Result<(), CliError> {
        let Some(title) = self.prompt("Enter movie name:")? else {
            return Ok(());
        };
        let movies = self.storage.list_movies()?;
        if !movies.iter().any(|m| m.title == title) {
            output::error(format!("Movie \"{title}\" does not exist!"));
            return Ok(());
        }
        let Some(rating) = self.prompt_validated("Enter new movie rating (0-10):", |raw| {
            domain::validate_rating(raw)
        })?
        else {
            return Ok(());
        };
        self.storage.update_movie(&title, rating)?;
        output::success(format!("Movie \"{title}\" successfully updated."));
        Ok(())
    }

    fn show_stats(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        let stats = StatsService::rating_stats(&movies)?;
        println!("Average rating: {:.1}", stats.average);
        println!("Median rating: {:.1}", stats.median);
        for movie in &stats.best {
            println!("Best movie: {}, {:.1}", movie.title, movie.rating);
        }
        for movie in &stats.worst {
            println!("Worst movie: {}, {:.1}", movie.title, movie.rating);
        }
        Ok(())
    }

    fn random_movie(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        let pick = StatsService::random_pick(&movies)?;
        output::info(format!(
            "Your movie for tonight: {} is rated {:.1}.",
            pick.title, pick.rating
        ));
        Ok(())
    }

    fn search_movies(&mut self) -> std::result::Result<(), CliError> {
        let Some(query) = self.prompt("Enter part of movie name:")? else {
            return Ok(());
        };
        let movies = self.storage.list_movies()?;
        match QueryService::search(&movies, &query) {
            SearchOutcome::Matches(found) => {
                for movie in found {
                    println!("{}, {:.1}", movie.title, movie.rating);
                }
            }
            SearchOutcome::Suggestions(close) => {
                output::info(format!(
                    "The movie \"{query}\" does not exist. Did you mean:"
                ));
                for movie in close {
                    println!("{}, {:.1}", movie.title, movie.rating);
                }
            }
            SearchOutcome::NoMatch => output::info("No matching movies found."),
        }
        Ok(())
    }

    fn sorted_by_rating(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        for movie in QueryService::sort_by_rating(&movies) {
            println!("{}", movie.display_line());
        }
        Ok(())
    }

    fn sorted_by_year(&mut self) -> std::result::Result<(), CliError> {
        let Some(order) = self.prompt_validated("Latest movies first? (Y/N):", parse_order)? else {
            return Ok(());
        };
        let movies = self.storage.list_movies()?;
        for movie in QueryService::sort_by_year(&movies, order) {
            println!("{}", movie.display_line());
        }
        Ok(())
    }

    fn filter_movies(&mut self) -> std::result::Result<(), CliError> {
        let Some(min_rating) = self.prompt_optional(
            "Enter minimum rating (leave blank for no minimum):",
            domain::validate_rating,
        )?
        else {
            return Ok(());
        };
        let Some(start_year) = self.prompt_optional(
            "Enter start year (leave blank for no start year):",
            domain::validate_year,
        )?
        else {
            return Ok(());
        };
        let Some(end_year) = self.prompt_optional(
            "Enter end year (leave blank for no end year):",
            domain::validate_year,
        )?
        else {
            return Ok(());
        };

        let criteria = FilterCriteria {
            min_rating,
            start_year,
            end_year,
        };
        let movies = self.storage.list_movies()?;
        let filtered = QueryService::filter(&movies, &criteria);
        if filtered.is_empty() {
            output::info("No movies match the filter criteria.");
        } else {
            output::info("Filtered movies:");
            for movie in filtered {
                println!("{}", movie.display_line());
            }
        }
        Ok(())
    }

    fn create_histogram(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        histogram::write_histogram(&movies, Path::new(HISTOGRAM_FILE))?;
        output::success(format!(
            "Histogram was successfully saved as \"{HISTOGRAM_FILE}\"."
        ));
        Ok(())
    }

    fn generate_website(&mut self) -> std::result::Result<(), CliError> {
        let movies = self.storage.list_movies()?;
        website::write_website(&movies, None, Path::new(WEBSITE_FILE))?;
        output::success(format!(
            "Website was successfully generated as \"{WEBSITE_FILE}\"."
        ));
        Ok(())
    }
}

fn parse_order(raw: &str) -> Result<SortOrder> {
    match raw.trim().to_ascii_uppercase().as_str() {
        "Y" => Ok(SortOrder::Descending),
        "N" => Ok(SortOrder::Ascending),
        _ => Err(MovieError::InvalidInput("please enter \"Y\" or \"N\"".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_answer_maps_to_sort_order() {
        assert_eq!(parse_order("y").unwrap(), SortOrder::Descending);
        assert_eq!(parse_order(" N ").unwrap(), SortOrder::Ascending);
        assert!(parse_order("maybe").is_err());
    }
}
