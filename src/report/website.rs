use std::{fs, path::Path};

use crate::core::errors::Result;
use crate::domain::Movie;

const TITLE_PLACEHOLDER: &str = "__TEMPLATE_TITLE__";
const GRID_PLACEHOLDER: &str = "__TEMPLATE_MOVIE_GRID__";
const PAGE_TITLE: &str = "My Movie App";

/// Built-in page template used when no template file is supplied.
pub const DEFAULT_TEMPLATE: &str = include_str!("index_template.html");

/// Fills the template placeholders with the page title and one grid item per
/// movie.
pub fn render_website(movies: &[Movie], template: &str) -> String {
    let grid = movies.iter().map(grid_item).collect::<Vec<_>>().join("\n");
    template
        .replace(TITLE_PLACEHOLDER, PAGE_TITLE)
        .replace(GRID_PLACEHOLDER, &grid)
}

/// Renders the website and writes it to `out_path`. Reads the template from
/// `template_path` when given, otherwise uses the built-in template.
pub fn write_website(
    movies: &[Movie],
    template_path: Option<&Path>,
    out_path: &Path,
) -> Result<()> {
    let template = match template_path {
        Some(path) => fs::read_to_string(path)?,
        None => DEFAULT_TEMPLATE.to_string(),
    };
    fs::write(out_path, render_website(movies, &template))?;
    Ok(())
}

fn grid_item(movie: &Movie) -> String {
    let poster = match &movie.poster {
        Some(url) => format!(
            "<img class=\"movie-poster\" src=\"{}\" alt=\"{}\"/>",
            escape_html(url),
            escape_html(&movie.title)
        ),
        None => "<div class=\"movie-poster movie-poster-missing\"></div>".to_string(),
    };
    format!(
        "<li>\n<div class=\"movie\">\n{poster}\n<div class=\"movie-title\">{}</div>\n<div class=\"movie-year\">{}</div>\n</div>\n</li>",
        escape_html(&movie.title),
        movie.year
    )
}

/// Minimal escaping for text interpolated into the page.
fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_fully_substituted() {
        let movies = vec![Movie::new("Titanic", 1997, 9.0, None)];
        let page = render_website(&movies, DEFAULT_TEMPLATE);
        assert!(!page.contains(TITLE_PLACEHOLDER));
        assert!(!page.contains(GRID_PLACEHOLDER));
        assert!(page.contains("Titanic"));
        assert!(page.contains("1997"));
    }

    #[test]
    fn titles_are_html_escaped() {
        let movies = vec![Movie::new("Tom & <Jerry>", 1992, 7.1, None)];
        let page = render_website(&movies, DEFAULT_TEMPLATE);
        assert!(page.contains("Tom &amp; &lt;Jerry&gt;"));
        assert!(!page.contains("<Jerry>"));
    }

    #[test]
    fn missing_poster_renders_a_placeholder_box() {
        let with_poster = Movie::new("A", 2000, 8.0, Some("https://p.test/a.jpg".into()));
        let without = Movie::new("B", 2001, 8.0, None);
        let page = render_website(&[with_poster, without], DEFAULT_TEMPLATE);
        assert!(page.contains("src=\"https://p.test/a.jpg\""));
        assert!(page.contains("movie-poster-missing"));
    }
}
