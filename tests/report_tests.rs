use std::fs;

use movie_core::core::errors::MovieError;
use movie_core::domain::Movie;
use movie_core::report::{histogram, website};
use tempfile::tempdir;

fn collection() -> Vec<Movie> {
    vec![
        Movie::new("Titanic", 1997, 9.0, Some("https://p.test/titanic.jpg".into())),
        Movie::new("Matrix", 1999, 8.7, None),
    ]
}

#[test]
fn histogram_is_a_complete_svg_document() {
    let svg = histogram::render_histogram(&[9.0, 8.7, 8.8]).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert_eq!(svg.matches("class=\"bin\"").count(), 20);
}

#[test]
fn histogram_file_is_written_for_a_collection() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ratings.svg");
    histogram::write_histogram(&collection(), &path).unwrap();
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("Rating Histogram for Movies"));
}

#[test]
fn histogram_of_empty_collection_fails() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("ratings.svg");
    let err = histogram::write_histogram(&[], &path).unwrap_err();
    assert!(matches!(err, MovieError::EmptyCollection));
    assert!(!path.exists());
}

#[test]
fn website_lists_every_movie_with_title_and_year() {
    let temp = tempdir().unwrap();
    let path = temp.path().join("index.html");
    website::write_website(&collection(), None, &path).unwrap();

    let page = fs::read_to_string(&path).unwrap();
    assert!(page.contains("Titanic"));
    assert!(page.contains("1997"));
    assert!(page.contains("Matrix"));
    assert!(page.contains("src=\"https://p.test/titanic.jpg\""));
    assert!(page.contains("movie-poster-missing"));
    assert!(!page.contains("__TEMPLATE_"));
}

#[test]
fn website_accepts_a_custom_template_file() {
    let temp = tempdir().unwrap();
    let template = temp.path().join("custom.html");
    fs::write(&template, "<ul>__TEMPLATE_MOVIE_GRID__</ul>").unwrap();
    let out = temp.path().join("index.html");
    website::write_website(&collection(), Some(&template), &out).unwrap();

    let page = fs::read_to_string(&out).unwrap();
    assert!(page.starts_with("<ul>"));
    assert!(page.contains("Titanic"));
}
