use std::{fs, path::Path};

use crate::core::errors::{MovieError, Result};
use crate::domain::Movie;

const BIN_COUNT: usize = 20;
const CHART_WIDTH: f64 = 800.0;
const CHART_HEIGHT: f64 = 480.0;
const MARGIN_LEFT: f64 = 50.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 50.0;
const MARGIN_BOTTOM: f64 = 40.0;

/// Renders a rating histogram (20 half-point bins across 0..10) as a
/// self-contained SVG document.
pub fn render_histogram(ratings: &[f64]) -> Result<String> {
    if ratings.is_empty() {
        return Err(MovieError::EmptyCollection);
    }

    let mut bins = [0usize; BIN_COUNT];
    for &rating in ratings {
        let clamped = rating.clamp(0.0, 10.0);
        let index = ((clamped / 10.0 * BIN_COUNT as f64) as usize).min(BIN_COUNT - 1);
        bins[index] += 1;
    }
    let max_count = bins.iter().copied().max().unwrap_or(1).max(1);

    let plot_width = CHART_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_height = CHART_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bin_width = plot_width / BIN_COUNT as f64;
    let baseline = CHART_HEIGHT - MARGIN_BOTTOM;

    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" viewBox=\"0 0 {CHART_WIDTH} {CHART_HEIGHT}\">\n"
    ));
    svg.push_str(&format!(
        "<rect width=\"{CHART_WIDTH}\" height=\"{CHART_HEIGHT}\" fill=\"honeydew\"/>\n"
    ));
    svg.push_str(&format!(
        "<text x=\"{}\" y=\"30\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"20\" font-weight=\"bold\">Rating Histogram for Movies</text>\n",
        CHART_WIDTH / 2.0
    ));

    for (index, &count) in bins.iter().enumerate() {
        let height = plot_height * count as f64 / max_count as f64;
        let x = MARGIN_LEFT + index as f64 * bin_width;
        svg.push_str(&format!(
            "<rect class=\"bin\" x=\"{:.1}\" y=\"{:.1}\" width=\"{:.1}\" height=\"{:.1}\" fill=\"gold\" stroke=\"black\" fill-opacity=\"0.7\"/>\n",
            x + bin_width * 0.1,
            baseline - height,
            bin_width * 0.8,
            height,
        ));
    }

    // Axes and tick labels (one label per whole rating point).
    svg.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{baseline}\" x2=\"{:.1}\" y2=\"{baseline}\" stroke=\"black\"/>\n",
        CHART_WIDTH - MARGIN_RIGHT
    ));
    svg.push_str(&format!(
        "<line x1=\"{MARGIN_LEFT}\" y1=\"{MARGIN_TOP}\" x2=\"{MARGIN_LEFT}\" y2=\"{baseline}\" stroke=\"black\"/>\n"
    ));
    for tick in 0..=10 {
        let x = MARGIN_LEFT + plot_width * tick as f64 / 10.0;
        svg.push_str(&format!(
            "<text x=\"{x:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"12\">{tick}</text>\n",
            baseline + 18.0
        ));
    }
    svg.push_str(&format!(
        "<text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\" font-weight=\"bold\">Rating between 0 - 10</text>\n",
        MARGIN_LEFT + plot_width / 2.0,
        CHART_HEIGHT - 6.0
    ));
    svg.push_str(&format!(
        "<text x=\"16\" y=\"{:.1}\" text-anchor=\"middle\" font-family=\"sans-serif\" font-size=\"14\" font-weight=\"bold\" transform=\"rotate(-90 16 {:.1})\">Movie count</text>\n",
        MARGIN_TOP + plot_height / 2.0,
        MARGIN_TOP + plot_height / 2.0
    ));
    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Renders the histogram for the collection's ratings and writes it to
/// `path`.
pub fn write_histogram(movies: &[Movie], path: &Path) -> Result<()> {
    let ratings: Vec<f64> = movies.iter().map(|m| m.rating).collect();
    let svg = render_histogram(&ratings)?;
    fs::write(path, svg)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_land_in_half_point_bins() {
        let svg = render_histogram(&[0.0, 0.4, 9.9, 10.0]).unwrap();
        assert_eq!(svg.matches("class=\"bin\"").count(), BIN_COUNT);
    }

    #[test]
    fn empty_ratings_produce_no_chart() {
        assert!(matches!(
            render_histogram(&[]),
            Err(MovieError::EmptyCollection)
        ));
    }
}
