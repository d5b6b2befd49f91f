use plotters::prelude::*;
use thiserror::Error;

use crate::backend::StatsSummary;

const WIDTH: u32 = 640;
const HEIGHT: u32 = 360;

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("chart io: {0}")]
    Io(#[from] std::io::Error),

    #[error("chart rendering: {0}")]
    Draw(String),
}

/// Submission counts for stars 1 through 5, missing ratings as zero.
pub fn distribution(stats: &StatsSummary) -> [(u8, u64); 5] {
    let mut buckets = [(1u8, 0u64), (2, 0), (3, 0), (4, 0), (5, 0)];
    for (star, count) in buckets.iter_mut() {
        *count = stats.rating_counts.get(star).copied().unwrap_or(0);
    }
    buckets
}

/// Render the rating-distribution bar chart as PNG bytes.
///
/// The bitmap backend wants a file path, so the image takes a round-trip
/// through a temporary file that is removed when the handle drops.
pub fn render_distribution_png(stats: &StatsSummary) -> Result<Vec<u8>, ChartError> {
    let buckets = distribution(stats);

    let file = tempfile::Builder::new().suffix(".png").tempfile()?;
    let path = file.path().to_path_buf();
    {
        let root = BitMapBackend::new(&path, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE).map_err(draw_error)?;

        let max_count = buckets.iter().map(|&(_, count)| count).max().unwrap_or(0).max(1);

        let mut chart = ChartBuilder::on(&root)
            .caption("Rating Distribution", ("sans-serif", 24).into_font())
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(0f64..6f64, 0f64..max_count as f64 + 1.0)
            .map_err(draw_error)?;

        chart
            .configure_mesh()
            .x_desc("Stars")
            .y_desc("Responses")
            .draw()
            .map_err(draw_error)?;

        chart
            .draw_series(buckets.iter().map(|&(star, count)| {
                Rectangle::new(
                    [
                        (star as f64 - 0.4, 0.0),
                        (star as f64 + 0.4, count as f64),
                    ],
                    BLUE.filled(),
                )
            }))
            .map_err(draw_error)?;

        root.present().map_err(draw_error)?;
    }

    Ok(std::fs::read(&path)?)
}

fn draw_error(error: impl std::fmt::Display) -> ChartError {
    ChartError::Draw(error.to_string())
}
