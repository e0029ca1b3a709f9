use image::Rgb;

use crate::core::color_map::{ColorMap, ColorMapLookUpTable, ColorMapper};
use crate::core::file_io::{
    serialize_to_json_or_panic, write_image_to_file_or_panic, FilePrefix,
};
use crate::core::histogram::{CumulativeDistributionFunction, Histogram};
use crate::core::stopwatch::Stopwatch;

use super::basins::{evaluate_newton_basin_grid, BasinGrid, BasinLabel};
use super::params::NewtonBasinParams;

/**
 * Renders both artifacts for one parameter file: the root-classification
 * image (one pixel per grid point, colored by basin) and the iteration heat
 * map (log10 of the per-point step count through the configured color map).
 * Also writes a params-echo JSON and a diagnostics file with stopwatch
 * splits and the iteration-count distribution.
 */
pub fn render_newton_basins(
    params: &NewtonBasinParams,
    file_prefix: FilePrefix,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut stopwatch = Stopwatch::new("Render Stopwatch");

    serialize_to_json_or_panic(file_prefix.full_path_with_suffix(".json"), &params);
    stopwatch.record_split("basic setup");

    let basin_grid = evaluate_newton_basin_grid(params)?;
    stopwatch.record_split("evaluate newton grid");

    log_sample_outcome(&basin_grid);

    let resolution = params.grid_specification.resolution;
    let mut root_image = image::ImageBuffer::new(resolution, resolution);
    for (x, y, pixel) in root_image.enumerate_pixels_mut() {
        *pixel = match basin_grid.labels[x as usize][y as usize] {
            BasinLabel::Root(index) => Rgb(params.root_colors_rgb[index]),
            BasinLabel::Singular => Rgb(params.singular_color_rgb),
        };
    }
    stopwatch.record_split("color root classification image");

    write_image_to_file_or_panic(file_prefix.full_path_with_suffix("_roots.png"), |f| {
        root_image.save(f)
    });
    stopwatch.record_split("write roots PNG");

    // Heat map: log10(iter_count) on [0, log10(max_iter_count)], normalized
    // into the color map query domain.
    let max_log_count = (params.solver.max_iter_count as f64).log10();
    let query_scale = if max_log_count > 0.0 {
        1.0 / max_log_count
    } else {
        0.0
    };
    let color_map = ColorMap::new(&params.heat_map_keyframes);
    let color_map = ColorMapLookUpTable::from_color_map(&color_map, 512);

    let log_counts = basin_grid.log10_iteration_counts();
    let mut histogram = Histogram::new(params.histogram_bin_count, (max_log_count as f32).max(1.0));

    let mut heat_image = image::ImageBuffer::new(resolution, resolution);
    for (x, y, pixel) in heat_image.enumerate_pixels_mut() {
        let log_count = log_counts[x as usize][y as usize];
        histogram.insert(log_count as f32);
        *pixel = color_map.compute_pixel((log_count * query_scale) as f32);
    }
    stopwatch.record_split("color iteration heat map");

    write_image_to_file_or_panic(file_prefix.full_path_with_suffix("_iterations.png"), |f| {
        heat_image.save(f)
    });
    stopwatch.record_split("write iterations PNG");

    let mut diagnostics_file = file_prefix.create_file_with_suffix("_diagnostics.txt");
    stopwatch.display(&mut diagnostics_file)?;
    histogram.display(&mut diagnostics_file)?;
    let cdf = CumulativeDistributionFunction::new(&histogram);
    cdf.display(&mut diagnostics_file)?;

    Ok(())
}

/// One full outcome record, logged as a quick sanity check on the run.
fn log_sample_outcome(basin_grid: &BasinGrid) {
    let (i, j) = if basin_grid.outcomes.len() > 2 && basin_grid.outcomes[2].len() > 1 {
        (2, 1)
    } else {
        (0, 0)
    };
    let outcome = &basin_grid.outcomes[i][j];
    println!(
        "INFO:  sample outcome at grid[{}][{}]: start=({}, {}), estimate={}, residual={}, iter_count={}, log10(iter_count)={}",
        i,
        j,
        outcome.start[0],
        outcome.start[1],
        outcome.estimate,
        outcome.residual,
        outcome.iter_count,
        outcome.log10_iter_count()
    );
}
