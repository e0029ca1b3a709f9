use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::{Deserialize, Serialize};

/**
 * Maps a grid index onto one axis of the sample rectangle, placing index 0
 * exactly at `x0` and index `n - 1` exactly at `x1`. This is the linear
 * interpolation that anchors the sample grid into the complex plane.
 */
#[derive(Clone, Debug)]
pub struct LinearAxisMap {
    offset: f64,
    slope: f64,
}

impl LinearAxisMap {
    /**
     * @param n: number of grid points spanned by [x0, x1]
     * @param x0: output of the map at index 0
     * @param x1: output of the map at index n-1
     */
    pub fn new(n: u32, x0: f64, x1: f64) -> LinearAxisMap {
        assert!(n > 1);
        LinearAxisMap {
            offset: x0,
            slope: (x1 - x0) / ((n - 1) as f64),
        }
    }

    // Map from grid index (integer) to coordinate (float)
    pub fn map(&self, index: u32) -> f64 {
        self.offset + self.slope * (index as f64)
    }
}

/**
 * A square N x N grid of sample points, anchored by two opposite corner
 * points. Each axis is interpolated independently between its own pair of
 * corner coordinates, so the corners need not be axis-aligned in any
 * particular order; the row index walks the first corner's x toward the
 * second corner's x, and the column index does the same for y.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct GridSpecification {
    pub corner_a: nalgebra::Vector2<f64>,
    pub corner_b: nalgebra::Vector2<f64>,
    pub resolution: u32,
}

impl GridSpecification {
    pub fn x_axis(&self) -> LinearAxisMap {
        LinearAxisMap::new(self.resolution, self.corner_a[0], self.corner_b[0])
    }

    pub fn y_axis(&self) -> LinearAxisMap {
        LinearAxisMap::new(self.resolution, self.corner_a[1], self.corner_b[1])
    }

    /// Sample point for grid indices (i, j): i selects the x coordinate and
    /// j the y coordinate. Deterministic in (i, j, corners, resolution).
    pub fn point(&self, i: u32, j: u32) -> nalgebra::Vector2<f64> {
        nalgebra::Vector2::new(self.x_axis().map(i), self.y_axis().map(j))
    }
}

/**
 * Evaluate a lambda at every point of the sample grid, producing a matrix
 * indexed as `result[i][j]` with `i` on the x-axis and `j` on the y-axis.
 *
 * Every grid point is independent of every other, so rows are dispatched to
 * a rayon worker pool. The evaluation order cannot affect any individual
 * result; the caller exclusively owns the returned matrix.
 *
 * @param point_evaluator: maps from a point in the sample rectangle to the
 * per-point result collected into the output matrix.
 */
pub fn generate_grid<T, F>(spec: &GridSpecification, point_evaluator: F) -> Vec<Vec<T>>
where
    F: Fn(&nalgebra::Vector2<f64>) -> T + std::marker::Sync,
    T: Send,
{
    let x_axis = spec.x_axis();
    let y_axis = spec.y_axis();
    (0..spec.resolution)
        .into_par_iter()
        .map(|i| {
            let x = x_axis.map(i);
            (0..spec.resolution)
                .map(|j| point_evaluator(&nalgebra::Vector2::new(x, y_axis.map(j))))
                .collect()
        })
        .collect()
}
