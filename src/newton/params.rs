use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::color_map::ColorMapKeyFrame;
use crate::core::grid::GridSpecification;

use super::polynomial::PolynomialSelection;
use super::solver::SolverParams;

/**
 * Complete configuration for one render: which polynomial to iterate, where
 * the sample grid lives, the solver limits, the classification tolerance,
 * and the colors for both output images. Deserialized from a JSON parameter
 * file; an echo of the parsed parameters is written next to each render.
 */
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewtonBasinParams {
    pub polynomial: PolynomialSelection,
    pub grid_specification: GridSpecification,
    pub solver: SolverParams,
    /// Maximum distance between a converged estimate and a known root
    /// coordinate for the estimate to take that root's label.
    pub classification_tolerance: f64,
    /// One color per root label, in classifier rule order.
    pub root_colors_rgb: Vec<[u8; 3]>,
    /// Color for points whose iteration hit a vanishing derivative.
    pub singular_color_rgb: [u8; 3],
    /// Keyframes for the log10(iteration count) heat map, queries on [0,1].
    pub heat_map_keyframes: Vec<ColorMapKeyFrame>,
    /// Bin count for the iteration-count histogram in the diagnostics file.
    pub histogram_bin_count: usize,
}

/// Configuration errors, all reported before any grid work starts.
#[derive(Debug, Error)]
pub enum ParamsError {
    #[error("grid resolution must be at least 2, got {got}")]
    InvalidResolution { got: u32 },

    #[error("max_iter_count must be at least 1, got {got}")]
    InvalidIterationBudget { got: u32 },

    #[error("{name} must be finite and positive, got {got}")]
    InvalidTolerance { name: &'static str, got: f64 },

    #[error("grid corner coordinates must be finite")]
    DegenerateCorners,

    #[error("expected {expected} root colors for {polynomial:?}, got {got}")]
    RootColorCount {
        polynomial: PolynomialSelection,
        expected: usize,
        got: usize,
    },

    #[error("histogram_bin_count must be positive")]
    InvalidHistogramBinCount,
}

impl NewtonBasinParams {
    /// Reject malformed configurations up front, so a grid evaluation either
    /// runs to completion or never starts.
    pub fn validate(&self) -> Result<(), ParamsError> {
        let grid = &self.grid_specification;
        if grid.resolution < 2 {
            return Err(ParamsError::InvalidResolution {
                got: grid.resolution,
            });
        }
        let corners_finite = grid.corner_a.iter().chain(grid.corner_b.iter()).all(|c| c.is_finite());
        if !corners_finite {
            return Err(ParamsError::DegenerateCorners);
        }

        if self.solver.max_iter_count < 1 {
            return Err(ParamsError::InvalidIterationBudget {
                got: self.solver.max_iter_count,
            });
        }
        for (name, value) in [
            ("convergence_tolerance", self.solver.convergence_tolerance),
            ("classification_tolerance", self.classification_tolerance),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ParamsError::InvalidTolerance { name, got: value });
            }
        }

        let expected = self.polynomial.root_count();
        if self.root_colors_rgb.len() != expected {
            return Err(ParamsError::RootColorCount {
                polynomial: self.polynomial,
                expected,
                got: self.root_colors_rgb.len(),
            });
        }

        if self.histogram_bin_count == 0 {
            return Err(ParamsError::InvalidHistogramBinCount);
        }

        Ok(())
    }
}
