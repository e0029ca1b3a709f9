use crate::core::grid::{generate_grid, GridSpecification};

use super::classify::RootClassifier;
use super::params::{NewtonBasinParams, ParamsError};
use super::polynomial::{
    ComplexFunctionWithSlope, CubicPolynomial, DegreeNinePolynomial, PolynomialSelection,
};
use super::solver::{solve_from_point, IterationOutcome, SolveStatus, SolverParams};

/// Discrete bucket assigned to one grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BasinLabel {
    /// Index into the classifier's rule list (and the root color palette).
    Root(usize),
    /// The iteration aborted on a vanishing derivative; no root claimed.
    Singular,
}

/**
 * Everything the rendering stage needs from a batch evaluation: the
 * per-point outcome records, the label matrix, and the grid that anchors
 * them into the complex plane. Both matrices are indexed `[i][j]` with `i`
 * on the x-axis and `j` on the y-axis, and are exclusively owned by the
 * caller.
 */
pub struct BasinGrid {
    pub grid_specification: GridSpecification,
    pub outcomes: Vec<Vec<IterationOutcome>>,
    pub labels: Vec<Vec<BasinLabel>>,
}

impl BasinGrid {
    /// (x, y, label) triples for the root-classification view, carrying the
    /// originally-supplied starting coordinates.
    pub fn classification_points(
        &self,
    ) -> impl Iterator<Item = (nalgebra::Vector2<f64>, BasinLabel)> + '_ {
        self.outcomes
            .iter()
            .flatten()
            .zip(self.labels.iter().flatten())
            .map(|(outcome, label)| (outcome.start, *label))
    }

    /// N x N matrix of log10(iteration count) for the heat-map view.
    pub fn log10_iteration_counts(&self) -> Vec<Vec<f64>> {
        self.outcomes
            .iter()
            .map(|row| row.iter().map(|outcome| outcome.log10_iter_count()).collect())
            .collect()
    }
}

/**
 * Run the Newton solver at every grid point and classify each outcome.
 *
 * The configuration is validated before any work starts. Outcomes with a
 * singular derivative take the dedicated `Singular` label; every other
 * outcome, converged or not, goes through the ordered rule list exactly as
 * the per-root palette expects.
 */
pub fn evaluate_newton_basin_grid(params: &NewtonBasinParams) -> Result<BasinGrid, ParamsError> {
    params.validate()?;

    let outcomes = match params.polynomial {
        PolynomialSelection::Cubic => solve_over_grid(
            &CubicPolynomial,
            &params.grid_specification,
            &params.solver,
        ),
        PolynomialSelection::DegreeNine => solve_over_grid(
            &DegreeNinePolynomial,
            &params.grid_specification,
            &params.solver,
        ),
    };

    let classifier =
        RootClassifier::for_polynomial(params.polynomial, params.classification_tolerance);
    let labels = outcomes
        .iter()
        .map(|row| {
            row.iter()
                .map(|outcome| match outcome.status {
                    SolveStatus::SingularDerivative => BasinLabel::Singular,
                    _ => BasinLabel::Root(classifier.classify(outcome.estimate)),
                })
                .collect()
        })
        .collect();

    Ok(BasinGrid {
        grid_specification: params.grid_specification.clone(),
        outcomes,
        labels,
    })
}

fn solve_over_grid<F>(
    function: &F,
    grid_specification: &GridSpecification,
    solver_params: &SolverParams,
) -> Vec<Vec<IterationOutcome>>
where
    F: ComplexFunctionWithSlope + std::marker::Sync,
{
    generate_grid(grid_specification, |point| {
        solve_from_point(point, function, solver_params)
    })
}
