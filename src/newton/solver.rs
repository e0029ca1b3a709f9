use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use super::polynomial::ComplexFunctionWithSlope;

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
pub struct SolverParams {
    /// Hard cap on Newton steps per starting point.
    pub max_iter_count: u32,
    /// Declare convergence once a step moves less than this distance.
    pub convergence_tolerance: f64,
}

/// How a Newton iteration ended.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    /// The residual hit exactly zero, or the step shrank below tolerance.
    Converged,
    /// The iteration budget ran out; the estimate is the last guess.
    IterationLimit,
    /// The derivative vanished (or an iterate overflowed), so the Newton
    /// update is undefined from here.
    SingularDerivative,
}

/// Result of running the solver from one starting point. Immutable once
/// produced; the classification policy and the heat map both read from it.
#[derive(Debug, Clone, Copy)]
pub struct IterationOutcome {
    /// Starting coordinates exactly as supplied by the grid, kept verbatim
    /// for the scatter output rather than recomputed from the estimate.
    pub start: nalgebra::Vector2<f64>,
    /// The root, or the last guess for non-converged outcomes.
    pub estimate: Complex64,
    /// Function value at `estimate`.
    pub residual: Complex64,
    /// Newton steps taken (or attempted), always on 1..=max_iter_count.
    pub iter_count: u32,
    pub status: SolveStatus,
}

impl IterationOutcome {
    /// Finite for every outcome, since `iter_count` is at least one.
    pub fn log10_iter_count(&self) -> f64 {
        (self.iter_count as f64).log10()
    }
}

/**
 * Run the fixed-point iteration z := z - f(z)/f'(z) from one starting point
 * until the step stalls below tolerance, the residual hits exactly zero, the
 * iteration budget runs out, or the update becomes undefined.
 *
 * Pure and deterministic: identical inputs produce identical outcomes, and
 * nothing outside the returned record is touched. A singular derivative is
 * reported in the outcome rather than propagated as NaN, so one bad starting
 * point never poisons the rest of a grid evaluation.
 */
pub fn solve_from_point<F>(
    start: &nalgebra::Vector2<f64>,
    function: &F,
    params: &SolverParams,
) -> IterationOutcome
where
    F: ComplexFunctionWithSlope,
{
    let mut z = Complex64::new(start[0], start[1]);
    let mut counter: u32 = 0;
    loop {
        let slope = function.slope(z);
        if slope.norm_sqr() == 0.0 {
            // The attempted step is counted, keeping iter_count >= 1.
            return IterationOutcome {
                start: *start,
                estimate: z,
                residual: function.value(z),
                iter_count: counter + 1,
                status: SolveStatus::SingularDerivative,
            };
        }

        let z_new = z - function.value(z) / slope;
        counter += 1;

        if !z_new.re.is_finite() || !z_new.im.is_finite() {
            return IterationOutcome {
                start: *start,
                estimate: z,
                residual: function.value(z),
                iter_count: counter,
                status: SolveStatus::SingularDerivative,
            };
        }

        let f_new = function.value(z_new);
        if f_new.norm_sqr() == 0.0 || (z_new - z).norm() < params.convergence_tolerance {
            return IterationOutcome {
                start: *start,
                estimate: z_new,
                residual: f_new,
                iter_count: counter,
                status: SolveStatus::Converged,
            };
        }

        if counter >= params.max_iter_count {
            // Same record fields as the converged case; only the status
            // flag distinguishes giving up from finishing.
            return IterationOutcome {
                start: *start,
                estimate: z_new,
                residual: f_new,
                iter_count: counter,
                status: SolveStatus::IterationLimit,
            };
        }

        z = z_new;
    }
}
