// The two polynomial families rendered by this crate, with their exact
// analytic derivatives. Newton's method needs both the value and the slope
// at every iterate; numerical differentiation is never used outside of the
// consistency checks in the tests.

#[cfg(test)]
use nalgebra::Matrix2;
use num::complex::Complex64;
use serde::{Deserialize, Serialize};

/// A complex-valued function with its derivative (slope).
pub trait ComplexFunctionWithSlope {
    /// f(z)
    fn value(&self, z: Complex64) -> Complex64;

    /// f'(z)
    fn slope(&self, z: Complex64) -> Complex64;
}

/// Perform one Newton–Raphson step:
/// y = z - f(z) / f'(z)
#[inline]
pub fn newton_raphson_step<F>(z: Complex64, function: &F) -> Complex64
where
    F: ComplexFunctionWithSlope,
{
    z - function.value(z) / function.slope(z)
}

/// f(z) = z^3 - 1, whose roots are the three cube roots of unity.
pub struct CubicPolynomial;

impl ComplexFunctionWithSlope for CubicPolynomial {
    #[inline]
    fn value(&self, z: Complex64) -> Complex64 {
        z * z * z - Complex64::new(1.0, 0.0)
    }

    #[inline]
    fn slope(&self, z: Complex64) -> Complex64 {
        3.0 * z * z
    }
}

/// f(z) = 35z^9 - 180z^7 + 378z^5 - 420z^3 + 315z, an odd polynomial with
/// nine distinct roots. Its derivative factors as 315(z^2 - 1)^4, so the
/// Newton update is singular along z = ±1.
pub struct DegreeNinePolynomial;

impl ComplexFunctionWithSlope for DegreeNinePolynomial {
    #[inline]
    fn value(&self, z: Complex64) -> Complex64 {
        // Horner evaluation in powers of z^2.
        let w = z * z;
        z * ((((35.0 * w - 180.0) * w + 378.0) * w - 420.0) * w + 315.0)
    }

    #[inline]
    fn slope(&self, z: Complex64) -> Complex64 {
        let w = z * z;
        (((315.0 * w - 1260.0) * w + 1890.0) * w - 1260.0) * w + 315.0
    }
}

/// Selects which polynomial family a parameter file renders.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolynomialSelection {
    Cubic,
    DegreeNine,
}

impl PolynomialSelection {
    /// Number of distinct roots, which is also the number of entries in the
    /// classification rule list and the root color palette.
    pub fn root_count(&self) -> usize {
        match self {
            PolynomialSelection::Cubic => 3,
            PolynomialSelection::DegreeNine => 9,
        }
    }

    /// Directory name used for the render output of this family.
    pub fn output_name(&self) -> &'static str {
        match self {
            PolynomialSelection::Cubic => "cubic",
            PolynomialSelection::DegreeNine => "degree_nine",
        }
    }
}

/// Real (left-regular) representation of a complex scalar as a 2×2 real matrix.
///
/// Maps s = a + i b to the real-linear map x ↦ s·x on C ≅ R^2:
///     [ a  -b ]
///     [ b   a ]
#[inline]
#[cfg(test)]
fn left_multiply_matrix(s: Complex64) -> Matrix2<f64> {
    Matrix2::new(s.re, -s.im, s.im, s.re)
}

#[cfg(test)]
pub fn assert_consistent_value_and_slope<F: ComplexFunctionWithSlope>(
    function: &F,
    z0: Complex64,
    abs_tol: f64,
    rel_tol: f64,
) {
    // Scaled step size for the finite difference operation
    let scale = (z0.norm() + 1.0).sqrt();
    let h = 1e-7 / scale;

    // central finite differences in x and y
    let dfdx = {
        let f_xp = function.value(z0 + Complex64::new(h, 0.0));
        let f_xm = function.value(z0 - Complex64::new(h, 0.0));
        (f_xp - f_xm) * (0.5 / h)
    };
    let dfdy = {
        let f_yp = function.value(z0 + Complex64::new(0.0, h));
        let f_ym = function.value(z0 - Complex64::new(0.0, h));
        (f_yp - f_ym) * (0.5 / h)
    };

    // J_num = [[∂u/∂x, ∂u/∂y],
    //          [∂v/∂x, ∂v/∂y]]
    let finite_difference_slope = Matrix2::new(dfdx.re, dfdy.re, dfdx.im, dfdy.im);

    // J_ana = φ(f'(z0))
    let analytic_slope = left_multiply_matrix(function.slope(z0));

    // nalgebra's `.norm()` on matrices is the Frobenius norm (Euclidean of all entries)
    let error_norm = (finite_difference_slope - analytic_slope).norm();
    let reference_scale = analytic_slope.norm().max(1.0);

    assert!(
        error_norm <= abs_tol + rel_tol * reference_scale,
        "Derivative check failed at z0={z0:?}\n\
         numerical J = {finite_difference_slope}\n\
         analytic  J = {analytic_slope}\n\
         err_frob   = {error_norm:e},  bound = {}",
        abs_tol + rel_tol * reference_scale
    );
}
