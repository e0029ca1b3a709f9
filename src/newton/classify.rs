use num::complex::Complex64;
use serde::{Deserialize, Serialize};

use super::polynomial::PolynomialSelection;

/// Proximity test between a converged estimate and one known root
/// coordinate. `Fallback` matches everything and terminates a rule list.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum RootPredicate {
    /// |Re(z) - c| below tolerance.
    RealNear(f64),
    /// |Im(z) - c| below tolerance.
    ImagNear(f64),
    /// Both parts within tolerance of the expected root.
    BothNear { re: f64, im: f64 },
    /// Unconditional catch-all.
    Fallback,
}

impl RootPredicate {
    fn matches(&self, z: Complex64, tolerance: f64) -> bool {
        match *self {
            RootPredicate::RealNear(c) => (z.re - c).abs() < tolerance,
            RootPredicate::ImagNear(c) => (z.im - c).abs() < tolerance,
            RootPredicate::BothNear { re, im } => {
                (z.re - re).abs() < tolerance && (z.im - im).abs() < tolerance
            }
            RootPredicate::Fallback => true,
        }
    }
}

/**
 * Ordered first-match dispatch from a converged estimate to a root label.
 * Rule order is part of the contract: an estimate lands in the first rule
 * that claims it, and the final fallback claims anything the earlier rules
 * missed, so every estimate gets exactly one label.
 */
#[derive(Debug, Clone)]
pub struct RootClassifier {
    rules: Vec<RootPredicate>,
    tolerance: f64,
}

impl RootClassifier {
    pub fn new(rules: Vec<RootPredicate>, tolerance: f64) -> RootClassifier {
        assert!(
            matches!(rules.last(), Some(RootPredicate::Fallback)),
            "rule list must end with a fallback"
        );
        RootClassifier { rules, tolerance }
    }

    /// Rule list for each polynomial family, in the same priority order as
    /// the root color palettes.
    pub fn for_polynomial(selection: PolynomialSelection, tolerance: f64) -> RootClassifier {
        let rules = match selection {
            PolynomialSelection::Cubic => vec![
                // root at 1
                RootPredicate::RealNear(1.0),
                // root at -0.5 + 0.8660254i
                RootPredicate::ImagNear(0.8660254040),
                // root at -0.5 - 0.8660254i
                RootPredicate::Fallback,
            ],
            PolynomialSelection::DegreeNine => vec![
                RootPredicate::RealNear(0.0),
                RootPredicate::BothNear {
                    re: 0.93774544,
                    im: 0.65437520,
                },
                RootPredicate::BothNear {
                    re: 0.93774544,
                    im: -0.65437520,
                },
                RootPredicate::BothNear {
                    re: -0.93774544,
                    im: 0.65437520,
                },
                RootPredicate::BothNear {
                    re: -0.93774544,
                    im: -0.65437520,
                },
                RootPredicate::BothNear {
                    re: -1.48569,
                    im: 0.295006,
                },
                RootPredicate::BothNear {
                    re: -1.48569,
                    im: -0.295006,
                },
                RootPredicate::BothNear {
                    re: 1.48569,
                    im: 0.295006,
                },
                // root at 1.48569 - 0.295006i
                RootPredicate::Fallback,
            ],
        };
        RootClassifier::new(rules, tolerance)
    }

    /// Index of the first rule that claims the estimate.
    pub fn classify(&self, estimate: Complex64) -> usize {
        self.rules
            .iter()
            .position(|rule| rule.matches(estimate, self.tolerance))
            .expect("fallback rule always matches")
    }

    pub fn label_count(&self) -> usize {
        self.rules.len()
    }
}
