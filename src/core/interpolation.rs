use num_traits::Float;
use std::ops::{Add, Mul, Sub};

/// Blends between two keyframe values, given a normalized position between them.
pub trait Interpolator<T, V>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V;
}

/// Linear interpolation: a + (b - a) * alpha
#[derive(Default)]
pub struct LinearInterpolator;

impl<T, V> Interpolator<T, V> for LinearInterpolator
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
{
    fn interpolate(&self, alpha: T, a: &V, b: &V) -> V {
        *a + (*b - *a) * alpha
    }
}

/// Piecewise interpolation through an ordered list of (query, value)
/// keyframes. Queries outside the keyframe domain clamp to the end values.
pub struct KeyframeInterpolator<T, V, F>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    keyframes: Vec<(T, V)>,
    interpolator: F,
}

impl<T, V, F> KeyframeInterpolator<T, V, F>
where
    T: Float,
    V: Copy + Add<Output = V> + Sub<Output = V> + Mul<T, Output = V>,
    F: Interpolator<T, V>,
{
    pub fn new(keyframes: Vec<(T, V)>, interpolator: F) -> Self {
        assert!(!keyframes.is_empty(), "keyframes must not be empty");
        for pair in keyframes.windows(2) {
            assert!(
                pair[0].0 < pair[1].0,
                "keyframe queries must be strictly increasing"
            );
        }

        Self {
            keyframes,
            interpolator,
        }
    }

    pub fn evaluate(&self, query: T) -> V {
        let (first_query, first_value) = *self.keyframes.first().unwrap();
        let (last_query, last_value) = *self.keyframes.last().unwrap();
        if query <= first_query {
            first_value
        } else if query >= last_query {
            last_value
        } else {
            let idx_upp = self.keyframes.partition_point(|(q, _)| query >= *q);
            let (query_low, value_low) = self.keyframes[idx_upp - 1];
            let (query_upp, value_upp) = self.keyframes[idx_upp];
            let alpha = (query - query_low) / (query_upp - query_low);
            self.interpolator
                .interpolate(alpha, &value_low, &value_upp)
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn test_linear_keyframe_interpolation() {
        let interpolator = KeyframeInterpolator::new(
            vec![(0.0_f64, 1.0_f64), (0.5, 3.0), (1.0, 2.0)],
            LinearInterpolator {},
        );

        let tol = 1e-12;
        assert_relative_eq!(interpolator.evaluate(0.0), 1.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(0.25), 2.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(0.5), 3.0, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(0.75), 2.5, epsilon = tol);
        assert_relative_eq!(interpolator.evaluate(1.0), 2.0, epsilon = tol);
    }

    #[test]
    fn test_out_of_domain_queries_clamp() {
        let interpolator = KeyframeInterpolator::new(
            vec![(0.0_f64, -1.0_f64), (1.0, 4.0)],
            LinearInterpolator {},
        );

        assert_eq!(interpolator.evaluate(-10.0), -1.0);
        assert_eq!(interpolator.evaluate(10.0), 4.0);
    }

    #[test]
    #[should_panic(expected = "strictly increasing")]
    fn test_unsorted_keyframes_panic() {
        KeyframeInterpolator::new(
            vec![(0.0_f64, 0.0_f64), (0.7, 1.0), (0.3, 2.0)],
            LinearInterpolator {},
        );
    }
}
