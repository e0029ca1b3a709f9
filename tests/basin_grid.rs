use approx::assert_relative_eq;
use nalgebra::Vector2;

use newton_basins::core::color_map::ColorMapKeyFrame;
use newton_basins::core::grid::GridSpecification;
use newton_basins::newton::basins::{evaluate_newton_basin_grid, BasinLabel};
use newton_basins::newton::params::{NewtonBasinParams, ParamsError};
use newton_basins::newton::polynomial::PolynomialSelection;
use newton_basins::newton::solver::{SolveStatus, SolverParams};

const SQRT_3_OVER_2: f64 = 0.8660254037844386;

fn cubic_params(resolution: u32) -> NewtonBasinParams {
    NewtonBasinParams {
        polynomial: PolynomialSelection::Cubic,
        grid_specification: GridSpecification {
            corner_a: Vector2::new(-2.0, 2.0),
            corner_b: Vector2::new(2.0, -2.0),
            resolution,
        },
        solver: SolverParams {
            max_iter_count: 200,
            convergence_tolerance: 1e-9,
        },
        classification_tolerance: 1e-6,
        root_colors_rgb: vec![[0, 0, 0], [0, 128, 0], [255, 0, 0]],
        singular_color_rgb: [128, 128, 128],
        heat_map_keyframes: vec![
            ColorMapKeyFrame {
                query: 0.0,
                rgb_raw: [0, 0, 0],
            },
            ColorMapKeyFrame {
                query: 1.0,
                rgb_raw: [255, 255, 255],
            },
        ],
        histogram_bin_count: 8,
    }
}

#[test]
fn test_three_by_three_cubic_scenario() {
    // Corners (-2, 2) and (2, -2) with N = 3 put the grid center exactly on
    // the origin, where the cubic derivative vanishes. That point must be
    // flagged, not crash the batch; the other eight all reach a root.
    let basin_grid = evaluate_newton_basin_grid(&cubic_params(3)).unwrap();

    assert_eq!(basin_grid.outcomes.len(), 3);
    assert_eq!(basin_grid.labels.len(), 3);

    let cubic_roots = [
        Vector2::new(1.0, 0.0),
        Vector2::new(-0.5, SQRT_3_OVER_2),
        Vector2::new(-0.5, -SQRT_3_OVER_2),
    ];

    for i in 0..3 {
        assert_eq!(basin_grid.outcomes[i].len(), 3);
        assert_eq!(basin_grid.labels[i].len(), 3);
        for j in 0..3 {
            let outcome = &basin_grid.outcomes[i][j];
            assert!(outcome.iter_count >= 1);

            if i == 1 && j == 1 {
                assert_eq!(outcome.status, SolveStatus::SingularDerivative);
                assert_eq!(basin_grid.labels[i][j], BasinLabel::Singular);
            } else {
                assert_eq!(outcome.status, SolveStatus::Converged);
                let near_some_root = cubic_roots.iter().any(|root| {
                    (outcome.estimate.re - root[0]).abs() < 1e-6
                        && (outcome.estimate.im - root[1]).abs() < 1e-6
                });
                assert!(near_some_root, "outcome {:?} is not near a root", outcome);
            }
        }
    }
}

#[test]
fn test_every_grid_point_gets_exactly_one_label() {
    let params = cubic_params(9);
    let basin_grid = evaluate_newton_basin_grid(&params).unwrap();

    let mut per_label_counts = vec![0_usize; 4]; // three roots + singular
    for (_, label) in basin_grid.classification_points() {
        let index = match label {
            BasinLabel::Root(index) => {
                assert!(index < 3);
                index
            }
            BasinLabel::Singular => 3,
        };
        per_label_counts[index] += 1;
    }

    // The label assignment partitions the grid: bucket counts sum to N*N.
    assert_eq!(per_label_counts.iter().sum::<usize>(), 81);
    // All three basins of z^3 - 1 are visible in this view.
    assert!(per_label_counts[0] > 0);
    assert!(per_label_counts[1] > 0);
    assert!(per_label_counts[2] > 0);
}

#[test]
fn test_classification_points_carry_grid_coordinates() {
    let params = cubic_params(5);
    let basin_grid = evaluate_newton_basin_grid(&params).unwrap();

    let spec = &params.grid_specification;
    let points: Vec<_> = basin_grid.classification_points().collect();
    assert_eq!(points.len(), 25);

    for i in 0..5_u32 {
        for j in 0..5_u32 {
            let (start, _) = points[(i * 5 + j) as usize];
            let expected = spec.point(i, j);
            assert_eq!(start[0], expected[0]);
            assert_eq!(start[1], expected[1]);
        }
    }
}

#[test]
fn test_log10_matrix_is_bounded_by_budget() {
    let params = cubic_params(7);
    let basin_grid = evaluate_newton_basin_grid(&params).unwrap();

    let max_log = (params.solver.max_iter_count as f64).log10();
    let log_counts = basin_grid.log10_iteration_counts();
    assert_eq!(log_counts.len(), 7);
    for row in &log_counts {
        assert_eq!(row.len(), 7);
        for &value in row {
            assert!(value >= 0.0);
            assert!(value <= max_log);
        }
    }
}

#[test]
fn test_grid_evaluation_is_deterministic() {
    let params = cubic_params(6);
    let first = evaluate_newton_basin_grid(&params).unwrap();
    let second = evaluate_newton_basin_grid(&params).unwrap();

    for (row_a, row_b) in first.outcomes.iter().zip(second.outcomes.iter()) {
        for (a, b) in row_a.iter().zip(row_b.iter()) {
            assert_eq!(a.estimate.re.to_bits(), b.estimate.re.to_bits());
            assert_eq!(a.estimate.im.to_bits(), b.estimate.im.to_bits());
            assert_eq!(a.iter_count, b.iter_count);
            assert_eq!(a.status, b.status);
        }
    }
    assert_eq!(first.labels, second.labels);
}

#[test]
fn test_grid_corners_match_supplied_coordinates() {
    let params = cubic_params(4);
    let spec = &params.grid_specification;

    let tol = 1e-12;
    let n = spec.resolution;
    assert_relative_eq!(spec.point(0, 0)[0], -2.0, epsilon = tol);
    assert_relative_eq!(spec.point(0, 0)[1], 2.0, epsilon = tol);
    assert_relative_eq!(spec.point(n - 1, n - 1)[0], 2.0, epsilon = tol);
    assert_relative_eq!(spec.point(n - 1, n - 1)[1], -2.0, epsilon = tol);
}

#[test]
fn test_validation_rejects_bad_configurations() {
    let mut params = cubic_params(1);
    assert!(matches!(
        evaluate_newton_basin_grid(&params),
        Err(ParamsError::InvalidResolution { got: 1 })
    ));

    params = cubic_params(8);
    params.solver.max_iter_count = 0;
    assert!(matches!(
        params.validate(),
        Err(ParamsError::InvalidIterationBudget { got: 0 })
    ));

    params = cubic_params(8);
    params.solver.convergence_tolerance = -1.0;
    assert!(matches!(
        params.validate(),
        Err(ParamsError::InvalidTolerance { .. })
    ));

    params = cubic_params(8);
    params.classification_tolerance = f64::NAN;
    assert!(matches!(
        params.validate(),
        Err(ParamsError::InvalidTolerance { .. })
    ));

    params = cubic_params(8);
    params.grid_specification.corner_a[1] = f64::INFINITY;
    assert!(matches!(
        params.validate(),
        Err(ParamsError::DegenerateCorners)
    ));

    params = cubic_params(8);
    params.root_colors_rgb.pop();
    assert!(matches!(
        params.validate(),
        Err(ParamsError::RootColorCount {
            expected: 3,
            got: 2,
            ..
        })
    ));

    params = cubic_params(8);
    params.histogram_bin_count = 0;
    assert!(matches!(
        params.validate(),
        Err(ParamsError::InvalidHistogramBinCount)
    ));

    // The unmodified configuration is accepted.
    assert!(cubic_params(8).validate().is_ok());
}
