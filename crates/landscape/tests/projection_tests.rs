//! Tests for sampling benchmarks into mesh files.

use landscape::{Benchmark, LandscapeError, LossProjection, Objective};
use mesh_format::{decode, Bounds, FormatError};
use test_utils::{assert_approx_eq, list_file_names, temp_test_dir};

#[test]
fn test_sphere_projection_matches_pointwise_evaluation() {
    let bounds = Bounds::new(-2.0, -1.0, 2.0, 1.0);
    let projection = LossProjection::new(8, 4, bounds).unwrap();
    let grid = projection.sample(&Benchmark::Sphere, "0").unwrap();

    assert_eq!(grid.shape(), (4, 8));
    assert_eq!(grid.step(), "0");
    for row in 0..4 {
        for col in 0..8 {
            let x = -2.0 + col as f64 * 0.5;
            let y = -1.0 + row as f64 * 0.5;
            assert_approx_eq!(grid.get(row, col).unwrap(), (x * x + y * y).sqrt(), 1e-12);
        }
    }
}

#[test]
fn test_minimum_sits_at_origin_cell() {
    // The origin is sample (4, 4) of an 8x8 mesh over [-4, 4)
    let projection = LossProjection::new(8, 8, Bounds::new(-4.0, -4.0, 4.0, 4.0)).unwrap();
    for benchmark in [Benchmark::Sphere, Benchmark::Rastrigin, Benchmark::Griewank] {
        let grid = projection.sample(&benchmark, "0").unwrap();
        let (min, _) = grid.value_range().unwrap();
        assert_approx_eq!(grid.get(4, 4).unwrap(), min, 1e-9);
    }
}

#[test]
fn test_save_writes_decodable_mesh() {
    let dir = temp_test_dir();
    let projection = LossProjection::new(16, 12, Benchmark::Rastrigin.default_bounds()).unwrap();

    let path = projection.save(&Benchmark::Rastrigin, 3, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("zagros_loss_3.data"));
    assert_eq!(list_file_names(dir.path()), vec!["zagros_loss_3.data"]);

    let grid = decode(&path).unwrap();
    assert_eq!(grid.step(), "3");
    assert_eq!(grid.shape(), (12, 16));
    assert_eq!(grid.bounds(), Benchmark::Rastrigin.default_bounds());
    assert_approx_eq!(
        grid.get(0, 0).unwrap(),
        Benchmark::Rastrigin.evaluate([-5.12, -5.12]),
        1e-9
    );
}

#[test]
fn test_save_into_missing_directory_fails() {
    let dir = temp_test_dir();
    let projection = LossProjection::new(2, 2, Bounds::new(0.0, 0.0, 1.0, 1.0)).unwrap();
    let err = projection
        .save(&Benchmark::Sphere, 0, dir.path().join("missing"))
        .unwrap_err();
    assert!(matches!(err, LandscapeError::Mesh(_)));
}

#[test]
fn test_trait_objects_sample() {
    let objective: Box<dyn Objective> = Box::new(Benchmark::Dropwave);
    let projection = LossProjection::new(5, 5, Benchmark::Dropwave.default_bounds()).unwrap();
    let grid = projection.sample(objective.as_ref(), "dyn").unwrap();
    assert!(grid.values().iter().all(|v| (-1.0..=0.0).contains(v)));
}

#[test]
fn test_multi_line_step_label_writes_nothing() {
    let dir = temp_test_dir();
    let projection = LossProjection::new(2, 2, Bounds::new(0.0, 0.0, 1.0, 1.0)).unwrap();
    let err = projection
        .save(&Benchmark::Sphere, "run\n2", dir.path())
        .unwrap_err();
    assert!(matches!(
        err,
        LandscapeError::InvalidProjection(FormatError::InvalidStep { .. })
    ));
    assert!(list_file_names(dir.path()).is_empty());
}
