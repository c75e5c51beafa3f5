//! Objective functions over the plane.

use std::f64::consts::{E, PI};
use std::fmt;
use std::str::FromStr;

use mesh_format::Bounds;

use crate::error::LandscapeError;

/// A scalar loss evaluated at a 2D point.
///
/// Implementations must be `Sync`; rows of a projection are evaluated on
/// the rayon pool.
pub trait Objective: Sync {
    fn evaluate(&self, point: [f64; 2]) -> f64;
}

impl<F> Objective for F
where
    F: Fn([f64; 2]) -> f64 + Sync,
{
    fn evaluate(&self, point: [f64; 2]) -> f64 {
        self(point)
    }
}

/// Classic optimizer test functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Benchmark {
    /// Euclidean norm; minimum 0 at the origin
    Sphere,
    /// Highly multimodal, regular grid of local minima
    Rastrigin,
    Ackley,
    Griewank,
    /// Minimum -1 at the origin
    Dropwave,
}

impl Benchmark {
    pub const ALL: [Benchmark; 5] = [
        Benchmark::Sphere,
        Benchmark::Rastrigin,
        Benchmark::Ackley,
        Benchmark::Griewank,
        Benchmark::Dropwave,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Benchmark::Sphere => "sphere",
            Benchmark::Rastrigin => "rastrigin",
            Benchmark::Ackley => "ackley",
            Benchmark::Griewank => "griewank",
            Benchmark::Dropwave => "dropwave",
        }
    }

    /// The square domain the function is usually plotted over.
    pub fn default_bounds(self) -> Bounds {
        let half = match self {
            Benchmark::Sphere | Benchmark::Rastrigin | Benchmark::Dropwave => 5.12,
            Benchmark::Ackley => 5.0,
            Benchmark::Griewank => 600.0,
        };
        Bounds::new(-half, -half, half, half)
    }
}

impl Objective for Benchmark {
    fn evaluate(&self, point: [f64; 2]) -> f64 {
        match self {
            Benchmark::Sphere => sphere(&point),
            Benchmark::Rastrigin => rastrigin(&point),
            Benchmark::Ackley => ackley(&point),
            Benchmark::Griewank => griewank(&point),
            Benchmark::Dropwave => dropwave(&point),
        }
    }
}

impl FromStr for Benchmark {
    type Err = LandscapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Benchmark::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| LandscapeError::UnknownBenchmark(s.to_string()))
    }
}

impl fmt::Display for Benchmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn sum_squares(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

pub fn sphere(x: &[f64]) -> f64 {
    sum_squares(x).sqrt()
}

pub fn rastrigin(x: &[f64]) -> f64 {
    10.0 * x.len() as f64 + x.iter().map(|v| v * v - 10.0 * (2.0 * PI * v).cos()).sum::<f64>()
}

pub fn ackley(x: &[f64]) -> f64 {
    let n = x.len() as f64;
    let cos_mean = x.iter().map(|v| (2.0 * PI * v).cos()).sum::<f64>() / n;
    -20.0 * (-0.2 * (sum_squares(x) / n).sqrt()).exp() - cos_mean.exp() + E + 20.0
}

pub fn griewank(x: &[f64]) -> f64 {
    let product: f64 = x
        .iter()
        .enumerate()
        .map(|(i, v)| (v / ((i + 1) as f64).sqrt()).cos())
        .product();
    1.0 + sum_squares(x) / 4000.0 - product
}

pub fn dropwave(x: &[f64]) -> f64 {
    let r2 = sum_squares(x);
    -(1.0 + (12.0 * r2.sqrt()).cos()) / (0.5 * r2 + 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_global_minima_at_origin() {
        assert!(Benchmark::Sphere.evaluate([0.0, 0.0]).abs() < EPS);
        assert!(Benchmark::Rastrigin.evaluate([0.0, 0.0]).abs() < EPS);
        assert!(Benchmark::Ackley.evaluate([0.0, 0.0]).abs() < 1e-9);
        assert!(Benchmark::Griewank.evaluate([0.0, 0.0]).abs() < EPS);
        assert!((Benchmark::Dropwave.evaluate([0.0, 0.0]) + 1.0).abs() < EPS);
    }

    #[test]
    fn test_sphere_is_norm() {
        assert!((Benchmark::Sphere.evaluate([3.0, 4.0]) - 5.0).abs() < EPS);
    }

    #[test]
    fn test_rastrigin_integer_points() {
        // cos(2*pi*k) = 1, so each coordinate contributes k^2
        assert!((rastrigin(&[1.0, 2.0]) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_names_round_trip() {
        for b in Benchmark::ALL {
            assert_eq!(b.name().parse::<Benchmark>().unwrap(), b);
        }
        assert_eq!("Ackley".parse::<Benchmark>().unwrap(), Benchmark::Ackley);
        assert!(matches!(
            "rosenbrock".parse::<Benchmark>(),
            Err(LandscapeError::UnknownBenchmark(_))
        ));
    }

    #[test]
    fn test_closures_are_objectives() {
        let plane = |p: [f64; 2]| p[0] + 2.0 * p[1];
        assert_eq!(plane.evaluate([1.0, 1.0]), 3.0);
    }

    #[test]
    fn test_default_bounds_are_valid() {
        for b in Benchmark::ALL {
            assert!(b.default_bounds().is_valid(), "{}", b);
        }
    }
}
