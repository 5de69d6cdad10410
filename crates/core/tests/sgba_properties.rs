//! Grid-level properties of both methods on larger synthetic fire fronts

use approx::assert_relative_eq;
use ctor::ctor;
use fire_sgba_core::{
    compute_burning_area, sgba_effr, sgba_wa, LevelSetField, SgbaConfig, SgbaError, SgbaMethod,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Sample `f(x, y)` at every cell center of an `nx * ny` grid
fn sample<F: Fn(f64, f64) -> f64>(nx: usize, ny: usize, f: F) -> Vec<f64> {
    let mut phi = Vec::with_capacity(nx * ny);
    for y in 0..ny {
        for x in 0..nx {
            phi.push(f(x as f64, y as f64));
        }
    }
    phi
}

fn random_field(seed: u64, nx: usize, ny: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..nx * ny).map(|_| rng.random_range(0.0..1.0)).collect()
}

/// Area of `{u + v > c}` inside the unit square
fn unit_square_area_above(c: f64) -> f64 {
    if c <= 0.0 {
        1.0
    } else if c <= 1.0 {
        1.0 - 0.5 * c * c
    } else if c <= 2.0 {
        0.5 * (2.0 - c) * (2.0 - c)
    } else {
        0.0
    }
}

#[test]
fn test_fractions_stay_in_unit_interval() {
    let (nx, ny) = (40, 30);
    for seed in 0..8 {
        let phi = random_field(seed, nx, ny);
        let effr = sgba_effr(&phi, nx, ny)
            .unwrap_or_else(|e| panic!("seed {seed}: random field failed: {e}"));
        let wa = sgba_wa(&phi, nx, ny).unwrap();
        for (x, y, s) in effr.interior_values().chain(wa.interior_values()) {
            assert!(
                (0.0..=1.0).contains(&s),
                "seed {seed}: fraction {s} at ({x}, {y}) outside [0, 1]"
            );
        }
    }
}

#[test]
fn test_vertical_planar_front_is_exact() {
    // Front at x = 3.3: cell 3 spans [2.5, 3.5] and burns east of the line
    let (nx, ny) = (8, 6);
    let phi = sample(nx, ny, |x, _| 0.5 + 0.1 * (x - 3.3));
    let out = sgba_effr(&phi, nx, ny).unwrap();
    for (x, y, s) in out.interior_values() {
        let expected = match x {
            0..=2 => 0.0,
            3 => 0.2,
            _ => 1.0,
        };
        assert_relative_eq!(s, expected, epsilon = 1e-12);
        assert_eq!(out.get(x, y), s);
    }
}

#[test]
fn test_diagonal_planar_front_is_exact() {
    // Burning where x + y > 6.2; every node value is exact for a linear field
    let (nx, ny) = (10, 10);
    let phi = sample(nx, ny, |x, y| 0.5 + 0.05 * (x + y - 6.2));
    let out = sgba_effr(&phi, nx, ny).unwrap();
    for (x, y, s) in out.interior_values() {
        let c = 6.2 - (x as f64 - 0.5) - (y as f64 - 0.5);
        let expected = unit_square_area_above(c);
        assert!(
            (s - expected).abs() < 1e-9,
            "cell ({x}, {y}): got {s}, expected {expected}"
        );
    }
}

#[test]
fn test_weighted_average_preserves_linear_fields() {
    let (nx, ny) = (9, 7);
    let phi = sample(nx, ny, |x, y| 0.3 + 0.04 * x - 0.02 * y);
    let field = LevelSetField::new(&phi[..], nx, ny).unwrap();
    let out = sgba_wa(&phi, nx, ny).unwrap();
    for (x, y, s) in out.interior_values() {
        assert_relative_eq!(s, field.get(x, y), epsilon = 1e-12);
    }
}

#[test]
fn test_weighted_average_matches_direct_stencil() {
    let (nx, ny) = (17, 13);
    let phi = random_field(42, nx, ny);
    let at = |x: usize, y: usize| phi[y * nx + x];
    let out = sgba_wa(&phi, nx, ny).unwrap();
    for (x, y, s) in out.interior_values() {
        let expected = 9.0 / 16.0 * at(x, y)
            + 3.0 / 32.0 * (at(x - 1, y) + at(x + 1, y) + at(x, y - 1) + at(x, y + 1))
            + 1.0 / 64.0
                * (at(x - 1, y - 1) + at(x + 1, y - 1) + at(x - 1, y + 1) + at(x + 1, y + 1));
        assert_relative_eq!(s, expected, epsilon = 1e-14);
    }
}

#[test]
fn test_circular_fire_area() {
    // Radius 10.3 fire centered on a 32×32 grid
    let (nx, ny) = (32, 32);
    let radius = 10.3;
    let phi = sample(nx, ny, |x, y| {
        let r = ((x - 15.5).powi(2) + (y - 15.5).powi(2)).sqrt();
        0.5 + 0.1 * (radius - r)
    });
    let field = LevelSetField::new(phi, nx, ny).unwrap();
    let config = SgbaConfig::with_method(SgbaMethod::FrontReconstruction);
    let area = compute_burning_area(&field, &config).unwrap().burning_area(1.0);
    let exact = std::f64::consts::PI * radius * radius;
    assert_relative_eq!(area, exact, max_relative = 0.02);
}

#[test]
fn test_burning_area_grows_with_radius() {
    let (nx, ny) = (24, 24);
    let config = SgbaConfig::default();
    let mut previous = 0.0;
    for step in 1..8 {
        let radius = 1.3 * f64::from(step);
        let phi = sample(nx, ny, |x, y| {
            let r = ((x - 11.5).powi(2) + (y - 11.5).powi(2)).sqrt();
            0.5 + 0.1 * (radius - r)
        });
        let field = LevelSetField::new(phi, nx, ny).unwrap();
        let area = compute_burning_area(&field, &config).unwrap().burning_area(1.0);
        assert!(area > previous, "radius {radius}: area {area} <= {previous}");
        previous = area;
    }
}

#[test]
fn test_repeated_runs_are_identical() {
    let (nx, ny) = (64, 48);
    let phi = random_field(7, nx, ny);
    let first = sgba_effr(&phi, nx, ny).unwrap();
    let second = sgba_effr(&phi, nx, ny).unwrap();
    for ((_, _, a), (_, _, b)) in first.interior_values().zip(second.interior_values()) {
        assert_eq!(a.to_bits(), b.to_bits());
    }
}

#[test]
fn test_first_failing_cell_in_row_order() {
    // Two cells sit exactly on the threshold; the lower row is reported
    let (nx, ny) = (8, 8);
    let mut phi = vec![1.0; nx * ny];
    phi[5 * nx + 2] = 0.5;
    phi[2 * nx + 5] = 0.5;
    let err = sgba_effr(&phi, nx, ny).unwrap_err();
    assert!(
        matches!(err, SgbaError::InvalidCase { x: 5, y: 2, .. }),
        "unexpected error {err}"
    );
    assert_eq!(err.cell(), Some((5, 2)));
}

#[test]
fn test_grid_without_interior() {
    let phi = vec![0.9; 2 * 5];
    let out = sgba_effr(&phi, 2, 5).unwrap();
    assert_eq!(out.interior_values().count(), 0);
    assert!(out.as_slice().iter().all(|v| v.is_nan()));
    assert_eq!(out.burning_area(1.0), 0.0);
}
