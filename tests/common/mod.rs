// Shared test helpers for integration tests
#![allow(dead_code)]

use cramer_bench::core::matrix::Matrix;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Tolerance for comparing determinants computed along different elimination paths.
pub const TOLERANCE: f64 = 1e-9;

pub fn assert_close(actual: f64, expected: f64) {
    let scale = expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= TOLERANCE * scale,
        "expected {expected}, got {actual}"
    );
}

/// The 3x3 system used throughout the tests:
///
/// ```text
/// A = [[2, 1, 1],      B = [4, 5, 6]
///      [1, 3, 2],
///      [1, 0, 0]]
/// ```
///
/// det(A) = -1; the column-substituted determinants are -6, -15 and 23,
/// giving the solution x = (6, 15, -23).
pub fn example_system() -> (Matrix, Vec<f64>) {
    let a = Matrix::from_rows(vec![
        vec![2.0, 1.0, 1.0],
        vec![1.0, 3.0, 2.0],
        vec![1.0, 0.0, 0.0],
    ])
    .unwrap();
    (a, vec![4.0, 5.0, 6.0])
}

pub const EXAMPLE_DET: f64 = -1.0;
pub const EXAMPLE_COLUMN_DETS: [f64; 3] = [-6.0, -15.0, 23.0];

/// A seeded random matrix with entries in [-5, 5).
pub fn random_matrix(n: usize, seed: u64) -> Matrix {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Matrix::allocate(n).unwrap();
    m.fill_random(&mut rng, -5.0, 5.0).unwrap();
    m
}

/// A seeded random vector with entries in [0, 10).
pub fn random_rhs(n: usize, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    cramer_bench::core::matrix::random_vector(&mut rng, n, 0.0, 10.0).unwrap()
}

/// Writes a configuration file into `temp_dir` and returns its path.
pub fn write_config(temp_dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = temp_dir.path().join(name);
    fs::write(&path, content).expect("Failed to write config file");
    path
}

/// A configuration whose matrix entries are all far below the pivot threshold,
/// so the base determinant is reported as singular.
pub fn create_singular_config(temp_dir: &TempDir) -> PathBuf {
    write_config(
        temp_dir,
        "singular.toml",
        r#"
language = "en"
size = 4
start_workers = 1
end_workers = 2
seed = 1

[matrix_range]
low = 0.0
high = 1e-12
"#,
    )
}

/// Helper function to create an invalid TOML configuration
pub fn create_invalid_toml(temp_dir: &TempDir) -> PathBuf {
    write_config(
        temp_dir,
        "invalid.toml",
        r#"
language = "en"
size = 10
# Invalid TOML - missing closing bracket
[matrix_range
low = 0.0
"#,
    )
}
