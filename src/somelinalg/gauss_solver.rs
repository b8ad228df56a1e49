//! Gaussian elimination with partial pivoting for square systems `A x = b`.
//!
//! At step `i` the row (among rows `>= i`) with the largest `|a[r][i]|` is swapped
//! into position `i`; a chosen pivot with `|pivot| < 1e-10` means the system has no
//! unique solution. After forward elimination the solution is found by back
//! substitution from the last row upwards, in input variable order.
use crate::calc_errors::MatrixError;
use crate::somelinalg::linear_sys_diagnostics::classify_singular_system;
use crate::somelinalg::matrix::Matrix;
use log::{debug, warn};

/// pivots smaller than this in absolute value are treated as zero
pub const PIVOT_TOLERANCE: f64 = 1e-10;

/// Solve `coeffs * x = constants`; `coeffs` must be `n x n` and `constants` of length `n`.
pub fn solve(coeffs: &Matrix, constants: &[f64]) -> Result<Vec<f64>, MatrixError> {
    if !coeffs.is_square() {
        return Err(MatrixError::dimension(
            "solve",
            "square coefficient matrix",
            format!("{}x{}", coeffs.rows(), coeffs.cols()),
        ));
    }
    let n = coeffs.rows();
    if constants.len() != n {
        return Err(MatrixError::dimension(
            "solve",
            format!("{} constants", n),
            format!("{} constants", constants.len()),
        ));
    }
    // augmented rows [a_i0 .. a_i(n-1) | b_i]
    let mut aug: Vec<Vec<f64>> = (0..n)
        .map(|i| {
            let mut row = coeffs.row(i).to_vec();
            row.push(constants[i]);
            row
        })
        .collect();

    for i in 0..n {
        let mut max_row = i;
        for k in i + 1..n {
            if aug[k][i].abs() > aug[max_row][i].abs() {
                max_row = k;
            }
        }
        if max_row != i {
            debug!("pivoting: swapping rows {} and {}", i, max_row);
            aug.swap(i, max_row);
        }
        let pivot = aug[i][i];
        if pivot.abs() < PIVOT_TOLERANCE {
            warn!("elimination stopped at column {}: pivot {:e}", i, pivot);
            if let Some(kind) = classify_singular_system(coeffs, constants) {
                warn!("system has no unique solution: {}", kind);
            }
            return Err(MatrixError::singular(pivot));
        }
        for k in i + 1..n {
            let factor = aug[k][i] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in i..=n {
                aug[k][j] -= factor * aug[i][j];
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = aug[i][n];
        for j in i + 1..n {
            sum -= aug[i][j] * x[j];
        }
        x[i] = sum / aug[i][i];
    }
    debug!("solution: {:?}", x);
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::somelinalg::matrix_algebra::multiply;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_two_by_two() {
        let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let x = solve(&a, &[5.0, 10.0]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_needs_pivoting() {
        // zero in the top-left corner
        let a = Matrix::from_rows(&[
            vec![0.0, 2.0, 1.0],
            vec![1.0, -2.0, -3.0],
            vec![-1.0, 1.0, 2.0],
        ])
        .unwrap();
        let x = solve(&a, &[-8.0, 0.0, 3.0]).unwrap();
        assert_relative_eq!(x[0], -4.0, epsilon = 1e-10);
        assert_relative_eq!(x[1], -5.0, epsilon = 1e-10);
        assert_relative_eq!(x[2], 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_singular_system() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        for b in [[3.0, 6.0], [1.0, 0.0]] {
            assert!(matches!(solve(&a, &b), Err(MatrixError::Singular(_))));
        }
    }

    #[test]
    fn test_singular_system_with_infinite_entry() {
        let a = Matrix::from_rows(&[vec![0.0, f64::INFINITY], vec![0.0, 1.0]]).unwrap();
        assert!(matches!(solve(&a, &[1.0, 2.0]), Err(MatrixError::Singular(_))));
    }

    #[test]
    fn test_dimension_checks() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]]).unwrap();
        assert!(matches!(solve(&a, &[1.0, 2.0]), Err(MatrixError::DimensionMismatch(_))));
        let sq = Matrix::identity(2).unwrap();
        assert!(matches!(solve(&sq, &[1.0]), Err(MatrixError::DimensionMismatch(_))));
    }

    #[test]
    fn test_residual_on_random_systems() {
        let mut rng = StdRng::seed_from_u64(2024);
        for n in 1..=8 {
            let values: Vec<f64> = (0..n * n).map(|_| rng.random_range(-10.0..10.0)).collect();
            let a = Matrix::from_row_slice(n, n, &values).unwrap();
            let b: Vec<f64> = (0..n).map(|_| rng.random_range(-10.0..10.0)).collect();
            let x = solve(&a, &b).unwrap();
            let x_col = Matrix::from_row_slice(n, 1, &x).unwrap();
            let ax = multiply(&a, &x_col).unwrap();
            for i in 0..n {
                assert_relative_eq!(ax[(i, 0)], b[i], epsilon = 1e-8);
            }
        }
    }
}
