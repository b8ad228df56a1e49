//! Matrix arithmetic over `Matrix`. Every operation returns a new value and
//! leaves its inputs untouched.
//!
//! `determinant` is the textbook Laplace (cofactor) expansion along the first
//! row and `inverse` is the adjugate divided by the determinant. Both are
//! O(n!) and meant for the small matrices typed in by hand; `determinant_lu`
//! and `inverse_lu` give the same results in O(n^3) through nalgebra's LU
//! decomposition.
use crate::calc_errors::MatrixError;
use crate::somelinalg::matrix::Matrix;
use log::debug;

/// |det| below this means the matrix has no inverse
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

fn shape_str(m: &Matrix) -> String {
    format!("{}x{}", m.rows(), m.cols())
}

fn require_same_shape(operation: &'static str, a: &Matrix, b: &Matrix) -> Result<(), MatrixError> {
    if a.shape() != b.shape() {
        return Err(MatrixError::dimension(operation, shape_str(a), shape_str(b)));
    }
    Ok(())
}

fn require_square(operation: &'static str, a: &Matrix) -> Result<(), MatrixError> {
    if !a.is_square() {
        return Err(MatrixError::dimension(
            operation,
            "square matrix",
            shape_str(a),
        ));
    }
    Ok(())
}

fn elementwise(a: &Matrix, b: &Matrix, op: impl Fn(f64, f64) -> f64) -> Result<Matrix, MatrixError> {
    let values: Vec<f64> = a
        .as_slice()
        .iter()
        .zip(b.as_slice())
        .map(|(x, y)| op(*x, *y))
        .collect();
    Matrix::from_row_slice(a.rows(), a.cols(), &values)
}

pub fn add(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    require_same_shape("add", a, b)?;
    elementwise(a, b, |x, y| x + y)
}

pub fn subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    require_same_shape("subtract", a, b)?;
    elementwise(a, b, |x, y| x - y)
}

/// `a.rows x b.cols` product; needs `a.cols == b.rows`.
pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, MatrixError> {
    if a.cols() != b.rows() {
        return Err(MatrixError::dimension(
            "multiply",
            format!("{} rows in the right operand", a.cols()),
            format!("{} rows", b.rows()),
        ));
    }
    let mut result = Matrix::zeros(a.rows(), b.cols())?;
    for i in 0..a.rows() {
        for j in 0..b.cols() {
            let mut sum = 0.0;
            for k in 0..a.cols() {
                sum += a[(i, k)] * b[(k, j)];
            }
            result[(i, j)] = sum;
        }
    }
    Ok(result)
}

pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// `a` without row `row` and column `col`; `a` must be at least 2x2.
pub fn minor(a: &Matrix, row: usize, col: usize) -> Result<Matrix, MatrixError> {
    if a.rows() < 2 || a.cols() < 2 || row >= a.rows() || col >= a.cols() {
        return Err(MatrixError::dimension(
            "minor",
            "at least 2x2 and an index inside it",
            format!("{} at ({}, {})", shape_str(a), row, col),
        ));
    }
    let mut values = Vec::with_capacity((a.rows() - 1) * (a.cols() - 1));
    for i in (0..a.rows()).filter(|i| *i != row) {
        for j in (0..a.cols()).filter(|j| *j != col) {
            values.push(a[(i, j)]);
        }
    }
    Matrix::from_row_slice(a.rows() - 1, a.cols() - 1, &values)
}

fn cofactor_det(a: &Matrix) -> Result<f64, MatrixError> {
    match a.rows() {
        1 => Ok(a[(0, 0)]),
        2 => Ok(a[(0, 0)] * a[(1, 1)] - a[(0, 1)] * a[(1, 0)]),
        n => {
            let mut det = 0.0;
            for j in 0..n {
                let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                det += sign * a[(0, j)] * cofactor_det(&minor(a, 0, j)?)?;
            }
            Ok(det)
        }
    }
}

/// Laplace expansion along the first row.
pub fn determinant(a: &Matrix) -> Result<f64, MatrixError> {
    require_square("determinant", a)?;
    cofactor_det(a)
}

/// Determinant from nalgebra's LU decomposition with partial pivoting.
pub fn determinant_lu(a: &Matrix) -> Result<f64, MatrixError> {
    require_square("determinant", a)?;
    Ok(a.to_dmatrix().lu().determinant())
}

/// Inverse as adjugate / determinant, `adj[j][i] = (-1)^(i+j) det(minor(a, i, j))`.
pub fn inverse(a: &Matrix) -> Result<Matrix, MatrixError> {
    require_square("inverse", a)?;
    let det = cofactor_det(a)?;
    if det.abs() < SINGULARITY_TOLERANCE {
        debug!("inverse refused, determinant = {:e}", det);
        return Err(MatrixError::singular(det));
    }
    let n = a.rows();
    if n == 1 {
        return Matrix::from_row_slice(1, 1, &[1.0 / det]);
    }
    let mut result = Matrix::zeros(n, n)?;
    for i in 0..n {
        for j in 0..n {
            let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
            result[(j, i)] = sign * cofactor_det(&minor(a, i, j)?)? / det;
        }
    }
    Ok(result)
}

/// Inverse from nalgebra's LU decomposition, refused when `|det| < 1e-10` like `inverse`.
pub fn inverse_lu(a: &Matrix) -> Result<Matrix, MatrixError> {
    require_square("inverse", a)?;
    let lu = a.to_dmatrix().lu();
    let det = lu.determinant();
    if det.abs() < SINGULARITY_TOLERANCE {
        debug!("inverse refused, determinant = {:e}", det);
        return Err(MatrixError::singular(det));
    }
    let inv = lu.try_inverse().ok_or(MatrixError::singular(det))?;
    Matrix::from_dmatrix(&inv)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn m(rows: &[&[f64]]) -> Matrix {
        let rows: Vec<Vec<f64>> = rows.iter().map(|r| r.to_vec()).collect();
        Matrix::from_rows(&rows).unwrap()
    }

    fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Matrix {
        let values: Vec<f64> = (0..rows * cols).map(|_| rng.random_range(-5.0..5.0)).collect();
        Matrix::from_row_slice(rows, cols, &values).unwrap()
    }

    #[test]
    fn test_add_subtract() {
        let a = m(&[&[1.0, 2.0], &[3.0, 4.0]]);
        let b = m(&[&[5.0, 6.0], &[7.0, 8.0]]);
        assert_eq!(add(&a, &b).unwrap(), m(&[&[6.0, 8.0], &[10.0, 12.0]]));
        assert_eq!(subtract(&b, &a).unwrap(), m(&[&[4.0, 4.0], &[4.0, 4.0]]));
        let c = m(&[&[1.0, 2.0, 3.0]]);
        assert!(matches!(add(&a, &c), Err(MatrixError::DimensionMismatch(_))));
        assert!(subtract(&a, &c).is_err());
    }

    #[test]
    fn test_multiply() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let b = m(&[&[7.0, 8.0], &[9.0, 10.0], &[11.0, 12.0]]);
        assert_eq!(multiply(&a, &b).unwrap(), m(&[&[58.0, 64.0], &[139.0, 154.0]]));
        assert!(matches!(multiply(&a, &a), Err(MatrixError::DimensionMismatch(_))));
    }

    #[test]
    fn test_transpose() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]]);
        let t = transpose(&a);
        assert_eq!(t, m(&[&[1.0, 4.0], &[2.0, 5.0], &[3.0, 6.0]]));
    }

    #[test]
    fn test_determinant_small() {
        assert_eq!(determinant(&m(&[&[4.0]])).unwrap(), 4.0);
        assert_eq!(determinant(&m(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap(), -2.0);
        let a = m(&[&[2.0, -3.0, 1.0], &[2.0, 0.0, -1.0], &[1.0, 4.0, 5.0]]);
        assert_relative_eq!(determinant(&a).unwrap(), 49.0, epsilon = 1e-12);
        assert_relative_eq!(determinant_lu(&a).unwrap(), 49.0, epsilon = 1e-9);
        assert!(determinant(&m(&[&[1.0, 2.0]])).is_err());
    }

    #[test]
    fn test_minor() {
        let a = m(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 9.0]]);
        assert_eq!(minor(&a, 0, 1).unwrap(), m(&[&[4.0, 6.0], &[7.0, 9.0]]));
        assert!(minor(&m(&[&[1.0]]), 0, 0).is_err());
    }

    #[test]
    fn test_inverse() {
        let a = m(&[&[4.0, 7.0], &[2.0, 6.0]]);
        let inv = inverse(&a).unwrap();
        assert_relative_eq!(inv[(0, 0)], 0.6, epsilon = 1e-12);
        assert_relative_eq!(inv[(0, 1)], -0.7, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 0)], -0.2, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 1)], 0.4, epsilon = 1e-12);
        assert_eq!(inverse(&m(&[&[2.0]])).unwrap(), m(&[&[0.5]]));
    }

    #[test]
    fn test_inverse_singular() {
        let a = m(&[&[1.0, 2.0], &[2.0, 4.0]]);
        match inverse(&a) {
            Err(MatrixError::Singular(e)) => assert_eq!(e.pivot_or_determinant, 0.0),
            other => panic!("expected singular error, got {:?}", other),
        }
        assert!(inverse(&m(&[&[1.0, 2.0, 3.0]])).is_err());
    }

    #[test]
    fn test_det_of_product_property() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in 1..=5 {
            let a = random_matrix(&mut rng, n, n);
            let b = random_matrix(&mut rng, n, n);
            let lhs = determinant(&multiply(&a, &b).unwrap()).unwrap();
            let rhs = determinant(&a).unwrap() * determinant(&b).unwrap();
            assert_relative_eq!(lhs, rhs, max_relative = 1e-6, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_inverse_property() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut checked = 0;
        while checked < 10 {
            let n = rng.random_range(1..=5);
            let a = random_matrix(&mut rng, n, n);
            if determinant(&a).unwrap().abs() <= 1e-6 {
                continue;
            }
            let product = multiply(&a, &inverse(&a).unwrap()).unwrap();
            let eye = Matrix::identity(n).unwrap();
            for i in 0..n {
                for j in 0..n {
                    assert_relative_eq!(product[(i, j)], eye[(i, j)], epsilon = 1e-6);
                }
            }
            checked += 1;
        }
    }

    #[test]
    fn test_transpose_involution() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let rows = rng.random_range(1..=6);
            let cols = rng.random_range(1..=6);
            let a = random_matrix(&mut rng, rows, cols);
            assert_eq!(transpose(&transpose(&a)), a);
        }
    }

    #[test]
    fn test_cofactor_agrees_with_lu() {
        let mut rng = StdRng::seed_from_u64(11);
        for n in 1..=6 {
            let a = random_matrix(&mut rng, n, n);
            assert_relative_eq!(
                determinant(&a).unwrap(),
                determinant_lu(&a).unwrap(),
                max_relative = 1e-8,
                epsilon = 1e-9
            );
        }
    }

    #[test]
    fn test_adjugate_agrees_with_lu_inverse() {
        let mut rng = StdRng::seed_from_u64(17);
        for n in 1..=5 {
            let a = random_matrix(&mut rng, n, n);
            if determinant(&a).unwrap().abs() <= 1e-6 {
                continue;
            }
            let adj = inverse(&a).unwrap();
            let lu = inverse_lu(&a).unwrap();
            for (x, y) in adj.as_slice().iter().zip(lu.as_slice()) {
                assert_relative_eq!(*x, *y, max_relative = 1e-8, epsilon = 1e-9);
            }
        }
        assert!(matches!(
            inverse_lu(&m(&[&[1.0, 2.0], &[2.0, 4.0]])),
            Err(MatrixError::Singular(_))
        ));
    }
}
