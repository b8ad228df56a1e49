use crate::somelinalg::matrix::Matrix;
use log::warn;
use nalgebra::{DMatrix, DVector, stack};
use std::fmt;

/// relative tolerance for numerical rank
const RANK_TOLERANCE: f64 = 1e-10;

/// What a square system without a unique solution actually has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemKind {
    /// rank(A) == rank([A b]) == n
    Unique,
    /// rank(A) == rank([A b]) < n
    InfinitelyMany,
    /// rank(A) < rank([A b])
    NoSolution,
}

impl fmt::Display for SystemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SystemKind::Unique => write!(f, "unique solution"),
            SystemKind::InfinitelyMany => write!(f, "infinitely many solutions"),
            SystemKind::NoSolution => write!(f, "no solution"),
        }
    }
}

/// nalgebra's SVD cannot order singular values of a matrix holding inf or NaN
fn all_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|v| v.is_finite())
}

fn rank_tolerance(m: &DMatrix<f64>) -> f64 {
    RANK_TOLERANCE * m.amax().max(1.0)
}

/// The Rouché–Capelli theorem: `A x = b` has a solution iff rank(A) == rank([A b]);
/// the solution is unique iff that rank also equals the number of unknowns.
/// `None` when the system holds a non-finite entry and has no numerical rank.
pub fn Rouche_Capelli_theorem(A: &DMatrix<f64>, b: &DVector<f64>) -> Option<SystemKind> {
    let Ab: DMatrix<f64> = stack![A, b];
    if !all_finite(&Ab) {
        warn!("rank test skipped: the system has non-finite entries");
        return None;
    }
    let eps = rank_tolerance(&Ab);
    let rank_A = A.rank(eps);
    let rank_Ab = Ab.rank(eps);
    if rank_A != rank_Ab {
        warn!(
            "The system has no solution. rank(A) = {} != rank([A b]) = {}",
            rank_A, rank_Ab
        );
        Some(SystemKind::NoSolution)
    } else if rank_A < A.ncols() {
        warn!(
            "The system has infinitely many solutions. rank(A) = rank([A b]) = {} < {}",
            rank_A,
            A.ncols()
        );
        Some(SystemKind::InfinitelyMany)
    } else {
        Some(SystemKind::Unique)
    }
}

/// Classify `coeffs * x = constants` once elimination has failed.
pub fn classify_singular_system(coeffs: &Matrix, constants: &[f64]) -> Option<SystemKind> {
    let A = coeffs.to_dmatrix();
    let b = DVector::from_column_slice(constants);
    Rouche_Capelli_theorem(&A, &b)
}

/// ratio of the largest to the smallest singular value, `None` for non-finite entries
pub fn condition_number(A: &DMatrix<f64>) -> Option<f64> {
    if !all_finite(A) {
        return None;
    }
    let singular_values = A.singular_values();
    let max_sigma = singular_values.max();
    let min_sigma = singular_values.min();
    Some(max_sigma / min_sigma)
}

/// Warns and returns `true` when cond(A) exceeds `threshold`: the solution is
/// then sensitive to small changes of the input.
pub fn poorly_conditioned(coeffs: &Matrix, threshold: f64) -> bool {
    let Some(condition_number) = condition_number(&coeffs.to_dmatrix()) else {
        return false;
    };
    let poorly_conditioned = condition_number > threshold;
    if poorly_conditioned {
        warn!(
            "The system of linear equations is poorly conditioned. Condition number = {:.2}",
            condition_number
        );
    }
    poorly_conditioned
}
