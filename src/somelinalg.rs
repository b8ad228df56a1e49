//! some linear algebra functions used throughout the code
#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// dense row-major matrix with checked construction
pub mod matrix;
/// add, subtract, multiply, transpose, cofactor determinant and adjugate inverse
pub mod matrix_algebra;
/// Gaussian elimination with partial pivoting
pub mod gauss_solver;
/// diagnostics for linear systems and matrices: if it is singular
/// or poorly conditioned
pub mod linear_sys_diagnostics;
