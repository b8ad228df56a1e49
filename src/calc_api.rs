//! # Calculator API
//!
//! Entry points for a user interface: every function takes plain strings,
//! numbers or `Matrix` values and returns a value or a `CalcError`. Nothing here
//! keeps state between calls.
//!
//! # Example
//! ```
//! use RustedCalc::calc_api::{parse_and_evaluate, solve_linear_system, derivative};
//! use RustedCalc::somelinalg::matrix::Matrix;
//! use RustedCalc::symbolic::symbolic_engine::{AngleMode, EvalContext};
//!
//! let ctx = EvalContext::new(AngleMode::Degrees);
//! assert!((parse_and_evaluate("sin(90)", &ctx).unwrap() - 1.0).abs() < 1e-12);
//!
//! let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
//! let x = solve_linear_system(&a, &[5.0, 10.0]).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12 && (x[1] - 3.0).abs() < 1e-12);
//!
//! assert_eq!(derivative("x^3"), "3*x^2");
//! ```
use crate::calc_errors::CalcError;
use crate::numerical::integration;
use crate::numerical::sampler::{self, Series};
use crate::somelinalg::gauss_solver;
use crate::somelinalg::linear_sys_diagnostics::poorly_conditioned;
use crate::somelinalg::matrix::Matrix;
use crate::somelinalg::matrix_algebra;
use crate::symbolic::parse_expr::parse;
use crate::symbolic::symbolic_engine::{AngleMode, EvalContext};
use crate::symbolic::symbolic_patterns;
use log::info;

/// largest size for which `matrix_determinant` and `matrix_inverse` use cofactor expansion
pub const COFACTOR_MAX_DIM: usize = 8;

/// condition numbers above this get a warning from `solve_linear_system`
pub const CONDITION_WARNING_THRESHOLD: f64 = 1e12;

/// integration and sampling variable of the facade functions
pub const DEFAULT_VARIABLE: &str = "x";

/// Parse `text` and evaluate it against `ctx`.
pub fn parse_and_evaluate(text: &str, ctx: &EvalContext) -> Result<f64, CalcError> {
    let expr = parse(text)?;
    let value = expr.evaluate(ctx)?;
    info!("{} = {} ({})", text, value, ctx.angle_mode);
    Ok(value)
}

/// Gaussian elimination with partial pivoting.
pub fn solve_linear_system(coeffs: &Matrix, constants: &[f64]) -> Result<Vec<f64>, CalcError> {
    let solution = gauss_solver::solve(coeffs, constants)?;
    poorly_conditioned(coeffs, CONDITION_WARNING_THRESHOLD);
    Ok(solution)
}

pub fn matrix_add(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    Ok(matrix_algebra::add(a, b)?)
}

pub fn matrix_subtract(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    Ok(matrix_algebra::subtract(a, b)?)
}

pub fn matrix_multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, CalcError> {
    Ok(matrix_algebra::multiply(a, b)?)
}

pub fn matrix_transpose(a: &Matrix) -> Matrix {
    matrix_algebra::transpose(a)
}

/// Cofactor expansion up to `COFACTOR_MAX_DIM`, LU decomposition above it.
pub fn matrix_determinant(a: &Matrix) -> Result<f64, CalcError> {
    let det = if a.rows() <= COFACTOR_MAX_DIM {
        matrix_algebra::determinant(a)?
    } else {
        matrix_algebra::determinant_lu(a)?
    };
    Ok(det)
}

/// Adjugate inverse up to `COFACTOR_MAX_DIM`, LU inverse above it; singular when `|det| < 1e-10`.
pub fn matrix_inverse(a: &Matrix) -> Result<Matrix, CalcError> {
    let inv = if a.rows() <= COFACTOR_MAX_DIM {
        matrix_algebra::inverse(a)?
    } else {
        matrix_algebra::inverse_lu(a)?
    };
    Ok(inv)
}

/// Best-effort symbolic derivative in `x`; a fixed message when no rule applies.
pub fn derivative(text: &str) -> String {
    symbolic_patterns::derivative(text)
}

/// Best-effort antiderivative in `x`; a fixed message when no rule applies.
pub fn indefinite_integral(text: &str) -> String {
    symbolic_patterns::indefinite_integral(text)
}

/// Simpson's rule over `x` from `a` to `b`, trigonometry in radians.
pub fn integrate_definite(text: &str, a: f64, b: f64) -> Result<f64, CalcError> {
    integrate_definite_with_context(
        text,
        DEFAULT_VARIABLE,
        a,
        b,
        &EvalContext::new(AngleMode::Radians),
    )
}

pub fn integrate_definite_with_context(
    text: &str,
    var: &str,
    a: f64,
    b: f64,
    ctx: &EvalContext,
) -> Result<f64, CalcError> {
    let expr = parse(text)?;
    let value = integration::integrate_definite(&expr, var, a, b, ctx)?;
    info!("integral of {} over [{}, {}] = {}", text, a, b, value);
    Ok(value)
}

/// Sample `text` over `x` at `step_count` points, trigonometry in radians.
pub fn sample_function(
    text: &str,
    x_min: f64,
    x_max: f64,
    step_count: usize,
) -> Result<Series, CalcError> {
    sample_function_with_context(
        text,
        DEFAULT_VARIABLE,
        x_min,
        x_max,
        step_count,
        &EvalContext::new(AngleMode::Radians),
    )
}

pub fn sample_function_with_context(
    text: &str,
    var: &str,
    x_min: f64,
    x_max: f64,
    step_count: usize,
    ctx: &EvalContext,
) -> Result<Series, CalcError> {
    let expr = parse(text)?;
    let samples = sampler::sample(&expr, var, x_min, x_max, step_count, ctx)?;
    Ok(Series::new(text.trim(), 0, samples))
}
