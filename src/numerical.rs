//! numerical methods built on top of the expression evaluator
/// definite integrals by the composite Simpson's rule
///
///# Example
/// ```
/// use RustedCalc::numerical::integration::integrate_definite;
/// use RustedCalc::symbolic::parse_expr::parse;
/// use RustedCalc::symbolic::symbolic_engine::{AngleMode, EvalContext};
/// let expr = parse("x^2").unwrap();
/// let area = integrate_definite(&expr, "x", 0.0, 3.0, &EvalContext::new(AngleMode::Radians)).unwrap();
/// assert!((area - 9.0).abs() < 1e-9);
/// ```
pub mod integration;
/// evaluate an expression on a grid, with gap markers where the value is not finite
pub mod sampler;
