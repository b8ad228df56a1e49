#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
/// turns a String expression into an expression tree
///
///# Example
/// ```
/// use RustedCalc::symbolic::parse_expr::parse;
/// use RustedCalc::symbolic::symbolic_engine::{AngleMode, EvalContext};
/// let expr = parse("3sin(x)^2 + 1").unwrap();
/// let ctx = EvalContext::new(AngleMode::Degrees).with_variable("x", 30.0);
/// let value = expr.evaluate(&ctx).unwrap();
/// assert!((value - 1.75).abs() < 1e-12);
/// ```
pub mod parse_expr;
/// # Symbolic engine
/// the expression tree, the evaluation context (variable bindings and angle mode)
/// and the tree-walking evaluator
pub mod symbolic_engine;
/// named functions (sin, cos, ..., abs) and constants (pi, e)
pub mod function_table;
/// table of textual rules for derivatives and antiderivatives of simple expressions
///
///# Example
/// ```
/// use RustedCalc::symbolic::symbolic_patterns::{derivative, indefinite_integral};
/// assert_eq!(derivative("x^3"), "3*x^2");
/// assert_eq!(indefinite_integral("cos(x)"), "sin(x)");
/// ```
pub mod symbolic_patterns;
/// bracket checks and whitespace handling
pub mod utils;
