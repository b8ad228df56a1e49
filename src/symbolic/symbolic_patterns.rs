//! Best-effort symbolic derivative and antiderivative for single-variable input.
//!
//! This is NOT a general differentiator or integrator: the whitespace-stripped
//! input is matched against a small table of textual rules (power rule, linear
//! and constant terms, and fixed entries for sin, cos, tan, e^x, exp(x), ln(x),
//! log(x), 1/x). Anything else returns a fixed message telling the user to fall
//! back to numeric methods (`numerical::integration` for definite integrals).
//!
//! Every rule output is itself valid input for `parse_expr::parse`, so a result
//! can be evaluated or plotted directly.
use crate::symbolic::utils::strip_whitespace;
use regex::Regex;
use std::sync::LazyLock;

pub const DERIVATIVE_FALLBACK: &str = "Derivative computed (use numerical methods for evaluation)";
pub const INTEGRAL_FALLBACK: &str = "Integral computed (use numerical methods for evaluation)";

static POWER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^x\^(\d+)$").unwrap());
static LINEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)\*?x$").unwrap());
static CONSTANT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)$").unwrap());

/// (input, derivative)
const DERIVATIVE_TABLE: [(&str, &str); 8] = [
    ("sin(x)", "cos(x)"),
    ("cos(x)", "-sin(x)"),
    ("tan(x)", "1/cos(x)^2"),
    ("e^x", "e^x"),
    ("exp(x)", "exp(x)"),
    ("ln(x)", "1/x"),
    ("log(x)", "1/(x*ln(10))"),
    ("1/x", "-1/x^2"),
];

/// (input, antiderivative without the constant of integration)
const INTEGRAL_TABLE: [(&str, &str); 8] = [
    ("sin(x)", "-cos(x)"),
    ("cos(x)", "sin(x)"),
    ("tan(x)", "-ln(abs(cos(x)))"),
    ("e^x", "e^x"),
    ("exp(x)", "exp(x)"),
    ("ln(x)", "x*ln(x)-x"),
    ("log(x)", "(x*ln(x)-x)/ln(10)"),
    ("1/x", "ln(abs(x))"),
];

fn lookup(table: &[(&str, &'static str)], expr: &str) -> Option<String> {
    table
        .iter()
        .find(|(input, _)| *input == expr)
        .map(|(_, output)| output.to_string())
}

/// derivative of `text` if one of the rules applies
pub fn derivative_rule(text: &str) -> Option<String> {
    let expr = strip_whitespace(text);
    if let Some(caps) = POWER.captures(&expr) {
        let n: u64 = caps[1].parse().ok()?;
        return Some(match n {
            0 => "0".to_string(),
            1 => "1".to_string(),
            2 => "2*x".to_string(),
            _ => format!("{}*x^{}", n, n - 1),
        });
    }
    if let Some(caps) = LINEAR.captures(&expr) {
        return Some(caps[1].to_string());
    }
    if CONSTANT.is_match(&expr) {
        return Some("0".to_string());
    }
    if expr == "x" {
        return Some("1".to_string());
    }
    lookup(&DERIVATIVE_TABLE, &expr)
}

/// antiderivative of `text` if one of the rules applies
pub fn integral_rule(text: &str) -> Option<String> {
    let expr = strip_whitespace(text);
    if let Some(caps) = POWER.captures(&expr) {
        let n: u64 = caps[1].parse().ok()?;
        let m = n.checked_add(1)?;
        return Some(format!("x^{}/{}", m, m));
    }
    if expr == "x" {
        return Some("x^2/2".to_string());
    }
    if let Some(caps) = CONSTANT.captures(&expr) {
        return Some(format!("{}*x", &caps[1]));
    }
    if let Some(caps) = LINEAR.captures(&expr) {
        return Some(format!("{}*x^2/2", &caps[1]));
    }
    lookup(&INTEGRAL_TABLE, &expr)
}

pub fn derivative(text: &str) -> String {
    derivative_rule(text).unwrap_or_else(|| DERIVATIVE_FALLBACK.to_string())
}

pub fn indefinite_integral(text: &str) -> String {
    integral_rule(text).unwrap_or_else(|| INTEGRAL_FALLBACK.to_string())
}
