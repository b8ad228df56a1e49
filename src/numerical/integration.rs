//! Definite integrals by the composite Simpson's rule.
//!
//! For `n` (even) subintervals of width `h = (b - a) / n`:
//!
//! ```text
//!  ∫ f dx ≈ h/3 * ( f(x0) + 4 f(x1) + 2 f(x2) + 4 f(x3) + ... + 4 f(x_{n-1}) + f(xn) )
//! ```
//!
//! Reversed limits give a negative `h`, so `∫_a^b = -∫_b^a` falls out of the
//! formula without special handling, and `a == b` gives exactly zero.
use crate::calc_errors::{CalcError, InvalidRangeError};
use crate::symbolic::symbolic_engine::{EvalContext, Expr};
use log::{debug, warn};

/// fixed number of subintervals used by the calculator
pub const SIMPSON_SUBINTERVALS: usize = 1000;

fn check_limits(a: f64, b: f64) -> Result<(), InvalidRangeError> {
    if !a.is_finite() || !b.is_finite() {
        return Err(InvalidRangeError::new(format!(
            "integration limits must be finite numbers, got [{}, {}]",
            a, b
        )));
    }
    Ok(())
}

/// Composite Simpson's rule for any fallible integrand.
/// `n` must be even and non-zero; the integrand must stay finite on every node.
pub fn simpson<F>(mut f: F, a: f64, b: f64, n: usize) -> Result<f64, CalcError>
where
    F: FnMut(f64) -> Result<f64, CalcError>,
{
    check_limits(a, b)?;
    if n == 0 || n % 2 != 0 {
        return Err(InvalidRangeError::new(format!(
            "Simpson's rule needs an even, non-zero number of subintervals, got {}",
            n
        ))
        .into());
    }
    let h = (b - a) / (n as f64);
    let mut sum = 0.0;
    for i in 0..=n {
        // the last node is b itself, not a + n*h with its rounding error
        let x = if i == n { b } else { a + (i as f64) * h };
        let y = f(x)?;
        if !y.is_finite() {
            warn!("integrand is not finite at x = {} (value {})", x, y);
            return Err(InvalidRangeError::new(format!(
                "integrand is not finite at x = {}",
                x
            ))
            .into());
        }
        let weight = if i == 0 || i == n {
            1.0
        } else if i % 2 == 1 {
            4.0
        } else {
            2.0
        };
        sum += weight * y;
    }
    let result = (h / 3.0) * sum;
    debug!("Simpson's rule on [{}, {}] with n = {}: {}", a, b, n, result);
    Ok(result)
}

/// Integrate `expr` over `var` from `a` to `b` with `SIMPSON_SUBINTERVALS` subintervals.
pub fn integrate_definite(
    expr: &Expr,
    var: &str,
    a: f64,
    b: f64,
    ctx: &EvalContext,
) -> Result<f64, CalcError> {
    let mut f = expr.lambdify1D(var, ctx);
    simpson(|x| f(x).map_err(CalcError::from), a, b, SIMPSON_SUBINTERVALS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc_errors::EvalError;
    use crate::symbolic::parse_expr::parse;
    use crate::symbolic::symbolic_engine::AngleMode;
    use approx::assert_relative_eq;
    use gauss_quad::GaussLegendre;
    use std::f64::consts::PI;

    fn integrate(text: &str, a: f64, b: f64) -> Result<f64, CalcError> {
        let expr = parse(text).unwrap();
        integrate_definite(&expr, "x", a, b, &EvalContext::new(AngleMode::Radians))
    }

    #[test]
    fn test_numerical_integration_simpson() {
        assert_relative_eq!(integrate("x^2", 0.0, 1.0).unwrap(), 1.0 / 3.0, epsilon = 1e-4);
        // Simpson is exact for cubics up to rounding
        assert_relative_eq!(integrate("x^3 - 2x", -1.0, 2.0).unwrap(), 0.75, epsilon = 1e-10);
        assert_relative_eq!(integrate("sin(x)", 0.0, PI).unwrap(), 2.0, epsilon = 1e-10);
        assert_relative_eq!(integrate("exp(x)", 0.0, 1.0).unwrap(), std::f64::consts::E - 1.0, epsilon = 1e-10);
    }

    #[test]
    fn test_reversed_limits_negate() {
        let forward = integrate("x^2", 0.0, 1.0).unwrap();
        let backward = integrate("x^2", 1.0, 0.0).unwrap();
        assert_relative_eq!(forward, -backward, epsilon = 1e-12);
        assert_eq!(integrate("x^2", 2.0, 2.0).unwrap(), 0.0);
    }

    #[test]
    fn test_agrees_with_gauss_legendre() {
        let quad = GaussLegendre::new(20).unwrap();
        let expected = quad.integrate(0.5, 3.0, |x| x.ln() * x.cos());
        let simpson_value = integrate("ln(x)*cos(x)", 0.5, 3.0).unwrap();
        assert_relative_eq!(simpson_value, expected, epsilon = 1e-8);
    }

    #[test]
    fn test_non_finite_limits_are_rejected() {
        let err = integrate("x", 0.0, f64::INFINITY).unwrap_err();
        assert!(matches!(err, CalcError::InvalidRange(_)));
        assert!(integrate("x", f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_non_finite_integrand_is_reported() {
        let err = integrate("1/x", 0.0, 1.0).unwrap_err();
        match err {
            CalcError::InvalidRange(e) => assert!(e.reason.contains("x = 0")),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_unknown_identifier_propagates() {
        let err = integrate("x*k", 0.0, 1.0).unwrap_err();
        assert_eq!(err, CalcError::Eval(EvalError::UnknownIdentifier("k".to_string())));
    }

    #[test]
    fn test_odd_subinterval_count_is_rejected() {
        let res = simpson(|x| Ok(x), 0.0, 1.0, 3);
        assert!(res.is_err());
        let res = simpson(|x| Ok(x), 0.0, 1.0, 2).unwrap();
        assert_relative_eq!(res, 0.5, epsilon = 1e-15);
    }
}
