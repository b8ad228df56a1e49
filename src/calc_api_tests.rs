#[cfg(test)]
mod tests {
    use crate::calc_api::*;
    use crate::calc_errors::{CalcError, EvalError, MatrixError};
    use crate::numerical::sampler::Sample;
    use crate::somelinalg::matrix::Matrix;
    use crate::symbolic::symbolic_engine::{AngleMode, EvalContext};
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn deg() -> EvalContext {
        EvalContext::new(AngleMode::Degrees)
    }

    fn rad() -> EvalContext {
        EvalContext::new(AngleMode::Radians)
    }

    #[test]
    fn test_angle_modes() {
        assert_relative_eq!(parse_and_evaluate("sin(90)", &deg()).unwrap(), 1.0, epsilon = 1e-9);
        assert_relative_eq!(
            parse_and_evaluate("sin(90)", &rad()).unwrap(),
            0.8939966636,
            epsilon = 1e-9
        );
        assert_relative_eq!(parse_and_evaluate("asin(1)", &deg()).unwrap(), 90.0, epsilon = 1e-9);
        assert_relative_eq!(parse_and_evaluate("cos(pi)", &rad()).unwrap(), -1.0, epsilon = 1e-12);
        // mode-independent functions
        assert_eq!(
            parse_and_evaluate("sqrt(16)+log(100)", &deg()).unwrap(),
            parse_and_evaluate("sqrt(16)+log(100)", &rad()).unwrap()
        );
    }

    #[test]
    fn test_ieee_results_are_not_errors() {
        assert_eq!(parse_and_evaluate("1/0", &deg()).unwrap(), f64::INFINITY);
        assert_eq!(parse_and_evaluate("-1/0", &deg()).unwrap(), f64::NEG_INFINITY);
        assert!(parse_and_evaluate("0/0", &deg()).unwrap().is_nan());
        assert!(parse_and_evaluate("sqrt(-1)", &deg()).unwrap().is_nan());
    }

    #[test]
    fn test_implicit_multiplication() {
        let ctx = rad().with_variable("x", 2.0);
        assert_eq!(parse_and_evaluate("2x+3(x-1)", &ctx).unwrap(), 7.0);
        assert_eq!(parse_and_evaluate("(x+1)(x-1)", &ctx).unwrap(), 3.0);
        assert_relative_eq!(parse_and_evaluate("2pi", &ctx).unwrap(), 2.0 * std::f64::consts::PI);
    }

    #[test]
    fn test_error_classification() {
        assert!(matches!(parse_and_evaluate("2+", &deg()), Err(CalcError::Parse(_))));
        assert!(matches!(parse_and_evaluate("(2+3", &deg()), Err(CalcError::Parse(_))));
        assert!(matches!(parse_and_evaluate("foo(2)", &deg()), Err(CalcError::Parse(_))));
        assert!(matches!(parse_and_evaluate("", &deg()), Err(CalcError::Parse(_))));
        assert_eq!(
            parse_and_evaluate("x+1", &deg()).unwrap_err(),
            CalcError::Eval(EvalError::UnknownIdentifier("x".to_string()))
        );
    }

    #[test]
    fn test_linear_system() {
        let a = Matrix::from_rows(&[vec![2.0, 1.0], vec![1.0, 3.0]]).unwrap();
        let x = solve_linear_system(&a, &[5.0, 10.0]).unwrap();
        assert_relative_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 3.0, epsilon = 1e-12);

        let singular = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
        assert!(matches!(
            solve_linear_system(&singular, &[1.0, 2.0]),
            Err(CalcError::Matrix(MatrixError::Singular(_)))
        ));
    }

    #[test]
    fn test_linear_system_with_non_finite_coefficients() {
        let a = Matrix::from_rows(&[vec![f64::INFINITY, 0.0], vec![0.0, 1.0]]).unwrap();
        let x = solve_linear_system(&a, &[1.0, 2.0]).unwrap();
        assert_eq!(x, vec![0.0, 2.0]);

        let a = Matrix::from_rows(&[vec![f64::NAN, 0.0], vec![0.0, 1.0]]).unwrap();
        let x = solve_linear_system(&a, &[1.0, 2.0]).unwrap();
        assert!(x.iter().all(|v| v.is_nan()));

        let a = Matrix::from_rows(&[vec![0.0, f64::NAN], vec![0.0, 1.0]]).unwrap();
        assert!(matches!(
            solve_linear_system(&a, &[1.0, 2.0]),
            Err(CalcError::Matrix(MatrixError::Singular(_)))
        ));
    }

    #[test]
    fn test_matrix_facade() {
        let a = Matrix::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0]]).unwrap();
        let b = Matrix::identity(2).unwrap();
        assert_eq!(matrix_multiply(&a, &b).unwrap(), a);
        assert_eq!(matrix_subtract(&matrix_add(&a, &b).unwrap(), &b).unwrap(), a);
        assert_eq!(matrix_transpose(&matrix_transpose(&a)), a);
        assert_eq!(matrix_determinant(&a).unwrap(), -2.0);
        let inv = matrix_inverse(&a).unwrap();
        assert_relative_eq!(inv[(0, 0)], -2.0, epsilon = 1e-12);
        assert_relative_eq!(inv[(1, 1)], -0.5, epsilon = 1e-12);
        let row = Matrix::from_rows(&[vec![1.0, 2.0]]).unwrap();
        assert!(matches!(
            matrix_add(&a, &row),
            Err(CalcError::Matrix(MatrixError::DimensionMismatch(_)))
        ));
    }

    #[test]
    fn test_large_determinant_uses_lu() {
        let mut rng = StdRng::seed_from_u64(99);
        let n = COFACTOR_MAX_DIM + 2;
        let values: Vec<f64> = (0..n * n).map(|_| rng.random_range(-1.0..1.0)).collect();
        let a = Matrix::from_row_slice(n, n, &values).unwrap();
        let det = matrix_determinant(&a).unwrap();
        let expected = a.to_dmatrix().determinant();
        assert_relative_eq!(det, expected, max_relative = 1e-9, epsilon = 1e-12);
        // scaled identity: det(2I) = 2^n
        let mut diag = Matrix::identity(n).unwrap();
        for i in 0..n {
            diag[(i, i)] = 2.0;
        }
        assert_relative_eq!(matrix_determinant(&diag).unwrap(), 2f64.powi(n as i32), epsilon = 1e-9);
    }

    #[test]
    fn test_large_inverse_uses_lu() {
        let n = COFACTOR_MAX_DIM + 3;
        let mut a = Matrix::zeros(n, n).unwrap();
        for i in 0..n {
            for j in 0..n {
                a[(i, j)] = if i == j { n as f64 } else { 1.0 / (1.0 + i as f64 + j as f64) };
            }
        }
        let inv = matrix_inverse(&a).unwrap();
        let product = matrix_multiply(&a, &inv).unwrap();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_relative_eq!(product[(i, j)], expected, epsilon = 1e-10);
            }
        }
        let zero = Matrix::zeros(n, n).unwrap();
        assert!(matches!(
            matrix_inverse(&zero),
            Err(CalcError::Matrix(MatrixError::Singular(_)))
        ));
    }

    #[test]
    fn test_calculus_facade() {
        assert_relative_eq!(integrate_definite("x^2", 0.0, 1.0).unwrap(), 1.0 / 3.0, epsilon = 1e-4);
        assert_eq!(derivative("x^3"), "3*x^2");
        assert_eq!(derivative("sin(x)"), "cos(x)");
        assert_eq!(indefinite_integral("cos(x)"), "sin(x)");
        assert!(matches!(integrate_definite("x^2", 0.0, f64::NAN), Err(CalcError::InvalidRange(_))));
        assert!(matches!(integrate_definite("x^", 0.0, 1.0), Err(CalcError::Parse(_))));
        // degrees change the integrand: ∫ sin(x°) dx over [0, 180] = 360/π
        let value = integrate_definite_with_context("sin(t)", "t", 0.0, 180.0, &deg()).unwrap();
        assert_relative_eq!(value, 360.0 / std::f64::consts::PI, epsilon = 1e-8);
    }

    #[test]
    fn test_sample_function() {
        let series = sample_function("1/x", -1.0, 1.0, 201).unwrap();
        assert_eq!(series.len(), 201);
        assert_eq!(series.gap_count(), 1);
        assert_eq!(series.samples()[100], Sample::Gap { x: 0.0 });
        assert_eq!(series.segments().len(), 2);

        let log_series = sample_function("ln(x)", -1.0, 1.0, 5).unwrap();
        // ln(0) = -inf and ln of negatives is NaN: both are gaps
        assert_eq!(log_series.gap_count(), 3);

        assert!(matches!(sample_function("sin(", 0.0, 1.0, 10), Err(CalcError::Parse(_))));
        assert!(sample_function("x", 0.0, 1.0, 0).unwrap().is_empty());
    }
}
