#![allow(non_snake_case)]
use RustedCalc::Utils::formatting::{format_determinant, format_result, format_solution, matrix_table};
use RustedCalc::Utils::history::CalcHistory;
use RustedCalc::Utils::logger::{init_logger, save_series_to_csv};
use RustedCalc::Utils::plots::{Viewport, plot_series_png};
use RustedCalc::Utils::settings_parser::CalcSettings;
use RustedCalc::calc_api::*;
use RustedCalc::somelinalg::matrix::Matrix;
use RustedCalc::symbolic::symbolic_engine::{AngleMode, EvalContext};
use std::path::Path;

fn main() {
    let example = 0;
    if let Err(e) = init_logger("info", None) {
        eprintln!("{}", e);
    }
    match example {
        0 => {
            // EXPRESSIONS: implicit multiplication, constants, angle modes
            let mut history = CalcHistory::new();
            let ctx = EvalContext::new(AngleMode::Degrees);
            for input in ["2+3*4", "sin(90)", "2pi", "sqrt(2)(1+1)", "1/0", "10^11"] {
                match parse_and_evaluate(input, &ctx) {
                    Ok(value) => {
                        println!("{} = {}", input, format_result(value));
                        history.push(input, value);
                    }
                    Err(e) => println!("{}: {}", input, e),
                }
            }
            let ctx = ctx.with_variable("x", 2.0);
            let value = parse_and_evaluate("2x+3(x-1)", &ctx);
            println!("2x+3(x-1) at x = 2: {:?}", value);
            // errors are values
            for bad in ["(2+3", "2+", "foo(1)", "y+1"] {
                println!("{}: {}", bad, parse_and_evaluate(bad, &ctx).unwrap_err());
            }
            println!("{}", history.to_table());
        }
        1 => {
            // LINEAR SYSTEM
            let a = Matrix::from_rows(&[
                vec![2.0, 1.0, -1.0],
                vec![-3.0, -1.0, 2.0],
                vec![-2.0, 1.0, 2.0],
            ])
            .unwrap();
            let b = [8.0, -11.0, -3.0];
            match solve_linear_system(&a, &b) {
                Ok(solution) => format_solution(&solution)
                    .iter()
                    .for_each(|line| println!("{}", line)),
                Err(e) => println!("{}", e),
            }
            let singular = Matrix::from_rows(&[vec![1.0, 2.0], vec![2.0, 4.0]]).unwrap();
            println!("{:?}", solve_linear_system(&singular, &[1.0, 5.0]));
        }
        2 => {
            // MATRICES
            let a = Matrix::from_rows(&[vec![4.0, 7.0], vec![2.0, 6.0]]).unwrap();
            let b = Matrix::from_rows(&[vec![1.0, 0.5], vec![-1.0, 3.0]]).unwrap();
            println!("A + B\n{}", matrix_table(&matrix_add(&a, &b).unwrap()));
            println!("A * B\n{}", matrix_table(&matrix_multiply(&a, &b).unwrap()));
            println!("A^T\n{}", matrix_table(&matrix_transpose(&a)));
            println!("det(A) = {}", format_determinant(matrix_determinant(&a).unwrap()));
            println!("A^-1\n{}", matrix_table(&matrix_inverse(&a).unwrap()));
        }
        3 => {
            // CALCULUS
            for f in ["x^3", "sin(x)", "5x", "ln(x)", "x^2+sin(x)"] {
                println!("d/dx {} = {}", f, derivative(f));
                println!("∫ {} dx = {} + C", f, indefinite_integral(f));
            }
            println!("∫_0^1 x^2 dx = {:?}", integrate_definite("x^2", 0.0, 1.0));
            println!("∫_0^pi sin(x) dx = {:?}", integrate_definite("sin(x)", 0.0, std::f64::consts::PI));
        }
        4 => {
            // PLOTTING with settings
            let settings = CalcSettings::parse(
                "
                angle_mode: rad
                x_min: -6.28
                x_max: 6.28
                y_min: -3
                y_max: 3
                step_count: 800
                ",
            )
            .unwrap();
            let request = settings.plot_request(vec![
                "sin(x)".to_string(),
                "tan(x)".to_string(),
                "".to_string(),
                "ln(x)".to_string(),
            ]);
            let series = request.sample_all().unwrap();
            for s in &series {
                println!("{} ({}): {} samples, {} gaps", s.expression, s.color(), s.len(), s.gap_count());
            }
            let viewport: Viewport = settings.viewport().unwrap();
            plot_series_png(&series, &viewport, Path::new("plot.png"), (800, 600), true).unwrap();
            save_series_to_csv(&series, Path::new("plot.csv")).unwrap();
        }
        _ => {
            println!("example not found");
        }
    }
}
