//! Text rendering of calculator results.
use crate::somelinalg::matrix::Matrix;
use tabled::builder::Builder;
use tabled::settings::Style;

/// Display form of a scalar result.
///
/// Very large (`|r| > 1e10`) or very small non-zero (`|r| < 1e-6`) values use
/// exponential notation with 6 fractional digits (`1.234568e+10`); anything else
/// is rounded to 10 decimals with trailing zeros dropped.
pub fn format_result(r: f64) -> String {
    if r.is_nan() {
        return "NaN".to_string();
    }
    if r.is_infinite() {
        return if r > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if r.abs() > 1e10 || (r.abs() < 1e-6 && r != 0.0) {
        let s = format!("{:.6e}", r);
        return match s.split_once('e') {
            Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
            _ => s,
        };
    }
    let s = format!("{:.10}", r);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" { "0".to_string() } else { s.to_string() }
}

/// unknown names for a solution vector: x, y, z, w, v, then x6, x7, ...
pub fn variable_names(n: usize) -> Vec<String> {
    const NAMES: [&str; 5] = ["x", "y", "z", "w", "v"];
    (0..n)
        .map(|i| match NAMES.get(i) {
            Some(name) => name.to_string(),
            None => format!("x{}", i + 1),
        })
        .collect()
}

/// `name = value` lines with 6 decimals
pub fn format_solution(solution: &[f64]) -> Vec<String> {
    variable_names(solution.len())
        .into_iter()
        .zip(solution)
        .map(|(name, value)| format!("{} = {:.6}", name, value))
        .collect()
}

pub fn format_determinant(det: f64) -> String {
    format!("{:.4}", det)
}

/// matrix cells with 2 decimals, row by row
pub fn format_matrix_cells(m: &Matrix) -> Vec<Vec<String>> {
    (0..m.rows())
        .map(|i| m.row(i).iter().map(|v| format!("{:.2}", v)).collect())
        .collect()
}

pub fn matrix_table(m: &Matrix) -> String {
    let mut builder = Builder::default();
    for row in format_matrix_cells(m) {
        builder.push_record(row);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}
