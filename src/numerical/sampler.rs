//! Function sampler feeding the plotter.
//!
//! An expression is evaluated on an evenly spaced grid. Wherever the value is
//! not finite (poles such as `tan(x)` at π/2, `ln(x)` for x ≤ 0, `1/x` at 0) a
//! `Sample::Gap` is emitted instead of a point, so a renderer breaks the curve
//! there rather than drawing a spurious vertical connector.
use crate::calc_errors::{CalcError, InvalidRangeError};
use crate::symbolic::parse_expr::parse;
use crate::symbolic::symbolic_engine::{AngleMode, EvalContext, Expr};
use log::{debug, info};

/// at most this many curves per plot request
pub const MAX_PLOT_EXPRESSIONS: usize = 5;

/// one sample per pixel column of an 800 px canvas
pub const DEFAULT_STEP_COUNT: usize = 800;

/// Colour palette; series `i` takes `PALETTE[i % PALETTE.len()]`.
pub const PALETTE: [&str; 10] = [
    "#1FB8CD", "#FFC185", "#B4413C", "#ECEBD5", "#5D878F", "#DB4545", "#D2BA4C", "#964325",
    "#944454", "#13343B",
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sample {
    Point { x: f64, y: f64 },
    /// the function is undefined / non-finite at this x
    Gap { x: f64 },
}

impl Sample {
    pub fn x(&self) -> f64 {
        match self {
            Sample::Point { x, .. } | Sample::Gap { x } => *x,
        }
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Sample::Gap { .. })
    }
}

/// Sampled curve of one expression together with its colour slot.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub expression: String,
    pub color_index: usize,
    samples: Vec<Sample>,
}

impl Series {
    pub fn new(expression: &str, color_index: usize, samples: Vec<Sample>) -> Self {
        Series {
            expression: expression.to_string(),
            color_index: color_index % PALETTE.len(),
            samples,
        }
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn color(&self) -> &'static str {
        PALETTE[self.color_index]
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn gap_count(&self) -> usize {
        self.samples.iter().filter(|s| s.is_gap()).count()
    }

    /// finite (x, y) pairs only
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .filter_map(|s| match s {
                Sample::Point { x, y } => Some((*x, *y)),
                Sample::Gap { .. } => None,
            })
            .collect()
    }

    /// Maximal runs of consecutive points; each run is drawn as one polyline.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for sample in &self.samples {
            match sample {
                Sample::Point { x, y } => current.push((*x, *y)),
                Sample::Gap { .. } => {
                    if !current.is_empty() {
                        segments.push(std::mem::take(&mut current));
                    }
                }
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }
}

impl IntoIterator for Series {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.into_iter()
    }
}

/// `num_values` evenly spaced values from `start` to `end` inclusive
pub fn linspace(start: f64, end: f64, num_values: usize) -> Vec<f64> {
    match num_values {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (num_values - 1) as f64;
            (0..num_values)
                .map(|i| if i == num_values - 1 { end } else { start + i as f64 * step })
                .collect()
        }
    }
}

/// Evaluate `expr` at `step_count` points of `[x_min, x_max]`, binding each to `var`.
pub fn sample(
    expr: &Expr,
    var: &str,
    x_min: f64,
    x_max: f64,
    step_count: usize,
    ctx: &EvalContext,
) -> Result<Vec<Sample>, CalcError> {
    if !x_min.is_finite() || !x_max.is_finite() {
        return Err(InvalidRangeError::new(format!(
            "sampling range must be finite, got [{}, {}]",
            x_min, x_max
        ))
        .into());
    }
    let mut f = expr.lambdify1D(var, ctx);
    let mut samples = Vec::with_capacity(step_count);
    for x in linspace(x_min, x_max, step_count) {
        let y = f(x)?;
        if y.is_finite() {
            samples.push(Sample::Point { x, y });
        } else {
            samples.push(Sample::Gap { x });
        }
    }
    debug!(
        "sampled {} on [{}, {}]: {} values, {} gaps",
        expr,
        x_min,
        x_max,
        samples.len(),
        samples.iter().filter(|s| s.is_gap()).count()
    );
    Ok(samples)
}

/// Everything needed to sample the curves of one plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotRequest {
    /// expression texts; blank entries are skipped but keep their colour slot
    pub expressions: Vec<String>,
    pub x_min: f64,
    pub x_max: f64,
    pub step_count: usize,
    pub angle_mode: AngleMode,
    pub variable: String,
}

impl Default for PlotRequest {
    fn default() -> Self {
        PlotRequest {
            expressions: Vec::new(),
            x_min: -10.0,
            x_max: 10.0,
            step_count: DEFAULT_STEP_COUNT,
            angle_mode: AngleMode::Radians,
            variable: "x".to_string(),
        }
    }
}

impl PlotRequest {
    pub fn new(expressions: Vec<String>, x_min: f64, x_max: f64, step_count: usize) -> Self {
        PlotRequest {
            expressions,
            x_min,
            x_max,
            step_count,
            ..PlotRequest::default()
        }
    }

    /// Parse and sample every non-blank expression.
    pub fn sample_all(&self) -> Result<Vec<Series>, CalcError> {
        if self.expressions.len() > MAX_PLOT_EXPRESSIONS {
            return Err(InvalidRangeError::new(format!(
                "at most {} functions can be plotted together, got {}",
                MAX_PLOT_EXPRESSIONS,
                self.expressions.len()
            ))
            .into());
        }
        let ctx = EvalContext::new(self.angle_mode);
        let mut all_series = Vec::new();
        for (index, text) in self.expressions.iter().enumerate() {
            let text = text.trim();
            if text.is_empty() {
                continue;
            }
            let expr = parse(text)?;
            let samples = sample(
                &expr,
                &self.variable,
                self.x_min,
                self.x_max,
                self.step_count,
                &ctx,
            )?;
            all_series.push(Series::new(text, index, samples));
        }
        info!("plot request sampled: {} series", all_series.len());
        Ok(all_series)
    }
}
