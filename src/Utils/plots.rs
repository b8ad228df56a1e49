//! Plot geometry and PNG rendering of sampled curves.
//!
//! `Viewport` maps world coordinates to pixels of a `width x height` canvas with
//! the y axis flipped (pixel row 0 is the top edge). Grid spacing comes from
//! `nice_step`, which rounds a raw step to 1, 2 or 5 times a power of ten.
use crate::calc_errors::InvalidRangeError;
use crate::numerical::sampler::Series;
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
        }
    }
}

impl Viewport {
    pub fn new(x_min: f64, x_max: f64, y_min: f64, y_max: f64) -> Result<Self, InvalidRangeError> {
        for (lo, hi, axis) in [(x_min, x_max, "x"), (y_min, y_max, "y")] {
            if !lo.is_finite() || !hi.is_finite() || lo >= hi {
                return Err(InvalidRangeError::new(format!(
                    "{} range must be finite with min < max, got [{}, {}]",
                    axis, lo, hi
                )));
            }
        }
        Ok(Viewport {
            x_min,
            x_max,
            y_min,
            y_max,
        })
    }

    pub fn map_x(&self, x: f64, width: f64) -> f64 {
        (x - self.x_min) / (self.x_max - self.x_min) * width
    }

    pub fn map_y(&self, y: f64, height: f64) -> f64 {
        height - (y - self.y_min) / (self.y_max - self.y_min) * height
    }

    pub fn x_grid(&self) -> Vec<f64> {
        grid_lines(self.x_min, self.x_max, nice_step((self.x_max - self.x_min) / 10.0))
    }

    pub fn y_grid(&self) -> Vec<f64> {
        grid_lines(self.y_min, self.y_max, nice_step((self.y_max - self.y_min) / 10.0))
    }
}

/// Round `step` to 1, 2, 5 or 10 times its decade.
pub fn nice_step(step: f64) -> f64 {
    let exp = step.log10().floor();
    let decade = 10f64.powf(exp);
    let frac = step / decade;
    let nice_frac = if frac < 1.5 {
        1.0
    } else if frac < 3.0 {
        2.0
    } else if frac < 7.0 {
        5.0
    } else {
        10.0
    };
    nice_frac * decade
}

/// Multiples of `step` inside `[min, max]`.
pub fn grid_lines(min: f64, max: f64, step: f64) -> Vec<f64> {
    if step <= 0.0 || !step.is_finite() {
        return Vec::new();
    }
    let first = (min / step).ceil() as i64;
    let last = (max / step).floor() as i64;
    (first..=last).map(|k| k as f64 * step).collect()
}

/// Tick values at every fifth of `[min, max]` for axis labels, skipping the origin.
pub fn axis_label_values(min: f64, max: f64) -> Vec<f64> {
    let step = (max - min) / 5.0;
    (0..=5)
        .map(|i| min + i as f64 * step)
        .filter(|v| v.abs() >= 0.001)
        .collect()
}

/// `#RRGGBB` to a plotters colour
pub fn hex_to_rgb(hex: &str) -> Option<RGBColor> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

/// Draw every series into a PNG file. Each gap-free run of samples is drawn as
/// a separate polyline, so curves break at gap markers. With `with_labels` the
/// chart also gets tick labels and a legend (needs a system font).
pub fn plot_series_png(
    series: &[Series],
    viewport: &Viewport,
    filename: &Path,
    size: (u32, u32),
    with_labels: bool,
) -> Result<(), Box<dyn Error>> {
    let root_area = BitMapBackend::new(filename, size).into_drawing_area();
    root_area.fill(&WHITE)?;

    let mut builder = ChartBuilder::on(&root_area);
    builder.margin(10);
    if with_labels {
        builder.x_label_area_size(30).y_label_area_size(40);
    }
    let mut chart = builder.build_cartesian_2d(
        viewport.x_min..viewport.x_max,
        viewport.y_min..viewport.y_max,
    )?;

    let grid_style = BLACK.mix(0.1);
    for x in viewport.x_grid() {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(x, viewport.y_min), (x, viewport.y_max)],
            grid_style,
        )))?;
    }
    for y in viewport.y_grid() {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(viewport.x_min, y), (viewport.x_max, y)],
            grid_style,
        )))?;
    }
    // axes through the origin when it is visible
    let axis_style = BLACK.stroke_width(2);
    if viewport.y_min <= 0.0 && 0.0 <= viewport.y_max {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(viewport.x_min, 0.0), (viewport.x_max, 0.0)],
            axis_style,
        )))?;
    }
    if viewport.x_min <= 0.0 && 0.0 <= viewport.x_max {
        chart.draw_series(std::iter::once(PathElement::new(
            vec![(0.0, viewport.y_min), (0.0, viewport.y_max)],
            axis_style,
        )))?;
    }

    for s in series {
        let color = hex_to_rgb(s.color()).unwrap_or(BLACK);
        for (k, segment) in s.segments().into_iter().enumerate() {
            let drawn = chart.draw_series(LineSeries::new(segment, color.stroke_width(2)))?;
            if with_labels && k == 0 {
                drawn
                    .label(s.expression.clone())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            }
        }
    }

    if with_labels {
        chart
            .configure_mesh()
            .disable_mesh()
            .x_labels(6)
            .y_labels(6)
            .draw()?;
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()?;
    }
    root_area.present()?;
    Ok(())
}
