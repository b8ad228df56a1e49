//! parse a settings document made of `key: value` lines into `CalcSettings`.
//! Lines starting with //, #, % or ; are comments. Keys not mentioned in the
//! document keep their defaults.
//!
//! ```text
//! # calculator settings
//! angle_mode: rad
//! x_min: -6.28
//! x_max: 6.28
//! step_count: 400
//! log_level: warn
//! ```
use crate::Utils::logger::parse_log_level;
use crate::Utils::plots::Viewport;
use crate::calc_errors::InvalidRangeError;
use crate::numerical::sampler::{DEFAULT_STEP_COUNT, PlotRequest};
use crate::symbolic::function_table::{MathFunction, lookup_constant};
use crate::symbolic::symbolic_engine::{AngleMode, EvalContext};
use log::info;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, multispace0, not_line_ending, space0},
    combinator::{map, recognize},
    multi::many0,
    sequence::{delimited, pair, separated_pair},
};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct CalcSettings {
    pub angle_mode: AngleMode,
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    pub step_count: usize,
    pub variable: String,
    pub log_level: String,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            angle_mode: AngleMode::Degrees,
            x_min: -10.0,
            x_max: 10.0,
            y_min: -10.0,
            y_max: 10.0,
            step_count: DEFAULT_STEP_COUNT,
            variable: "x".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Parses a key (word characters without spaces)
fn parse_key(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses `key: value`; the value is the rest of the line
fn parse_key_value_pair(input: &str) -> IResult<&str, (String, String)> {
    let colon_separator = delimited(space0, tag(":"), space0);
    let value = map(not_line_ending, |s: &str| s.trim().to_string());
    let mut parser = separated_pair(parse_key, colon_separator, value);
    parser.parse(input)
}

/// Filters out comment lines (starting with //, #, %, or ;) and blank lines
fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("//")
                && !trimmed.starts_with('#')
                && !trimmed.starts_with('%')
                && !trimmed.starts_with(';')
                && !trimmed.is_empty()
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// All `key: value` pairs of the document in order of appearance.
pub fn parse_pairs(input: &str) -> Result<Vec<(String, String)>, String> {
    let filtered = filter_comments(input);
    let mut parser = many0(delimited(multispace0, parse_key_value_pair, multispace0));
    let (rest, pairs) = parser
        .parse(filtered.as_str())
        .map_err(|e| format!("cannot parse settings: {}", e))?;
    if !rest.trim().is_empty() {
        let line = rest.lines().next().unwrap_or(rest).trim();
        return Err(format!("cannot parse settings line '{}'", line));
    }
    Ok(pairs)
}

fn parse_number(key: &str, value: &str) -> Result<f64, String> {
    match value.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(format!("{}: expected a finite number, got '{}'", key, value)),
    }
}

fn parse_angle_mode(value: &str) -> Result<AngleMode, String> {
    value
        .parse::<AngleMode>()
        .map_err(|_| format!("angle_mode: expected deg or rad, got '{}'", value))
}

fn parse_variable(value: &str) -> Result<String, String> {
    let is_word = !value.is_empty() && value.chars().all(|c| c.is_ascii_alphabetic());
    if !is_word || MathFunction::lookup(value).is_some() || lookup_constant(value).is_some() {
        return Err(format!(
            "variable: expected a name made of letters that is not a function or constant, got '{}'",
            value
        ));
    }
    Ok(value.to_string())
}

impl CalcSettings {
    /// Parse a settings document; unknown keys and bad values are errors naming the key.
    pub fn parse(input: &str) -> Result<CalcSettings, String> {
        let mut settings = CalcSettings::default();
        for (key, value) in parse_pairs(input)? {
            match key.as_str() {
                "angle_mode" => settings.angle_mode = parse_angle_mode(&value)?,
                "x_min" => settings.x_min = parse_number(&key, &value)?,
                "x_max" => settings.x_max = parse_number(&key, &value)?,
                "y_min" => settings.y_min = parse_number(&key, &value)?,
                "y_max" => settings.y_max = parse_number(&key, &value)?,
                "step_count" => {
                    settings.step_count = value.parse::<usize>().map_err(|_| {
                        format!("step_count: expected a non-negative integer, got '{}'", value)
                    })?
                }
                "variable" => settings.variable = parse_variable(&value)?,
                "log_level" => {
                    parse_log_level(&value).map_err(|e| format!("log_level: {}", e))?;
                    settings.log_level = value.to_lowercase();
                }
                other => return Err(format!("unknown settings key '{}'", other)),
            }
        }
        info!("settings parsed: {:?}", settings);
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<CalcSettings, String> {
        let content = fs::read_to_string(path)
            .map_err(|e| format!("cannot read settings file {}: {}", path.display(), e))?;
        CalcSettings::parse(&content)
    }

    pub fn eval_context(&self) -> EvalContext {
        EvalContext::new(self.angle_mode)
    }

    /// plot request over the configured x range for the given expressions
    pub fn plot_request(&self, expressions: Vec<String>) -> PlotRequest {
        PlotRequest {
            expressions,
            x_min: self.x_min,
            x_max: self.x_max,
            step_count: self.step_count,
            angle_mode: self.angle_mode,
            variable: self.variable.clone(),
        }
    }

    pub fn viewport(&self) -> Result<Viewport, InvalidRangeError> {
        Viewport::new(self.x_min, self.x_max, self.y_min, self.y_max)
    }
}
