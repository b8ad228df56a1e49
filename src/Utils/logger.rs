use crate::numerical::sampler::{Sample, Series};
use crate::somelinalg::matrix::Matrix;
use chrono::Local;
use csv::Writer;
use simplelog::*;
use std::fs::File;
use std::io;
use std::path::Path;

/// Map a level name to a filter; "off" and "none" disable logging.
pub fn parse_log_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "off" | "none" => Ok(LevelFilter::Off),
        "debug" => Ok(LevelFilter::Debug),
        "info" => Ok(LevelFilter::Info),
        "warn" => Ok(LevelFilter::Warn),
        "error" => Ok(LevelFilter::Error),
        other => Err(format!(
            "loglevel must be off, none, debug, info, warn or error, got '{}'",
            other
        )),
    }
}

/// Install a terminal logger, plus a file logger when `log_file` is given.
/// Returns `Ok(false)` when a logger was already installed.
pub fn init_logger(level: &str, log_file: Option<&Path>) -> Result<bool, String> {
    let log_option = parse_log_level(level)?;
    if log_option == LevelFilter::Off {
        return Ok(false);
    }
    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    loggers.push(TermLogger::new(
        log_option,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ));
    if let Some(path) = log_file {
        let file = File::create(path).map_err(|e| format!("cannot create log file: {}", e))?;
        loggers.push(WriteLogger::new(log_option, Config::default(), file));
    }
    match CombinedLogger::init(loggers) {
        Ok(()) => {
            log::info!("logger started with level {}", log_option);
            Ok(true)
        }
        Err(_) => Ok(false),
    }
}

/// default log file name with a timestamp, e.g. `log_2024-05-01_12-00-00.txt`
pub fn timestamped_log_name() -> String {
    let date_and_time = Local::now().format("%Y-%m-%d_%H-%M-%S");
    format!("log_{}.txt", date_and_time)
}

/// Save sampled curves as `expression,color,x,y` rows; gaps get an empty `y`.
pub fn save_series_to_csv(series: &[Series], filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    writer.write_record(["expression", "color", "x", "y"])?;
    for s in series {
        for sample in s.samples() {
            let (x, y) = match sample {
                Sample::Point { x, y } => (x.to_string(), y.to_string()),
                Sample::Gap { x } => (x.to_string(), String::new()),
            };
            writer.write_record([s.expression.as_str(), s.color(), x.as_str(), y.as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

/// Save a matrix as CSV with `c0, c1, ...` headers.
pub fn save_matrix_to_csv(matrix: &Matrix, filename: &Path) -> io::Result<()> {
    let file = File::create(filename)?;
    let mut writer = Writer::from_writer(file);
    let headers: Vec<String> = (0..matrix.cols()).map(|j| format!("c{}", j)).collect();
    writer.write_record(&headers)?;
    for i in 0..matrix.rows() {
        let row_data: Vec<String> = matrix.row(i).iter().map(|v| v.to_string()).collect();
        writer.write_record(&row_data)?;
    }
    writer.flush()?;
    Ok(())
}
