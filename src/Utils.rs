//! different utility modules used throughout the project
/// logger setup and saving of results into csv files
pub mod logger;
/// plot geometry (viewport, grid steps) and png rendering of sampled functions
pub mod plots;
/// parse a settings document with lines like "key: value" into CalcSettings
pub mod settings_parser;
/// the last calculations, newest first
pub mod history;
/// text rendering of numbers, matrices and solution vectors
pub mod formatting;
