//! Calculation history: the most recent results first, at most `HISTORY_CAPACITY` of them.
use crate::Utils::formatting::format_result;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use tabled::settings::Style;
use tabled::{Table, Tabled};

pub const HISTORY_CAPACITY: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub expression: String,
    pub result: f64,
    pub timestamp: DateTime<Local>,
}

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    expression: String,
    result: String,
    time: String,
}

#[derive(Debug, Clone, Default)]
pub struct CalcHistory {
    entries: VecDeque<HistoryEntry>,
}

impl CalcHistory {
    pub fn new() -> Self {
        CalcHistory::default()
    }

    /// Record a calculation as the newest entry, dropping the oldest one past capacity.
    pub fn push(&mut self, expression: &str, result: f64) {
        self.entries.push_front(HistoryEntry {
            expression: expression.to_string(),
            result,
            timestamp: Local::now(),
        });
        self.entries.truncate(HISTORY_CAPACITY);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// newest first
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    /// expression of entry `index`, to be edited and evaluated again
    pub fn recall(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(|e| e.expression.as_str())
    }

    pub fn to_table(&self) -> String {
        if self.entries.is_empty() {
            return "No calculations yet".to_string();
        }
        let rows: Vec<HistoryRow> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, e)| HistoryRow {
                index: i + 1,
                expression: e.expression.clone(),
                result: format_result(e.result),
                time: e.timestamp.format("%H:%M:%S").to_string(),
            })
            .collect();
        let mut table = Table::new(rows);
        table.with(Style::modern_rounded());
        table.to_string()
    }
}
