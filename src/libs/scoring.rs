//! Score aggregation engine.
//!
//! Folds a task's timestamped score history into the derived statistics the
//! tracker persists and reports on.
//!
//! ## Statistics
//!
//! ```text
//! highscore          = max(score over history)
//! rolling_average_10 = round(mean(last min(10, len) scores), 2)
//! threshold          = round(ratio * highscore, 2)
//! threshold_achieved = max(session scores) >= threshold
//! ```
//!
//! The rolling average is taken over the most recent entries in insertion
//! order, never over the highest ones.
//!
//! ## Usage
//!
//! ```rust
//! use aimtrack::libs::scoring::ScoreAggregator;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let stats = ScoreAggregator::default().record_session(&[], &[10, 20, 15], 0.42, today)?;
//! assert_eq!(stats.highscore, 20);
//! assert_eq!(stats.rolling_average_10, 15.0);
//! assert_eq!(stats.threshold, 19.0);
//! assert!(stats.threshold_achieved);
//! # Ok::<(), aimtrack::libs::scoring::ScoreError>(())
//! ```
//!
//! The engine holds no state between calls and performs no I/O; "today" is
//! always passed in by the caller.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Ratio of the highscore a session must reach to count as achieved.
pub const DEFAULT_THRESHOLD_RATIO: f64 = 0.95;

/// Number of most recent entries the rolling average covers.
pub const ROLLING_WINDOW: usize = 10;

/// Errors raised by the aggregation engine and its callers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ScoreError {
    /// Malformed or out-of-range caller input. Recovered by re-prompting.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The session targets a task that has no stored record.
    #[error("task '{0}' does not exist")]
    UnknownTask(String),
}

/// A single recorded repetition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub score: i64,
    /// Day the score was recorded, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
}

impl ScoreEntry {
    pub fn new(score: i64, date: NaiveDate) -> Self {
        Self { score, date }
    }
}

/// Reporting windows for period averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
    All,
}

impl Period {
    pub const ALL_PERIODS: [Period; 5] = [Period::Day, Period::Week, Period::Month, Period::Year, Period::All];

    /// First day (inclusive) of the window ending at `reference`.
    ///
    /// `None` means the window is unbounded.
    pub fn window_start(&self, reference: NaiveDate) -> Option<NaiveDate> {
        match self {
            Period::Day => Some(reference),
            Period::Week => Some(reference - Duration::days(reference.weekday().num_days_from_monday() as i64)),
            Period::Month => reference.with_day(1),
            Period::Year => NaiveDate::from_ymd_opt(reference.year(), 1, 1),
            Period::All => None,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Period::Day => "day",
            Period::Week => "week",
            Period::Month => "month",
            Period::Year => "year",
            Period::All => "all time",
        };
        write!(f, "{}", name)
    }
}

/// Mean score over a reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodAverage {
    pub average: f64,
    pub count: usize,
}

/// Result of folding a session into a task's history.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdatedStats {
    pub history: Vec<ScoreEntry>,
    pub highscore: i64,
    pub rolling_average_10: f64,
    pub threshold: f64,
    pub threshold_achieved: bool,
    pub sensitivity: f64,
    pub threshold_ratio: f64,
    /// Best score of the session that produced these stats.
    pub session_best: i64,
}

impl UpdatedStats {
    /// Raises the highscore to `prior` when the stored value is higher.
    ///
    /// Threshold and achievement flag are recomputed so they always match
    /// the highscore carried in the same record.
    pub fn with_highscore_floor(mut self, prior: i64) -> Self {
        if prior > self.highscore {
            self.highscore = prior;
            self.threshold = round2(self.threshold_ratio * prior as f64);
            self.threshold_achieved = self.session_best as f64 >= self.threshold;
        }
        self
    }
}

/// Stateless score aggregation engine parameterized by threshold ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreAggregator {
    threshold_ratio: f64,
}

impl Default for ScoreAggregator {
    fn default() -> Self {
        Self {
            threshold_ratio: DEFAULT_THRESHOLD_RATIO,
        }
    }
}

impl ScoreAggregator {
    /// Creates an aggregator, rejecting ratios outside `(0, 1]`.
    pub fn new(threshold_ratio: f64) -> Result<Self, ScoreError> {
        validate_ratio(threshold_ratio)?;
        Ok(Self { threshold_ratio })
    }

    pub fn threshold_ratio(&self) -> f64 {
        self.threshold_ratio
    }

    /// Threshold for a given highscore, rounded to 2 decimal places.
    pub fn threshold(&self, highscore: i64) -> f64 {
        round2(self.threshold_ratio * highscore as f64)
    }

    /// Appends a session's scores to `history` and recomputes every statistic.
    ///
    /// Each score is stamped with `today`. Inputs are validated before any
    /// computation so a failed call produces nothing.
    pub fn record_session(
        &self,
        history: &[ScoreEntry],
        new_scores: &[i64],
        sensitivity: f64,
        today: NaiveDate,
    ) -> Result<UpdatedStats, ScoreError> {
        validate_ratio(self.threshold_ratio)?;
        let session_best = match new_scores.iter().max() {
            Some(best) => *best,
            None => return Err(ScoreError::InvalidInput("at least one score is required".to_string())),
        };
        if !sensitivity.is_finite() || sensitivity < 0.0 {
            return Err(ScoreError::InvalidInput(format!("sensitivity must be non-negative, got {}", sensitivity)));
        }

        let mut updated_history = Vec::with_capacity(history.len() + new_scores.len());
        updated_history.extend_from_slice(history);
        updated_history.extend(new_scores.iter().map(|&score| ScoreEntry::new(score, today)));

        // Non-empty: new_scores contributed at least one entry.
        let highscore = updated_history.iter().map(|e| e.score).max().unwrap_or(session_best);
        let rolling_average_10 = rolling_average(&updated_history).unwrap_or(0.0);
        let threshold = self.threshold(highscore);

        Ok(UpdatedStats {
            history: updated_history,
            highscore,
            rolling_average_10,
            threshold,
            threshold_achieved: session_best as f64 >= threshold,
            sensitivity,
            threshold_ratio: self.threshold_ratio,
            session_best,
        })
    }

    /// Average score of the entries falling inside `period` ending at `reference`.
    ///
    /// Returns `None` when the window holds no entries. Entries dated after
    /// `reference` are never counted.
    pub fn average_for_period(history: &[ScoreEntry], period: Period, reference: NaiveDate) -> Option<PeriodAverage> {
        let start = period.window_start(reference);
        let scores: Vec<i64> = history
            .iter()
            .filter(|e| e.date <= reference && start.map_or(true, |start| e.date >= start))
            .map(|e| e.score)
            .collect();

        mean(&scores).map(|average| PeriodAverage {
            average: round2(average),
            count: scores.len(),
        })
    }
}

/// Mean of the last `ROLLING_WINDOW` entries in insertion order, rounded.
pub fn rolling_average(history: &[ScoreEntry]) -> Option<f64> {
    let start = history.len().saturating_sub(ROLLING_WINDOW);
    let recent: Vec<i64> = history[start..].iter().map(|e| e.score).collect();
    mean(&recent).map(round2)
}

/// Rounds to 2 decimal places, halves away from zero.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parses a comma- or whitespace-separated list of integer scores.
///
/// Rejects empty input and any token that is not an integer.
pub fn parse_scores(input: &str) -> Result<Vec<i64>, ScoreError> {
    let scores = input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| ScoreError::InvalidInput(format!("'{}' is not an integer score", token)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if scores.is_empty() {
        return Err(ScoreError::InvalidInput("at least one score is required".to_string()));
    }
    Ok(scores)
}

fn validate_ratio(ratio: f64) -> Result<(), ScoreError> {
    if ratio > 0.0 && ratio <= 1.0 {
        Ok(())
    } else {
        Err(ScoreError::InvalidInput(format!("threshold ratio must be in (0, 1], got {}", ratio)))
    }
}

fn mean(scores: &[i64]) -> Option<f64> {
    if scores.is_empty() {
        return None;
    }
    let sum: i128 = scores.iter().map(|&score| score as i128).sum();
    Some(sum as f64 / scores.len() as f64)
}
