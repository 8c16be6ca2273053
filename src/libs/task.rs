//! Task and playlist records as stored in the document store.

use super::scoring::{ScoreEntry, UpdatedStats, DEFAULT_THRESHOLD_RATIO};
use crate::store::{Document, Fields, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

fn default_threshold_ratio() -> f64 {
    DEFAULT_THRESHOLD_RATIO
}

/// A practice task with its score history and derived statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub task_name: String,
    #[serde(default)]
    pub highscore: i64,
    #[serde(default)]
    pub threshold: f64,
    /// Ratio the stored threshold was computed with.
    #[serde(default = "default_threshold_ratio")]
    pub threshold_ratio: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rolling_average_10: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_achieved: Option<bool>,
    #[serde(default)]
    pub history: Vec<ScoreEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sensitivity: Option<f64>,
}

impl Task {
    /// A fresh task seeded with `highscore` and an empty history.
    pub fn new(task_name: &str, highscore: i64, threshold: f64, threshold_ratio: f64) -> Self {
        Self {
            task_name: task_name.to_string(),
            highscore,
            threshold,
            threshold_ratio,
            rolling_average_10: None,
            threshold_achieved: None,
            history: Vec::new(),
            sensitivity: None,
        }
    }

    /// Decodes a task document. A missing `task_name` falls back to the document id.
    pub fn from_document(document: &Document) -> Result<Self, StoreError> {
        let mut task: Task = serde_json::from_value(Value::Object(document.fields.clone()))?;
        if task.task_name.is_empty() {
            task.task_name = document.id.clone();
        }
        Ok(task)
    }

    pub fn to_fields(&self) -> Result<Fields, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Ok(Fields::new()),
        }
    }

    /// Merge patch carrying the statistics of a recorded session.
    ///
    /// `task_name` is left out so the merge keeps whatever the document holds.
    pub fn stats_fields(stats: &UpdatedStats) -> Result<Fields, StoreError> {
        let mut fields = Fields::new();
        fields.insert("highscore".to_string(), Value::from(stats.highscore));
        fields.insert("rolling_average_10".to_string(), Value::from(stats.rolling_average_10));
        fields.insert("threshold".to_string(), Value::from(stats.threshold));
        fields.insert("threshold_ratio".to_string(), Value::from(stats.threshold_ratio));
        fields.insert("threshold_achieved".to_string(), Value::from(stats.threshold_achieved));
        fields.insert("history".to_string(), serde_json::to_value(&stats.history)?);
        fields.insert("sensitivity".to_string(), Value::from(stats.sensitivity));
        Ok(fields)
    }

    /// Merge patch for a manual highscore change.
    ///
    /// Clears `threshold_achieved`: the last session was judged against the old threshold.
    pub fn highscore_fields(highscore: i64, threshold: f64, threshold_ratio: f64) -> Fields {
        let mut fields = Fields::new();
        fields.insert("highscore".to_string(), Value::from(highscore));
        fields.insert("threshold".to_string(), Value::from(threshold));
        fields.insert("threshold_ratio".to_string(), Value::from(threshold_ratio));
        fields.insert("threshold_achieved".to_string(), Value::Null);
        fields
    }
}

/// An ordered collection of task names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Playlist {
    #[serde(default)]
    pub playlist_name: String,
    #[serde(default)]
    pub tasks: Vec<String>,
}

impl Playlist {
    pub fn new(playlist_name: &str, tasks: Vec<String>) -> Self {
        Self {
            playlist_name: playlist_name.to_string(),
            tasks,
        }
    }

    pub fn from_document(document: &Document) -> Result<Self, StoreError> {
        let mut playlist: Playlist = serde_json::from_value(Value::Object(document.fields.clone()))?;
        if playlist.playlist_name.is_empty() {
            playlist.playlist_name = document.id.clone();
        }
        Ok(playlist)
    }

    pub fn to_fields(&self) -> Result<Fields, StoreError> {
        match serde_json::to_value(self)? {
            Value::Object(fields) => Ok(fields),
            _ => Ok(Fields::new()),
        }
    }
}

/// Splits a comma-separated list of names, trimming blanks.
pub fn parse_names(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}
