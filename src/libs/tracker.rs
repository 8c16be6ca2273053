//! Task, playlist and session operations over a [`DocumentStore`].
//!
//! The tracker owns no selection state: every call names the task or
//! playlist it works on. Session recording is a read, compute, write
//! sequence guarded by the document revision; when another writer got there
//! first the whole sequence is repeated, up to [`MAX_RETRY_COUNT`] attempts.
//!
//! ```rust
//! use aimtrack::libs::scoring::ScoreAggregator;
//! use aimtrack::libs::tracker::Tracker;
//! use aimtrack::store::memory::MemoryStore;
//! use chrono::NaiveDate;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let tracker = Tracker::new(MemoryStore::new(), ScoreAggregator::default());
//! tracker.create_task("1w6ts", 80).await?;
//! let today = NaiveDate::from_ymd_opt(2024, 3, 4).unwrap();
//! let outcome = tracker.record_session("1w6ts", &[70, 82], 0.45, today).await?;
//! assert_eq!(outcome.stats.highscore, 82);
//! # Ok(())
//! # }
//! ```

use super::messages::Message;
use super::scoring::{Period, PeriodAverage, ScoreAggregator, ScoreError, UpdatedStats};
use super::task::{Playlist, Task};
use crate::msg_error_anyhow;
use crate::store::{DocumentStore, Fields, StoreError, PLAYLISTS, TASKS};
use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

/// Attempts made to record a session before a revision conflict is surfaced.
pub const MAX_RETRY_COUNT: u32 = 3;

/// Result of a successfully recorded session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub stats: UpdatedStats,
    /// Highscore stored before this session.
    pub previous_highscore: i64,
    /// Number of read-compute-write attempts used.
    pub attempts: u32,
}

impl SessionOutcome {
    pub fn is_new_highscore(&self) -> bool {
        self.stats.highscore > self.previous_highscore
    }
}

/// One line of a period report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    pub task: String,
    pub highscore: i64,
    pub rolling_average_10: Option<f64>,
    pub period_average: Option<PeriodAverage>,
    pub threshold: f64,
    pub threshold_achieved: Option<bool>,
    pub sensitivity: Option<f64>,
}

/// One recorded score, flattened for export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub date: NaiveDate,
    pub playlist: String,
    pub task: String,
    pub score: i64,
    pub sensitivity: Option<f64>,
}

/// Outcome of creating or editing a playlist.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaylistChange {
    pub playlist: Playlist,
    /// Requested task names that had no task record and were dropped.
    pub skipped: Vec<String>,
}

pub struct Tracker<S> {
    store: S,
    aggregator: ScoreAggregator,
}

impl<S: DocumentStore> Tracker<S> {
    pub fn new(store: S, aggregator: ScoreAggregator) -> Self {
        Self { store, aggregator }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn aggregator(&self) -> &ScoreAggregator {
        &self.aggregator
    }

    /// Replaces the aggregator, e.g. for a per-session ratio override.
    pub fn with_aggregator(mut self, aggregator: ScoreAggregator) -> Self {
        self.aggregator = aggregator;
        self
    }

    // --- tasks ---

    /// Creates a task seeded with `highscore`. Fails if the name is taken.
    pub async fn create_task(&self, name: &str, highscore: i64) -> Result<Task> {
        let name = validate_name(name)?;
        validate_highscore(highscore)?;

        let task = Task::new(
            name,
            highscore,
            self.aggregator.threshold(highscore),
            self.aggregator.threshold_ratio(),
        );
        match self.store.create(TASKS, name, task.to_fields()?).await {
            Ok(_) => Ok(task),
            Err(StoreError::AlreadyExists { .. }) => Err(msg_error_anyhow!(Message::TaskAlreadyExists(name.to_string()))),
            Err(e) => Err(e.into()),
        }
    }

    /// Sets a new highscore and recomputes the threshold. History is untouched.
    ///
    /// The achievement flag is cleared until the next session is recorded.
    pub async fn edit_task(&self, name: &str, highscore: i64) -> Result<Task> {
        validate_highscore(highscore)?;

        let fields = Task::highscore_fields(
            highscore,
            self.aggregator.threshold(highscore),
            self.aggregator.threshold_ratio(),
        );
        match self.store.merge(TASKS, name, fields, None).await {
            Ok(document) => Ok(Task::from_document(&document)?),
            Err(StoreError::NotFound { .. }) => Err(ScoreError::UnknownTask(name.to_string()).into()),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn get_task(&self, name: &str) -> Result<Option<Task>> {
        match self.store.get(TASKS, name).await? {
            Some(document) => Ok(Some(Task::from_document(&document)?)),
            None => Ok(None),
        }
    }

    pub async fn list_tasks(&self) -> Result<Vec<Task>> {
        let documents = self.store.list(TASKS).await?;
        let tasks = documents.iter().map(Task::from_document).collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    pub async fn task_names(&self) -> Result<Vec<String>> {
        Ok(self.store.list(TASKS).await?.into_iter().map(|d| d.id).collect())
    }

    /// Deletes a task. Playlists that list it are left as they are.
    pub async fn delete_task(&self, name: &str) -> Result<bool> {
        Ok(self.store.delete(TASKS, name).await?)
    }

    /// Deletes every task and returns how many were removed.
    pub async fn delete_all_tasks(&self) -> Result<usize> {
        let mut deleted = 0;
        for name in self.task_names().await? {
            if self.store.delete(TASKS, &name).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    /// Tasks listed by a playlist in playlist order, `None` where the record is gone.
    pub async fn playlist_tasks(&self, playlist: &str) -> Result<Vec<(String, Option<Task>)>> {
        let playlist = self.require_playlist(playlist).await?;
        let mut tasks = Vec::with_capacity(playlist.tasks.len());
        for name in playlist.tasks {
            let task = self.get_task(&name).await?;
            tasks.push((name, task));
        }
        Ok(tasks)
    }

    // --- playlists ---

    /// Creates a playlist. Names without a task record are dropped and reported.
    pub async fn create_playlist(&self, name: &str, tasks: &[String]) -> Result<PlaylistChange> {
        let name = validate_name(name)?;
        let (kept, skipped) = self.split_known_tasks(tasks).await?;

        let playlist = Playlist::new(name, kept);
        match self.store.create(PLAYLISTS, name, playlist.to_fields()?).await {
            Ok(_) => Ok(PlaylistChange { playlist, skipped }),
            Err(StoreError::AlreadyExists { .. }) => {
                Err(msg_error_anyhow!(Message::PlaylistAlreadyExists(name.to_string())))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Renames a playlist and/or replaces its task list.
    ///
    /// A rename creates the new document with the current tasks and then
    /// removes the old one. An empty or absent task list keeps the current
    /// tasks; unknown names are dropped.
    pub async fn edit_playlist(&self, name: &str, new_name: Option<&str>, tasks: Option<&[String]>) -> Result<PlaylistChange> {
        let mut playlist = self.require_playlist(name).await?;
        let mut skipped = Vec::new();

        if let Some(new_name) = new_name.map(str::trim).filter(|n| !n.is_empty() && *n != name) {
            let new_name = validate_name(new_name)?;
            let renamed = Playlist::new(new_name, playlist.tasks.clone());
            match self.store.create(PLAYLISTS, new_name, renamed.to_fields()?).await {
                Ok(_) => {}
                Err(StoreError::AlreadyExists { .. }) => {
                    return Err(msg_error_anyhow!(Message::PlaylistAlreadyExists(new_name.to_string())))
                }
                Err(e) => return Err(e.into()),
            }
            self.store.delete(PLAYLISTS, name).await?;
            tracing::debug!(from = name, to = new_name, "playlist renamed");
            playlist = renamed;
        }

        if let Some(tasks) = tasks.filter(|t| !t.is_empty()) {
            let (kept, dropped) = self.split_known_tasks(tasks).await?;
            skipped = dropped;
            if !kept.is_empty() {
                let mut fields = Fields::new();
                fields.insert("tasks".to_string(), serde_json::to_value(&kept)?);
                self.store.merge(PLAYLISTS, &playlist.playlist_name, fields, None).await?;
                playlist.tasks = kept;
            }
        }

        Ok(PlaylistChange { playlist, skipped })
    }

    pub async fn get_playlist(&self, name: &str) -> Result<Option<Playlist>> {
        match self.store.get(PLAYLISTS, name).await? {
            Some(document) => Ok(Some(Playlist::from_document(&document)?)),
            None => Ok(None),
        }
    }

    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let documents = self.store.list(PLAYLISTS).await?;
        let playlists = documents.iter().map(Playlist::from_document).collect::<Result<Vec<_>, _>>()?;
        Ok(playlists)
    }

    /// Deletes a playlist. Its tasks are never touched.
    pub async fn delete_playlist(&self, name: &str) -> Result<bool> {
        Ok(self.store.delete(PLAYLISTS, name).await?)
    }

    pub async fn delete_all_playlists(&self) -> Result<usize> {
        let mut deleted = 0;
        for document in self.store.list(PLAYLISTS).await? {
            if self.store.delete(PLAYLISTS, &document.id).await? {
                deleted += 1;
            }
        }
        Ok(deleted)
    }

    // --- sessions ---

    /// Appends a session's scores to a task and writes the recomputed statistics.
    ///
    /// Fails with [`ScoreError::UnknownTask`] when the task has no record and
    /// with [`ScoreError::InvalidInput`] for empty scores or a bad sensitivity.
    /// Nothing is written on failure.
    pub async fn record_session(&self, name: &str, scores: &[i64], sensitivity: f64, today: NaiveDate) -> Result<SessionOutcome> {
        let mut attempt = 0;
        loop {
            attempt += 1;

            let document = self
                .store
                .get(TASKS, name)
                .await?
                .ok_or_else(|| ScoreError::UnknownTask(name.to_string()))?;
            let task = Task::from_document(&document)?;

            let stats = self
                .aggregator
                .record_session(&task.history, scores, sensitivity, today)?
                .with_highscore_floor(task.highscore);

            match self.store.merge(TASKS, name, Task::stats_fields(&stats)?, Some(document.revision)).await {
                Ok(written) => {
                    tracing::debug!(task = name, revision = written.revision, attempt, "session recorded");
                    return Ok(SessionOutcome {
                        stats,
                        previous_highscore: task.highscore,
                        attempts: attempt,
                    });
                }
                Err(StoreError::Conflict { .. }) if attempt < MAX_RETRY_COUNT => {
                    tracing::debug!(task = name, attempt, "revision conflict, retrying");
                }
                Err(StoreError::NotFound { .. }) => return Err(ScoreError::UnknownTask(name.to_string()).into()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    // --- reporting ---

    /// Per-task statistics with the average over `period` ending at `today`.
    ///
    /// Limited to the tasks of `playlist` when given; listed names without a
    /// record are skipped.
    pub async fn report(&self, period: Period, playlist: Option<&str>, today: NaiveDate) -> Result<Vec<ReportRow>> {
        let tasks = self.scoped_tasks(playlist).await?;
        Ok(tasks
            .into_iter()
            .map(|task| ReportRow {
                period_average: ScoreAggregator::average_for_period(&task.history, period, today),
                task: task.task_name,
                highscore: task.highscore,
                rolling_average_10: task.rolling_average_10,
                threshold: task.threshold,
                threshold_achieved: task.threshold_achieved,
                sensitivity: task.sensitivity,
            })
            .collect())
    }

    /// Every recorded score as a flat row, oldest first within each task.
    ///
    /// History entries carry no sensitivity of their own, so every row of a
    /// task reports the task's latest sensitivity.
    pub async fn export_rows(&self, playlist: Option<&str>) -> Result<Vec<ExportRow>> {
        let tasks = self.scoped_tasks(playlist).await?;
        let playlists = self.list_playlists().await?;

        let mut rows = Vec::new();
        for task in tasks {
            let playlist_column = match playlist {
                Some(name) => name.to_string(),
                None => playlists
                    .iter()
                    .filter(|p| p.tasks.contains(&task.task_name))
                    .map(|p| p.playlist_name.as_str())
                    .collect::<Vec<_>>()
                    .join(";"),
            };
            for entry in &task.history {
                rows.push(ExportRow {
                    date: entry.date,
                    playlist: playlist_column.clone(),
                    task: task.task_name.clone(),
                    score: entry.score,
                    sensitivity: task.sensitivity,
                });
            }
        }
        Ok(rows)
    }

    async fn scoped_tasks(&self, playlist: Option<&str>) -> Result<Vec<Task>> {
        match playlist {
            Some(name) => Ok(self.playlist_tasks(name).await?.into_iter().filter_map(|(_, task)| task).collect()),
            None => self.list_tasks().await,
        }
    }

    async fn require_playlist(&self, name: &str) -> Result<Playlist> {
        self.get_playlist(name)
            .await?
            .ok_or_else(|| msg_error_anyhow!(Message::PlaylistNotFound(name.to_string())))
    }

    async fn split_known_tasks(&self, requested: &[String]) -> Result<(Vec<String>, Vec<String>)> {
        let known = self.task_names().await?;
        let mut kept = Vec::new();
        let mut skipped = Vec::new();
        for name in requested.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
            if known.iter().any(|k| k == name) {
                if !kept.iter().any(|k: &String| k == name) {
                    kept.push(name.to_string());
                }
            } else {
                skipped.push(name.to_string());
            }
        }
        Ok((kept, skipped))
    }
}

fn validate_name(name: &str) -> Result<&str> {
    let name = name.trim();
    if name.is_empty() || name.contains('/') {
        return Err(ScoreError::InvalidInput(format!("'{}' is not a valid name", name)).into());
    }
    Ok(name)
}

fn validate_highscore(highscore: i64) -> Result<()> {
    if highscore <= 0 {
        return Err(ScoreError::InvalidInput(Message::TaskHighscoreRange.to_string()).into());
    }
    Ok(())
}
