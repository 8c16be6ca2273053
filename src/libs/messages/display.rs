//! Display implementation for aimtrack application messages.
//!
//! All user-facing text lives here so that commands only ever refer to
//! `Message` variants. Parameters are interpolated with `format!` style
//! writes; collections are joined with `", "`.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

fn join_or(items: &[String], empty: &str) -> String {
    if items.is_empty() {
        empty.to_string()
    } else {
        items.join(", ")
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let s = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created successfully", name),
            Message::TaskUpdated(name) => format!("Task '{}' edited successfully", name),
            Message::TaskDeleted(name) => format!("Task '{}' deleted successfully", name),
            Message::TaskNotFound(name) => format!("Task '{}' does not exist", name),
            Message::TaskAlreadyExists(name) => format!("Task '{}' already exists", name),
            Message::AllTasksDeleted(count) => format!("All tasks deleted successfully ({})", count),
            Message::NoTasksFound => "No tasks found.".to_string(),
            Message::TasksHeader => "All Tasks:".to_string(),
            Message::TasksInPlaylistHeader(name) => format!("Tasks in playlist '{}':", name),
            Message::ConfirmDeleteTask(name) => format!("Delete task '{}' and its whole score history?", name),
            Message::ConfirmDeleteAllTasks(count) => format!("Delete all {} tasks?", count),
            Message::TaskHighscoreRange => "Highscore must be a positive integer".to_string(),
            Message::TaskSelected(name) => format!("Selected task: {}", name),
            Message::NoTaskSelected => "No task selected. Please choose a task first.".to_string(),

            // === PLAYLIST MESSAGES ===
            Message::PlaylistCreated(name, tasks) => {
                format!("Playlist '{}' created successfully with tasks: {}", name, join_or(tasks, "none"))
            }
            Message::PlaylistUpdated(name, tasks) => {
                format!("Playlist '{}' edited successfully with tasks: {}", name, join_or(tasks, "none"))
            }
            Message::PlaylistRenamed(old, new) => format!("Playlist '{}' renamed to '{}'", old, new),
            Message::PlaylistDeleted(name) => format!("Playlist '{}' deleted successfully", name),
            Message::PlaylistNotFound(name) => format!("Playlist '{}' does not exist", name),
            Message::PlaylistAlreadyExists(name) => format!("Playlist '{}' already exists", name),
            Message::AllPlaylistsDeleted(count) => format!("All playlists deleted successfully ({})", count),
            Message::NoPlaylistsFound => "No playlists found.".to_string(),
            Message::PlaylistsHeader => "All Playlists:".to_string(),
            Message::UnknownTasksSkipped(names) => format!("Skipped unknown tasks: {}", names.join(", ")),
            Message::ConfirmDeletePlaylist(name) => format!("Delete playlist '{}'? Its tasks are kept.", name),
            Message::ConfirmDeleteAllPlaylists(count) => format!("Delete all {} playlists? Tasks are kept.", count),
            Message::PlaylistSelected(name) => format!("Selected playlist: {}", name),
            Message::NoPlaylistSelected => "No playlist selected. Please choose a playlist first.".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionRecorded { task, repetitions } => {
                format!("Recorded {} repetition(s) for task '{}'", repetitions, task)
            }
            Message::ThresholdAchieved { best, threshold } => {
                format!("Threshold achieved: best {} >= {:.2}", best, threshold)
            }
            Message::ThresholdMissed { best, threshold } => {
                format!("Threshold not reached: best {} < {:.2}", best, threshold)
            }
            Message::NewHighscore(score) => format!("New highscore: {}", score),
            Message::ScoresRequired => "At least one integer score is required".to_string(),
            Message::SensitivityRange => "Sensitivity must be a non-negative number".to_string(),
            Message::StoreConflictRetry { task, attempt } => {
                format!("Task '{}' changed while recording, retrying (attempt {})", task, attempt)
            }

            // === REPORT MESSAGES ===
            Message::ReportHeader { period, date } => format!("Scores for {} ending {}", period, date),
            Message::DataExported(path) => format!("Data exported successfully to: {}", path),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigDeleted => "Configuration removed".to_string(),
            Message::ConfigNotFound => "No configuration file to delete".to_string(),
            Message::ConfigModuleStore => "Document store settings".to_string(),
            Message::ConfigModuleScoring => "Scoring settings".to_string(),
            Message::RemoteStoreUrlMissing => {
                "Remote store selected but no API URL is configured (run `aimtrack init`)".to_string()
            }
            Message::RemoteStoreUrlInvalid(url) => format!("Invalid remote store API URL: '{}'", url),
            Message::ThresholdRatioRange => "Threshold ratio must be greater than 0 and at most 1".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending migration(s)", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All migrations completed successfully".to_string(),

            // === PROMPTS ===
            Message::PromptTaskName => "Enter task name".to_string(),
            Message::PromptInitialHighscore(name) => format!("Enter initial highscore for task {}", name),
            Message::PromptNewHighscore(name) => format!("Enter new highscore for task {}", name),
            Message::PromptPlaylistName => "Enter playlist name".to_string(),
            Message::PromptPlaylistTasks => "Enter task names (comma-separated)".to_string(),
            Message::PromptPlaylistNewName(name) => {
                format!("Enter new name for playlist {} (leave empty to keep it)", name)
            }
            Message::PromptSensitivity => "Enter sensitivity".to_string(),
            Message::PromptRepetitions => "Enter repetitions".to_string(),
            Message::PromptRepetitionScore(index) => format!("Enter score for repetition {}", index),
            Message::PromptSelectModules => "Select nodes to configure".to_string(),
            Message::PromptStoreBackend => "Select document store backend".to_string(),
            Message::PromptStoreApiUrl => "Enter the document store API URL".to_string(),
            Message::PromptStoreAuthToken => "Enter the document store auth token".to_string(),
            Message::PromptStoreTimeout => "Enter request timeout (seconds)".to_string(),
            Message::PromptThresholdRatio => "Enter threshold ratio (0 < ratio <= 1)".to_string(),
            Message::PromptSelectPlaylist => "Choose playlist".to_string(),
            Message::PromptSelectTask => "Choose task".to_string(),
            Message::PromptChoice => "Enter choice".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),
            Message::InvalidInput(details) => format!("Invalid input: {}", details),
        };
        write!(f, "{}", s)
    }
}
