#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskUpdated(String),
    TaskDeleted(String),
    TaskNotFound(String),
    TaskAlreadyExists(String),
    AllTasksDeleted(usize),
    NoTasksFound,
    TasksHeader,
    TasksInPlaylistHeader(String),
    ConfirmDeleteTask(String),
    ConfirmDeleteAllTasks(usize),
    TaskHighscoreRange,
    TaskSelected(String),
    NoTaskSelected,

    // === PLAYLIST MESSAGES ===
    PlaylistCreated(String, Vec<String>), // name, kept tasks
    PlaylistUpdated(String, Vec<String>), // name, tasks
    PlaylistRenamed(String, String),      // old, new
    PlaylistDeleted(String),
    PlaylistNotFound(String),
    PlaylistAlreadyExists(String),
    AllPlaylistsDeleted(usize),
    NoPlaylistsFound,
    PlaylistsHeader,
    UnknownTasksSkipped(Vec<String>),
    ConfirmDeletePlaylist(String),
    ConfirmDeleteAllPlaylists(usize),
    PlaylistSelected(String),
    NoPlaylistSelected,

    // === SESSION MESSAGES ===
    SessionRecorded {
        task: String,
        repetitions: usize,
    },
    ThresholdAchieved {
        best: i64,
        threshold: f64,
    },
    ThresholdMissed {
        best: i64,
        threshold: f64,
    },
    NewHighscore(i64),
    ScoresRequired,
    SensitivityRange,
    StoreConflictRetry {
        task: String,
        attempt: u32,
    },

    // === REPORT MESSAGES ===
    ReportHeader {
        period: String,
        date: String,
    },
    DataExported(String), // path

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigNotFound,
    ConfigModuleStore,
    ConfigModuleScoring,
    RemoteStoreUrlMissing,
    RemoteStoreUrlInvalid(String),
    ThresholdRatioRange,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,

    // === PROMPTS ===
    PromptTaskName,
    PromptInitialHighscore(String),
    PromptNewHighscore(String),
    PromptPlaylistName,
    PromptPlaylistTasks,
    PromptPlaylistNewName(String),
    PromptSensitivity,
    PromptRepetitions,
    PromptRepetitionScore(usize),
    PromptSelectModules,
    PromptStoreBackend,
    PromptStoreApiUrl,
    PromptStoreAuthToken,
    PromptStoreTimeout,
    PromptThresholdRatio,
    PromptSelectPlaylist,
    PromptSelectTask,
    PromptChoice,

    // === GENERAL MESSAGES ===
    OperationCancelled,
    InvalidInput(String),
}
