use super::task::{Playlist, Task};
use super::tracker::ReportRow;
use anyhow::Result;
use prettytable::{row, Table};

const NOT_AVAILABLE: &str = "N/A";

pub struct View {}

fn or_na<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn yes_no(value: Option<bool>) -> String {
    match value {
        Some(true) => "yes".to_string(),
        Some(false) => "no".to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TASK", "HIGHSCORE", "AVG LAST 10", "THRESHOLD", "ACHIEVED", "SENSITIVITY", "SCORES"]);
        for task in tasks {
            table.add_row(row![
                task.task_name,
                task.highscore,
                or_na(task.rolling_average_10),
                task.threshold,
                yes_no(task.threshold_achieved),
                or_na(task.sensitivity),
                task.history.len()
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Tasks of one playlist in playlist order; missing records show as N/A.
    pub fn playlist_tasks(tasks: &[(String, Option<Task>)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TASK", "HIGHSCORE", "AVG LAST 10", "THRESHOLD"]);
        for (name, task) in tasks {
            match task {
                Some(task) => table.add_row(row![name, task.highscore, or_na(task.rolling_average_10), task.threshold]),
                None => table.add_row(row![name, NOT_AVAILABLE, NOT_AVAILABLE, NOT_AVAILABLE]),
            };
        }
        table.printstd();

        Ok(())
    }

    pub fn playlists(playlists: &[Playlist]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "PLAYLIST", "TASKS"]);
        for (idx, playlist) in playlists.iter().enumerate() {
            let tasks = if playlist.tasks.is_empty() {
                "No tasks".to_string()
            } else {
                playlist.tasks.join(", ")
            };
            table.add_row(row![idx + 1, playlist.playlist_name, tasks]);
        }
        table.printstd();

        Ok(())
    }

    pub fn report(rows: &[ReportRow]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row![
            "TASK",
            "HIGHSCORE",
            "AVG LAST 10",
            "PERIOD AVG",
            "REPS",
            "THRESHOLD",
            "ACHIEVED",
            "SENSITIVITY"
        ]);
        for r in rows {
            table.add_row(row![
                r.task,
                r.highscore,
                or_na(r.rolling_average_10),
                or_na(r.period_average.map(|p| p.average)),
                r.period_average.map(|p| p.count).unwrap_or(0),
                r.threshold,
                yes_no(r.threshold_achieved),
                or_na(r.sensitivity)
            ]);
        }
        table.printstd();

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values_render_as_na() {
        assert_eq!(or_na::<f64>(None), "N/A");
        assert_eq!(or_na(Some(15.5)), "15.5");
        assert_eq!(yes_no(None), "N/A");
        assert_eq!(yes_no(Some(true)), "yes");
    }
}
