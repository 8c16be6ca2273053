//! Score history export to CSV or JSON.
//!
//! ```rust,no_run
//! use aimtrack::libs::export::{ExportFormat, Exporter};
//!
//! let exporter = Exporter::new(ExportFormat::Csv, None);
//! exporter.write(&[])?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::tracker::ExportRow;
use anyhow::Result;
use chrono::Local;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ExportFormat {
    /// One row per score: date, playlist, task, score, sensitivity.
    Csv,
    /// Pretty-printed array of row objects.
    Json,
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Uses `output_path`, or `aimtrack_export_<timestamp>.<ext>` in the working directory.
    pub fn new(format: ExportFormat, output_path: Option<PathBuf>) -> Self {
        let default_name = format!("aimtrack_export_{}", Local::now().format("%Y%m%d_%H%M%S"));
        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let output_path = output_path.unwrap_or_else(|| PathBuf::from(format!("{}.{}", default_name, extension)));

        Self { format, output_path }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn write(&self, rows: &[ExportRow]) -> Result<()> {
        match self.format {
            ExportFormat::Csv => self.write_csv(rows),
            ExportFormat::Json => self.write_json(rows),
        }
    }

    fn write_csv(&self, rows: &[ExportRow]) -> Result<()> {
        let mut wtr = csv::Writer::from_path(&self.output_path)?;
        wtr.write_record(["Date", "Playlist", "Task", "Score", "Sensitivity"])?;

        for row in rows {
            wtr.write_record(&[
                row.date.format("%Y-%m-%d").to_string(),
                row.playlist.clone(),
                row.task.clone(),
                row.score.to_string(),
                row.sensitivity.map(|s| s.to_string()).unwrap_or_default(),
            ])?;
        }

        wtr.flush()?;
        Ok(())
    }

    fn write_json(&self, rows: &[ExportRow]) -> Result<()> {
        let json = serde_json::to_string_pretty(rows)?;
        File::create(&self.output_path)?.write_all(json.as_bytes())?;
        Ok(())
    }
}
