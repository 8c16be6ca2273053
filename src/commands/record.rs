//! Session recording command.
//!
//! Appends a practice session's repetition scores to a task and prints the
//! recomputed statistics.

use crate::{
    libs::{
        messages::Message,
        scoring::{parse_scores, ScoreAggregator},
        tracker::{SessionOutcome, Tracker},
    },
    msg_debug, msg_error, msg_success, msg_warning,
    store::DocumentStore,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input};

#[derive(Debug, Args)]
pub struct RecordArgs {
    /// Task to record the session for
    task: String,

    /// Sensitivity used during the session
    #[arg(short, long)]
    sensitivity: Option<f64>,

    /// Comma-separated repetition scores, e.g. `82,79,85`
    #[arg(long)]
    scores: Option<String>,

    /// Threshold ratio for this session only, in (0, 1]
    #[arg(long)]
    ratio: Option<f64>,
}

pub async fn cmd<S: DocumentStore>(tracker: Tracker<S>, args: RecordArgs) -> Result<()> {
    let tracker = match args.ratio {
        Some(ratio) => match ScoreAggregator::new(ratio) {
            Ok(aggregator) => tracker.with_aggregator(aggregator),
            Err(e) => {
                msg_error!(e);
                return Ok(());
            }
        },
        None => tracker,
    };

    let scores = match args.scores {
        Some(scores) => match parse_scores(&scores) {
            Ok(scores) => Some(scores),
            Err(e) => {
                msg_error!(e);
                return Ok(());
            }
        },
        None => None,
    };

    handle_record(&tracker, &args.task, args.sensitivity, scores).await
}

/// Prompts for a non-negative sensitivity.
pub fn prompt_sensitivity() -> Result<f64> {
    let range_msg = Message::SensitivityRange.to_string();
    let sensitivity = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSensitivity.to_string())
        .validate_with(|input: &f64| -> Result<(), &str> {
            if input.is_finite() && *input >= 0.0 {
                Ok(())
            } else {
                Err(&range_msg)
            }
        })
        .interact_text()?;
    Ok(sensitivity)
}

/// Prompts for a repetition count and then one integer score per repetition.
pub fn prompt_scores() -> Result<Vec<i64>> {
    let required_msg = Message::ScoresRequired.to_string();
    let repetitions: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptRepetitions.to_string())
        .validate_with(|input: &usize| -> Result<(), &str> {
            if *input > 0 {
                Ok(())
            } else {
                Err(&required_msg)
            }
        })
        .interact_text()?;

    let mut scores = Vec::with_capacity(repetitions);
    for repetition in 1..=repetitions {
        let score: i64 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptRepetitionScore(repetition).to_string())
            .interact_text()?;
        scores.push(score);
    }
    Ok(scores)
}

/// Records a session, prompting for whatever was not supplied.
///
/// Invalid input and unknown tasks are reported and leave the store untouched.
pub async fn handle_record<S: DocumentStore>(
    tracker: &Tracker<S>,
    task: &str,
    sensitivity: Option<f64>,
    scores: Option<Vec<i64>>,
) -> Result<()> {
    if tracker.get_task(task).await?.is_none() {
        msg_error!(Message::TaskNotFound(task.to_string()));
        return Ok(());
    }

    let sensitivity = match sensitivity {
        Some(sensitivity) => sensitivity,
        None => prompt_sensitivity()?,
    };
    let scores = match scores {
        Some(scores) => scores,
        None => prompt_scores()?,
    };

    let today = Local::now().date_naive();
    if let Some(outcome) = super::reported(tracker.record_session(task, &scores, sensitivity, today).await)? {
        print_outcome(task, scores.len(), &outcome);
    }
    Ok(())
}

fn print_outcome(task: &str, repetitions: usize, outcome: &SessionOutcome) {
    let stats = &outcome.stats;
    if outcome.attempts > 1 {
        msg_debug!(Message::StoreConflictRetry {
            task: task.to_string(),
            attempt: outcome.attempts,
        });
    }
    msg_success!(Message::SessionRecorded {
        task: task.to_string(),
        repetitions,
    });
    if outcome.is_new_highscore() {
        msg_success!(Message::NewHighscore(stats.highscore));
    }
    if stats.threshold_achieved {
        msg_success!(Message::ThresholdAchieved {
            best: stats.session_best,
            threshold: stats.threshold,
        });
    } else {
        msg_warning!(Message::ThresholdMissed {
            best: stats.session_best,
            threshold: stats.threshold,
        });
    }
}
