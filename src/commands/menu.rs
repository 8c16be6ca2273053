//! Interactive menu.
//!
//! A loop of dialoguer selections over the same handlers the subcommands
//! use. The selected playlist and task live in an explicit [`MenuContext`]
//! that is passed to every action.

use super::{playlist, record, report, task};
use crate::{
    libs::{messages::Message, scoring::Period, tracker::Tracker, view::View},
    msg_error, msg_info, msg_print, msg_success,
    store::DocumentStore,
};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Select};
use std::io::Write;

/// Current selection carried between menu actions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuContext {
    pub playlist: Option<String>,
    pub task: Option<String>,
}

fn clear_console() {
    print!("\x1B[2J\x1B[1;1H");
    std::io::stdout().flush().ok();
}

fn choose(items: &[&str]) -> Result<usize> {
    Ok(Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptChoice.to_string())
        .items(items)
        .default(0)
        .interact()?)
}

/// Reports a failed action and keeps the menu running.
fn report_error(result: Result<()>) {
    if let Err(e) = result {
        msg_error!(e);
    }
}

pub async fn cmd<S: DocumentStore>(tracker: &Tracker<S>) -> Result<()> {
    let mut context = MenuContext::default();

    loop {
        clear_console();
        report_error(show_context(tracker, &context).await);

        match choose(&["Playlists", "Tasks", "Update", "View", "Refresh", "Exit"])? {
            0 => playlists_menu(tracker, &mut context).await?,
            1 => tasks_menu(tracker, &context).await?,
            2 => update_menu(tracker, &mut context).await?,
            3 => view_menu(tracker, &context).await?,
            4 => continue,
            _ => break,
        }
    }

    Ok(())
}

/// Shows the selection and, when a playlist is chosen, its tasks.
async fn show_context<S: DocumentStore>(tracker: &Tracker<S>, context: &MenuContext) -> Result<()> {
    match &context.playlist {
        Some(name) => {
            msg_print!(Message::PlaylistSelected(name.clone()));
            let tasks = tracker.playlist_tasks(name).await?;
            if !tasks.is_empty() {
                View::playlist_tasks(&tasks)?;
            }
        }
        None => msg_print!(Message::NoPlaylistSelected),
    }
    match &context.task {
        Some(name) => msg_print!(Message::TaskSelected(name.clone())),
        None => msg_print!(Message::NoTaskSelected),
    }
    Ok(())
}

async fn playlists_menu<S: DocumentStore>(tracker: &Tracker<S>, context: &mut MenuContext) -> Result<()> {
    loop {
        let items = [
            "Create playlist",
            "Edit playlist",
            "View playlists",
            "Delete playlist",
            "Delete all playlists",
            "Back",
        ];
        match choose(&items)? {
            0 => report_error(playlist::handle_create(tracker, None, None).await),
            1 => {
                report_error(playlist::handle_edit(tracker, None, None, None, true).await);
                // A rename may have removed the selected playlist.
                forget_missing_playlist(tracker, context).await?;
            }
            2 => report_error(playlist::handle_list(tracker).await),
            3 => {
                report_error(playlist::handle_delete(tracker, None).await);
                forget_missing_playlist(tracker, context).await?;
            }
            4 => {
                report_error(playlist::handle_delete_all(tracker).await);
                forget_missing_playlist(tracker, context).await?;
            }
            _ => return Ok(()),
        }
    }
}

async fn forget_missing_playlist<S: DocumentStore>(tracker: &Tracker<S>, context: &mut MenuContext) -> Result<()> {
    if let Some(name) = &context.playlist {
        if tracker.get_playlist(name).await?.is_none() {
            context.playlist = None;
        }
    }
    Ok(())
}

async fn tasks_menu<S: DocumentStore>(tracker: &Tracker<S>, context: &MenuContext) -> Result<()> {
    loop {
        let items = [
            "Create task",
            "Edit task",
            "View tasks in playlist",
            "View all tasks",
            "Delete task",
            "Delete all tasks",
            "Back",
        ];
        match choose(&items)? {
            0 => report_error(task::handle_create(tracker, None, None).await),
            1 => report_error(task::handle_edit(tracker, None, None).await),
            2 => report_error(task::handle_list_playlist(tracker, context.playlist.clone()).await),
            3 => report_error(task::handle_list(tracker).await),
            4 => report_error(task::handle_delete(tracker, None).await),
            5 => report_error(task::handle_delete_all(tracker).await),
            _ => return Ok(()),
        }
    }
}

async fn update_menu<S: DocumentStore>(tracker: &Tracker<S>, context: &mut MenuContext) -> Result<()> {
    loop {
        match choose(&["Choose playlist", "Choose task", "Update task", "View task data", "Back"])? {
            0 => {
                if let Some(name) = playlist::select_playlist(tracker).await? {
                    msg_success!(Message::PlaylistSelected(name.clone()));
                    context.playlist = Some(name);
                    context.task = None;
                }
            }
            1 => {
                if let Some(name) = select_context_task(tracker, context).await? {
                    msg_success!(Message::TaskSelected(name.clone()));
                    context.task = Some(name);
                }
            }
            2 => match &context.task {
                Some(name) => report_error(record::handle_record(tracker, name, None, None).await),
                None => msg_info!(Message::NoTaskSelected),
            },
            3 => match &context.task {
                Some(name) => match tracker.get_task(name).await? {
                    Some(task) => report_error(View::tasks(&[task])),
                    None => msg_error!(Message::TaskNotFound(name.clone())),
                },
                None => msg_info!(Message::NoTaskSelected),
            },
            _ => return Ok(()),
        }
    }
}

/// Picks a task from the selected playlist, or from all tasks when none is selected.
async fn select_context_task<S: DocumentStore>(tracker: &Tracker<S>, context: &MenuContext) -> Result<Option<String>> {
    let Some(playlist) = &context.playlist else {
        return task::select_task(tracker).await;
    };

    let names: Vec<String> = tracker
        .playlist_tasks(playlist)
        .await?
        .into_iter()
        .filter(|(_, task)| task.is_some())
        .map(|(name, _)| name)
        .collect();
    if names.is_empty() {
        msg_info!(Message::NoTasksFound);
        return Ok(None);
    }

    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&names)
        .default(0)
        .interact()?;
    Ok(Some(names[selection].clone()))
}

async fn view_menu<S: DocumentStore>(tracker: &Tracker<S>, context: &MenuContext) -> Result<()> {
    loop {
        let period = match choose(&["View day", "View week", "View month", "View year", "View all", "Back"])? {
            0 => Period::Day,
            1 => Period::Week,
            2 => Period::Month,
            3 => Period::Year,
            4 => Period::All,
            _ => return Ok(()),
        };
        report_error(report::handle_report(tracker, period, context.playlist.as_deref()).await);
    }
}
