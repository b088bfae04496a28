use anyhow::{Context, anyhow};
use chrono::Local;
use taskspace_shared::{
    Controller, KeyValueStorage, Redraw, StoreError, TaskDraft, TaskId, WorkspaceDraft,
};
use tracing::{debug, info, instrument};

use crate::cli::Command;
use crate::render::Renderer;

/// Applies the `--workspace` selection, then runs `command` and redraws
/// whatever it invalidated.
#[instrument(skip(controller, renderer))]
pub fn dispatch<S: KeyValueStorage>(
    controller: &mut Controller<S>,
    renderer: &Renderer,
    workspace: Option<&str>,
    command: Command,
) -> anyhow::Result<()> {
    if let Some(name) = workspace {
        controller.select_workspace(name)?;
    }

    debug!(?command, selected = ?controller.store().selected(), "dispatching command");

    let redraw = match command {
        Command::Workspaces => Redraw::WORKSPACES,
        Command::AddWorkspace { name, color } => cmd_add_workspace(controller, name, color)?,
        Command::RemoveWorkspace { name } => cmd_remove_workspace(controller, &name)?,
        Command::Tasks => Redraw::TASKS,
        Command::AddTask {
            title,
            description,
            due,
            priority,
        } => {
            let date = due.unwrap_or_else(|| Local::now().date_naive().format("%Y-%m-%d").to_string());
            cmd_add_task(
                controller,
                TaskDraft {
                    title,
                    description,
                    date,
                    priority,
                },
            )?
        }
        Command::Toggle { position } => {
            let (name, id) = resolve_position(controller, position)?;
            controller.toggle_task(&name, id)?
        }
        Command::Delete { position } => {
            let (name, id) = resolve_position(controller, position)?;
            controller.delete_task(&name, id)?
        }
        Command::Export => {
            let json = controller.export().context("failed to encode workspaces")?;
            println!("{json}");
            Redraw::NONE
        }
    };

    redraw_regions(controller, renderer, redraw)
}

#[instrument(skip(controller))]
fn cmd_add_workspace<S: KeyValueStorage>(
    controller: &mut Controller<S>,
    name: String,
    color: String,
) -> anyhow::Result<Redraw> {
    info!("command add-workspace");
    let redraw = controller.create_workspace(WorkspaceDraft { name, color })?;
    Ok(redraw)
}

#[instrument(skip(controller))]
fn cmd_remove_workspace<S: KeyValueStorage>(
    controller: &mut Controller<S>,
    name: &str,
) -> anyhow::Result<Redraw> {
    info!("command remove-workspace");
    let redraw = controller.delete_workspace(name);
    if !redraw.any() {
        return Err(anyhow!("no workspace named {name:?}"));
    }
    Ok(redraw)
}

#[instrument(skip(controller, draft))]
fn cmd_add_task<S: KeyValueStorage>(
    controller: &mut Controller<S>,
    draft: TaskDraft,
) -> anyhow::Result<Redraw> {
    info!("command add-task");
    let id = controller.create_task(draft)?;
    println!("Created task {id}.");
    Ok(Redraw::TASKS)
}

/// Turns a 1-based position from the printed task list into the id of the
/// task currently shown there.
fn resolve_position<S: KeyValueStorage>(
    controller: &Controller<S>,
    position: usize,
) -> anyhow::Result<(String, TaskId)> {
    let store = controller.store();
    let name = store
        .selected()
        .ok_or(StoreError::NoWorkspaceSelected)?;
    let id = position
        .checked_sub(1)
        .and_then(|index| store.task_id_at(name, index))
        .ok_or_else(|| anyhow!("no task at position {position} in {name:?}"))?;
    Ok((name.to_string(), id))
}

fn redraw_regions<S: KeyValueStorage>(
    controller: &Controller<S>,
    renderer: &Renderer,
    redraw: Redraw,
) -> anyhow::Result<()> {
    if !redraw.any() {
        return Ok(());
    }

    let view = controller.view();
    if redraw.workspaces {
        renderer.print_workspace_list(&view.workspaces)?;
    }
    if redraw.workspaces && redraw.tasks {
        println!();
    }
    if redraw.tasks {
        renderer.print_task_list(view.tasks.as_ref())?;
    }
    Ok(())
}
