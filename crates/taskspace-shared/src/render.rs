//! Projection of the store into a view
//! description. Front ends rebuild their
//! regions from an [`AppView`] after every
//! mutation instead of patching the old
//! output.

use crate::model::{
  Priority,
  TaskId
};
use crate::store::WorkspaceStore;

#[derive(Debug, Clone, PartialEq)]
pub struct AppView {
  pub workspaces: WorkspaceListView,
  pub tasks:      Option<TaskListView>
}

#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct WorkspaceListView {
  pub items: Vec<WorkspaceItemView>
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkspaceItemView {
  pub name:       String,
  pub color:      String,
  pub selected:   bool,
  pub task_count: usize
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskListView {
  pub workspace: String,
  pub color:     String,
  pub tasks:     Vec<TaskItemView>
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskItemView {
  pub id:             TaskId,
  /// 1-based position in the list.
  pub position:       usize,
  pub title:          String,
  pub description:    String,
  pub date:           String,
  pub due_label:      String,
  pub priority:       Priority,
  pub priority_color: &'static str,
  pub completed:      bool
}

pub fn render(
  store: &WorkspaceStore
) -> AppView {
  AppView {
    workspaces: render_workspace_list(
      store
    ),
    tasks:      render_task_list(store)
  }
}

pub fn render_workspace_list(
  store: &WorkspaceStore
) -> WorkspaceListView {
  let selected = store.selected();
  WorkspaceListView {
    items: store
      .workspaces()
      .map(|workspace| {
        WorkspaceItemView {
          name:       workspace
            .name
            .clone(),
          color:      workspace
            .color
            .clone(),
          selected:   selected
            == Some(
              workspace.name.as_str()
            ),
          task_count: workspace
            .tasks
            .len()
        }
      })
      .collect()
  }
}

/// `None` when no workspace is selected.
pub fn render_task_list(
  store: &WorkspaceStore
) -> Option<TaskListView> {
  let workspace =
    store.selected_workspace()?;

  Some(TaskListView {
    workspace: workspace.name.clone(),
    color:     workspace.color.clone(),
    tasks:     workspace
      .tasks
      .iter()
      .enumerate()
      .map(|(index, task)| {
        TaskItemView {
          id:             task.id,
          position:       index + 1,
          title:          task
            .title
            .clone(),
          description:    task
            .description
            .clone(),
          date:           task.date.clone(),
          due_label:      format!(
            "Due Date: {}",
            task.date
          ),
          priority:       task.priority,
          priority_color: task
            .priority
            .color(),
          completed:      task.completed
        }
      })
      .collect()
  })
}
