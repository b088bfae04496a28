use indexmap::IndexMap;
use tracing::{
  debug,
  info
};

use crate::error::StoreError;
use crate::model::{
  Task,
  TaskId,
  Workspace
};

/// Workspaces keyed by name in display
/// order, plus the selected workspace.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceStore {
  workspaces: IndexMap<String, Workspace>,
  selected:   Option<String>
}

impl WorkspaceStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Builds a store from decoded
  /// workspaces. The map key wins over a
  /// disagreeing `name` field and blank
  /// keys are dropped.
  pub fn from_workspaces(
    workspaces: IndexMap<String, Workspace>
  ) -> Self {
    let workspaces = workspaces
      .into_iter()
      .filter(|(name, _)| {
        !name.trim().is_empty()
      })
      .map(|(name, mut workspace)| {
        workspace.name = name.clone();
        (name, workspace)
      })
      .collect();

    Self {
      workspaces,
      selected: None
    }
  }

  pub fn workspaces_map(
    &self
  ) -> &IndexMap<String, Workspace> {
    &self.workspaces
  }

  pub fn workspaces(
    &self
  ) -> impl Iterator<Item = &Workspace> {
    self.workspaces.values()
  }

  pub fn workspace(
    &self,
    name: &str
  ) -> Option<&Workspace> {
    self.workspaces.get(name)
  }

  pub fn contains(
    &self,
    name: &str
  ) -> bool {
    self.workspaces.contains_key(name)
  }

  pub fn len(&self) -> usize {
    self.workspaces.len()
  }

  pub fn is_empty(&self) -> bool {
    self.workspaces.is_empty()
  }

  pub fn first_name(
    &self
  ) -> Option<&str> {
    self
      .workspaces
      .keys()
      .next()
      .map(String::as_str)
  }

  pub fn selected(
    &self
  ) -> Option<&str> {
    self.selected.as_deref()
  }

  pub fn selected_workspace(
    &self
  ) -> Option<&Workspace> {
    self
      .selected
      .as_deref()
      .and_then(|name| {
        self.workspaces.get(name)
      })
  }

  /// Tasks of `name`, empty when the
  /// workspace does not exist.
  pub fn tasks(
    &self,
    name: &str
  ) -> &[Task] {
    self
      .workspaces
      .get(name)
      .map(|workspace| {
        workspace.tasks.as_slice()
      })
      .unwrap_or_default()
  }

  #[tracing::instrument(skip(self, color))]
  pub fn add_workspace(
    &mut self,
    name: &str,
    color: &str
  ) -> Result<(), StoreError> {
    if name.trim().is_empty() {
      return Err(
        StoreError::EmptyWorkspaceName
      );
    }
    if self.workspaces.contains_key(name)
    {
      debug!(
        name,
        "rejected duplicate workspace"
      );
      return Err(
        StoreError::DuplicateName(
          name.to_string()
        )
      );
    }

    self.workspaces.insert(
      name.to_string(),
      Workspace::new(name, color)
    );
    info!(
      name,
      color,
      count = self.workspaces.len(),
      "added workspace"
    );
    Ok(())
  }

  /// Removes the workspace and its
  /// tasks. Clears the selection when it
  /// pointed at the removed workspace.
  #[tracing::instrument(skip(self))]
  pub fn remove_workspace(
    &mut self,
    name: &str
  ) -> bool {
    let Some(removed) =
      self.workspaces.shift_remove(name)
    else {
      return false;
    };

    if self.selected.as_deref()
      == Some(name)
    {
      self.selected = None;
      debug!(
        name,
        "cleared selection of removed \
         workspace"
      );
    }

    info!(
      name,
      tasks = removed.tasks.len(),
      "removed workspace"
    );
    true
  }

  pub fn select_workspace(
    &mut self,
    name: &str
  ) -> Result<(), StoreError> {
    if !self.workspaces.contains_key(name)
    {
      return Err(
        StoreError::UnknownWorkspace(
          name.to_string()
        )
      );
    }
    self.selected = Some(name.to_string());
    Ok(())
  }

  pub fn clear_selection(&mut self) {
    self.selected = None;
  }

  /// Appends `task`. Returns `None`
  /// without touching anything when the
  /// workspace is absent.
  #[tracing::instrument(
    skip(self, task),
    fields(id = %task.id)
  )]
  pub fn add_task(
    &mut self,
    workspace: &str,
    task: Task
  ) -> Option<TaskId> {
    let target =
      self.workspaces.get_mut(workspace)?;
    let id = task.id;
    target.tasks.push(task);
    debug!(
      count = target.tasks.len(),
      "appended task"
    );
    Some(id)
  }

  #[tracing::instrument(skip(self))]
  pub fn remove_task(
    &mut self,
    workspace: &str,
    id: TaskId
  ) -> Result<Task, StoreError> {
    let tasks = self.tasks_mut(workspace)?;
    let index = tasks
      .iter()
      .position(|task| task.id == id)
      .ok_or_else(|| {
        StoreError::TaskNotFound {
          workspace: workspace
            .to_string(),
          id
        }
      })?;
    Ok(tasks.remove(index))
  }

  /// Flips the completion flag and
  /// returns the new value.
  #[tracing::instrument(skip(self))]
  pub fn toggle_task_completed(
    &mut self,
    workspace: &str,
    id: TaskId
  ) -> Result<bool, StoreError> {
    let task = self
      .tasks_mut(workspace)?
      .iter_mut()
      .find(|task| task.id == id)
      .ok_or_else(|| {
        StoreError::TaskNotFound {
          workspace: workspace
            .to_string(),
          id
        }
      })?;
    task.completed = !task.completed;
    Ok(task.completed)
  }

  /// Resolves a zero-based rendered
  /// position to the id of the task
  /// shown there.
  pub fn task_id_at(
    &self,
    workspace: &str,
    index: usize
  ) -> Option<TaskId> {
    self
      .tasks(workspace)
      .get(index)
      .map(|task| task.id)
  }

  fn tasks_mut(
    &mut self,
    workspace: &str
  ) -> Result<&mut Vec<Task>, StoreError>
  {
    self
      .workspaces
      .get_mut(workspace)
      .map(|workspace| {
        &mut workspace.tasks
      })
      .ok_or_else(|| {
        StoreError::UnknownWorkspace(
          workspace.to_string()
        )
      })
  }
}

#[cfg(test)]
mod tests {
  use proptest::prelude::*;

  use super::*;
  use crate::model::Priority;

  fn task(title: &str) -> Task {
    Task::new(
      title,
      "",
      "2024-08-12",
      Priority::Low
    )
  }

  fn store_with(
    names: &[&str]
  ) -> WorkspaceStore {
    let mut store = WorkspaceStore::new();
    for name in names {
      store
        .add_workspace(name, "#123456")
        .expect("add workspace");
    }
    store
  }

  #[test]
  fn add_task_touches_only_its_workspace()
  {
    let mut store =
      store_with(&["a", "b"]);
    store.add_task("b", task("keep"));
    let before_b =
      store.workspace("b").cloned();

    store
      .add_task("a", task("new"))
      .expect("workspace exists");

    assert_eq!(store.tasks("a").len(), 1);
    assert_eq!(
      store.workspace("b").cloned(),
      before_b
    );
  }

  #[test]
  fn add_task_to_missing_workspace_is_a_no_op()
  {
    let mut store = store_with(&["a"]);
    let before = store.clone();
    assert!(
      store
        .add_task("nope", task("x"))
        .is_none()
    );
    assert_eq!(store, before);
  }

  #[test]
  fn duplicate_workspace_leaves_store_unmodified()
  {
    let mut store = store_with(&["a"]);
    store.add_task("a", task("t"));
    let before = store.clone();

    let err = store
      .add_workspace("a", "#ffffff")
      .expect_err("duplicate");

    assert_eq!(
      err,
      StoreError::DuplicateName(
        "a".to_string()
      )
    );
    assert_eq!(store, before);
    assert_eq!(
      err.to_string(),
      "Workspace with this name already \
       exists."
    );
  }

  #[test]
  fn blank_workspace_name_is_rejected() {
    let mut store = WorkspaceStore::new();
    assert_eq!(
      store.add_workspace("  ", "#000000"),
      Err(StoreError::EmptyWorkspaceName)
    );
    assert!(store.is_empty());
  }

  #[test]
  fn removing_selected_workspace_clears_selection()
  {
    let mut store =
      store_with(&["a", "b", "c"]);
    store.add_task("b", task("t"));
    store
      .select_workspace("b")
      .expect("select");

    assert!(store.remove_workspace("b"));

    assert_eq!(store.selected(), None);
    assert!(
      store.selected_workspace().is_none()
    );
    assert!(store.tasks("b").is_empty());
    let names: Vec<&str> = store
      .workspaces()
      .map(|w| w.name.as_str())
      .collect();
    assert_eq!(names, vec!["a", "c"]);
  }

  #[test]
  fn removing_other_workspace_keeps_selection()
  {
    let mut store =
      store_with(&["a", "b"]);
    store
      .select_workspace("a")
      .expect("select");
    assert!(store.remove_workspace("b"));
    assert!(!store.remove_workspace("b"));
    assert_eq!(store.selected(), Some("a"));
  }

  #[test]
  fn selecting_unknown_workspace_keeps_selection()
  {
    let mut store = store_with(&["a"]);
    store
      .select_workspace("a")
      .expect("select");
    assert_eq!(
      store.select_workspace("zzz"),
      Err(StoreError::UnknownWorkspace(
        "zzz".to_string()
      ))
    );
    assert_eq!(store.selected(), Some("a"));
  }

  #[test]
  fn stale_task_id_is_reported() {
    let mut store = store_with(&["a"]);
    let id = store
      .add_task("a", task("t"))
      .expect("added");
    store
      .remove_task("a", id)
      .expect("first removal");

    assert!(matches!(
      store.remove_task("a", id),
      Err(StoreError::TaskNotFound { .. })
    ));
    assert!(matches!(
      store.toggle_task_completed("x", id),
      Err(StoreError::UnknownWorkspace(_))
    ));
  }

  #[test]
  fn task_id_at_follows_rendered_order() {
    let mut store = store_with(&["a"]);
    let first = store
      .add_task("a", task("1"))
      .expect("added");
    let second = store
      .add_task("a", task("2"))
      .expect("added");

    assert_eq!(
      store.task_id_at("a", 0),
      Some(first)
    );
    assert_eq!(
      store.task_id_at("a", 1),
      Some(second)
    );
    assert_eq!(store.task_id_at("a", 2), None);
  }

  #[test]
  fn map_key_wins_over_stored_name() {
    let mut raw = IndexMap::new();
    raw.insert(
      "Home".to_string(),
      Workspace::new("Other", "#fff")
    );
    raw.insert(
      " ".to_string(),
      Workspace::new(" ", "#000")
    );

    let store =
      WorkspaceStore::from_workspaces(raw);
    assert_eq!(store.len(), 1);
    assert_eq!(
      store
        .workspace("Home")
        .map(|w| w.name.as_str()),
      Some("Home")
    );
  }

  proptest! {
    #[test]
    fn delete_preserves_relative_order(
      count in 1_usize..12,
      pick in any::<prop::sample::Index>()
    ) {
      let mut store = store_with(&["w"]);
      for n in 0..count {
        store.add_task("w", task(&n.to_string()));
      }
      let index = pick.index(count);
      let mut expected: Vec<String> = store
        .tasks("w")
        .iter()
        .map(|t| t.title.clone())
        .collect();
      let removed_title = expected.remove(index);

      let id = store.task_id_at("w", index).expect("in range");
      let removed = store.remove_task("w", id).expect("removed");

      prop_assert_eq!(removed.title, removed_title);
      let remaining: Vec<String> = store
        .tasks("w")
        .iter()
        .map(|t| t.title.clone())
        .collect();
      prop_assert_eq!(remaining, expected);
    }

    #[test]
    fn double_toggle_restores_flag(
      count in 1_usize..8,
      pick in any::<prop::sample::Index>(),
      start in any::<bool>()
    ) {
      let mut store = store_with(&["w"]);
      for n in 0..count {
        let mut t = task(&n.to_string());
        t.completed = start;
        store.add_task("w", t);
      }
      let before = store.clone();
      let id = store
        .task_id_at("w", pick.index(count))
        .expect("in range");

      let flipped = store.toggle_task_completed("w", id).expect("toggle");
      prop_assert_eq!(flipped, !start);
      let restored = store.toggle_task_completed("w", id).expect("toggle");
      prop_assert_eq!(restored, start);
      prop_assert_eq!(store, before);
    }
  }
}
