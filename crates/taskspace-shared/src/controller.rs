use tracing::{
  debug,
  info
};

use crate::error::{
  StorageError,
  StoreError
};
use crate::model::{
  TaskDraft,
  TaskId,
  WorkspaceDraft
};
use crate::persistence::{
  self,
  KeyValueStorage
};
use crate::render::{
  self,
  AppView
};
use crate::seed::seed_samples;
use crate::store::WorkspaceStore;

/// View regions invalidated by an
/// operation.
#[derive(
  Debug,
  Clone,
  Copy,
  Default,
  PartialEq,
  Eq,
)]
pub struct Redraw {
  pub workspaces: bool,
  pub tasks:      bool
}

impl Redraw {
  pub const NONE: Self = Self {
    workspaces: false,
    tasks:      false
  };
  pub const WORKSPACES: Self = Self {
    workspaces: true,
    tasks:      false
  };
  pub const TASKS: Self = Self {
    workspaces: false,
    tasks:      true
  };
  pub const ALL: Self = Self {
    workspaces: true,
    tasks:      true
  };

  pub fn any(&self) -> bool {
    self.workspaces || self.tasks
  }
}

/// Sole owner of the workspace store and
/// its storage backend. Every mutation is
/// persisted before it returns.
#[derive(Debug)]
pub struct Controller<S> {
  store:   WorkspaceStore,
  storage: S
}

impl<S: KeyValueStorage> Controller<S> {
  /// Loads the persisted store, seeding
  /// and persisting the samples when it is
  /// empty, then selects the first
  /// workspace.
  #[tracing::instrument(skip_all)]
  pub fn bootstrap(storage: S) -> Self {
    let mut store =
      persistence::load(&storage);

    if seed_samples(&mut store) {
      persistence::save(
        &storage, &store
      );
    }

    let first = store
      .first_name()
      .map(str::to_string);
    if let Some(name) = first {
      // Names come from the store itself.
      let _ = store.select_workspace(&name);
    }

    info!(
      workspaces = store.len(),
      selected = ?store.selected(),
      "bootstrapped workspace store"
    );

    Self { store, storage }
  }

  /// Wraps an existing store without
  /// loading or seeding.
  pub fn with_store(
    store: WorkspaceStore,
    storage: S
  ) -> Self {
    Self { store, storage }
  }

  pub fn store(&self) -> &WorkspaceStore {
    &self.store
  }

  pub fn storage(&self) -> &S {
    &self.storage
  }

  pub fn view(&self) -> AppView {
    render::render(&self.store)
  }

  pub fn export(
    &self
  ) -> Result<String, StorageError> {
    persistence::encode(&self.store)
  }

  #[tracing::instrument(skip(self))]
  pub fn create_workspace(
    &mut self,
    draft: WorkspaceDraft
  ) -> Result<Redraw, StoreError> {
    self.store.add_workspace(
      &draft.name,
      &draft.color
    )?;
    self.persist();
    Ok(Redraw::WORKSPACES)
  }

  #[tracing::instrument(skip(self))]
  pub fn delete_workspace(
    &mut self,
    name: &str
  ) -> Redraw {
    let was_selected =
      self.store.selected() == Some(name);
    if !self.store.remove_workspace(name) {
      debug!(
        name,
        "nothing to delete"
      );
      return Redraw::NONE;
    }
    self.persist();

    if was_selected {
      Redraw::ALL
    } else {
      Redraw::WORKSPACES
    }
  }

  #[tracing::instrument(skip(self))]
  pub fn select_workspace(
    &mut self,
    name: &str
  ) -> Result<Redraw, StoreError> {
    self.store.select_workspace(name)?;
    Ok(Redraw::ALL)
  }

  /// Appends a task built from `draft`
  /// to the selected workspace.
  #[tracing::instrument(skip(self, draft))]
  pub fn create_task(
    &mut self,
    draft: TaskDraft
  ) -> Result<TaskId, StoreError> {
    let workspace = self
      .store
      .selected()
      .map(str::to_string)
      .ok_or(
        StoreError::NoWorkspaceSelected
      )?;
    if draft.title.trim().is_empty() {
      return Err(StoreError::MissingTitle);
    }

    let id = self
      .store
      .add_task(
        &workspace,
        draft.into_task()
      )
      .ok_or_else(|| {
        StoreError::UnknownWorkspace(
          workspace.clone()
        )
      })?;
    self.persist();
    info!(
      workspace = %workspace,
      id = %id,
      "created task"
    );
    Ok(id)
  }

  #[tracing::instrument(skip(self))]
  pub fn delete_task(
    &mut self,
    workspace: &str,
    id: TaskId
  ) -> Result<Redraw, StoreError> {
    self.store.remove_task(workspace, id)?;
    self.persist();
    Ok(Redraw::ALL)
  }

  #[tracing::instrument(skip(self))]
  pub fn toggle_task(
    &mut self,
    workspace: &str,
    id: TaskId
  ) -> Result<Redraw, StoreError> {
    let completed = self
      .store
      .toggle_task_completed(
        workspace, id
      )?;
    debug!(completed, "toggled task");
    self.persist();
    Ok(Redraw::TASKS)
  }

  fn persist(&self) {
    persistence::save(
      &self.storage,
      &self.store
    );
  }
}
