pub mod controller;
pub mod error;
pub mod model;
pub mod persistence;
pub mod render;
pub mod seed;
pub mod store;

pub use controller::{
  Controller,
  Redraw
};
pub use error::{
  StorageError,
  StoreError
};
pub use model::{
  Priority,
  Task,
  TaskDraft,
  TaskId,
  Workspace,
  WorkspaceDraft
};
pub use persistence::{
  KeyValueStorage,
  MemoryStorage,
  WORKSPACES_STORAGE_KEY
};
pub use render::{
  AppView,
  TaskItemView,
  TaskListView,
  WorkspaceItemView,
  WorkspaceListView
};
pub use store::WorkspaceStore;
