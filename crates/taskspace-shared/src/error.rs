use thiserror::Error;

use crate::model::TaskId;

/// Rejected user actions. None of these
/// leave a partial mutation behind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
  #[error(
    "Workspace with this name already \
     exists."
  )]
  DuplicateName(String),

  #[error("Workspace name is required.")]
  EmptyWorkspaceName,

  #[error(
    "Please select a workspace first."
  )]
  NoWorkspaceSelected,

  #[error("Task title is required.")]
  MissingTitle,

  #[error("No workspace named {0:?}.")]
  UnknownWorkspace(String),

  #[error(
    "Task {id} not found in workspace \
     {workspace:?}."
  )]
  TaskNotFound {
    workspace: String,
    id:        TaskId
  }
}

#[derive(Debug, Error)]
pub enum StorageError {
  #[error("storage unavailable: {0}")]
  Unavailable(String),

  #[error("storage write failed: {0}")]
  Write(String),

  #[error(
    "failed to encode workspaces: {0}"
  )]
  Encode(#[from] serde_json::Error)
}
