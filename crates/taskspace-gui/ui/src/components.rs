mod task_form;
mod task_list;
mod task_list_row;
mod workspace_form;
mod workspace_list;
mod workspace_list_row;

pub use task_form::TaskForm;
pub use task_list::TaskList;
pub use task_list_row::TaskListRow;
pub use workspace_form::WorkspaceForm;
pub use workspace_list::WorkspaceList;
pub use workspace_list_row::WorkspaceListRow;
