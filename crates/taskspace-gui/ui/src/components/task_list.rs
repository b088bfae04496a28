use taskspace_shared::{
  TaskId,
  TaskListView
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::TaskListRow;

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
  pub view:      Option<TaskListView>,
  pub on_toggle: Callback<(String, TaskId)>,
  pub on_delete: Callback<(String, TaskId)>,
  pub on_new:    Callback<MouseEvent>
}

#[function_component(TaskList)]
pub fn task_list(
  props: &TaskListProps
) -> Html {
  let header = html! {
      <div class="header">
          {
              props
                  .view
                  .as_ref()
                  .map(|view| view.workspace.clone())
                  .unwrap_or_else(|| "Tasks".to_string())
          }
          <button class="btn" onclick={props.on_new.clone()}>{ "+ New To-Do" }</button>
      </div>
  };

  let Some(view) = &props.view else {
      return html! {
          <div class="panel inbox">
              { header }
              <div class="empty">{ "Select a workspace to see its tasks." }</div>
          </div>
      };
  };

  html! {
      <div class="panel inbox">
          { header }
          {
              for view.tasks.iter().map(|task| {
                  let workspace = view.workspace.clone();
                  let on_toggle = props.on_toggle.clone();
                  let on_toggle = Callback::from({
                      let workspace = workspace.clone();
                      move |id: TaskId| on_toggle.emit((workspace.clone(), id))
                  });
                  let on_delete = props.on_delete.clone();
                  let on_delete = Callback::from(move |id: TaskId| {
                      on_delete.emit((workspace.clone(), id))
                  });
                  html! {
                      <TaskListRow
                          key={task.id.to_string()}
                          task={task.clone()}
                          {on_toggle}
                          {on_delete}
                      />
                  }
              })
          }
      </div>
  }
}
