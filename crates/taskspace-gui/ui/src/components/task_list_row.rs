use taskspace_shared::{
  TaskId,
  TaskItemView
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  classes,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct TaskListRowProps {
  pub task:      TaskItemView,
  pub on_toggle: Callback<TaskId>,
  pub on_delete: Callback<TaskId>
}

#[function_component(TaskListRow)]
pub fn task_list_row(
  props: &TaskListRowProps
) -> Html {
  let id = props.task.id;
  let on_toggle =
    props.on_toggle.clone();
  let on_delete =
    props.on_delete.clone();
  let color = props.task.priority_color;

  html! {
      <div
          class={classes!("task-container", props.task.completed.then_some("completed"))}
          style={format!("border-left: 0.5rem solid {color}")}
      >
          <div class="task-status">
              <input
                  type="checkbox"
                  class="status"
                  style={format!("accent-color: {color};")}
                  checked={props.task.completed}
                  onclick={move |_: MouseEvent| on_toggle.emit(id)}
              />
          </div>
          <div class="task-details">
              <div class="task-title">{ props.task.title.clone() }</div>
              <div>{ props.task.description.clone() }</div>
              <div>{ props.task.due_label.clone() }</div>
          </div>
          <div class="task-delete">
              <button class="delete" title="Delete task" onclick={move |_: MouseEvent| on_delete.emit(id)}>{ "x" }</button>
          </div>
      </div>
  }
}
