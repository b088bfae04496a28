use taskspace_shared::WorkspaceItemView;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

#[derive(Properties, PartialEq)]
pub struct WorkspaceListRowProps {
  pub item:      WorkspaceItemView,
  pub on_select: Callback<String>,
  pub on_delete: Callback<String>
}

#[function_component(WorkspaceListRow)]
pub fn workspace_list_row(
  props: &WorkspaceListRowProps
) -> Html {
  let on_select = {
    let on_select =
      props.on_select.clone();
    let name = props.item.name.clone();
    Callback::from(move |_: MouseEvent| {
      on_select.emit(name.clone());
    })
  };
  let on_delete = {
    let on_delete =
      props.on_delete.clone();
    let name = props.item.name.clone();
    Callback::from(
      move |e: MouseEvent| {
        e.stop_propagation();
        on_delete.emit(name.clone());
      }
    )
  };

  let class = if props.item.selected {
    "workspace-row selected"
  } else {
    "workspace-row"
  };

  html! {
      <div class={class}>
          <button
              class="workspace-title"
              style={format!("border-left: 0.5rem {} solid", props.item.color)}
              onclick={on_select}
          >
              { props.item.name.clone() }
              <span class="badge">{ props.item.task_count.to_string() }</span>
          </button>
          <button class="delete" title="Delete workspace" onclick={on_delete}>{ "x" }</button>
      </div>
  }
}
