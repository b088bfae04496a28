use taskspace_shared::WorkspaceListView;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  function_component,
  html
};

use super::WorkspaceListRow;

#[derive(Properties, PartialEq)]
pub struct WorkspaceListProps {
  pub view:      WorkspaceListView,
  pub on_select: Callback<String>,
  pub on_delete: Callback<String>,
  pub on_new:    Callback<MouseEvent>
}

#[function_component(WorkspaceList)]
pub fn workspace_list(
  props: &WorkspaceListProps
) -> Html {
  html! {
      <div class="panel sections">
          <div class="header">
              { "Workspaces" }
              <button class="btn" onclick={props.on_new.clone()}>{ "+ New Workspace" }</button>
          </div>
          {
              for props.view.items.iter().map(|item| html! {
                  <WorkspaceListRow
                      key={item.name.clone()}
                      item={item.clone()}
                      on_select={props.on_select.clone()}
                      on_delete={props.on_delete.clone()}
                  />
              })
          }
      </div>
  }
}
