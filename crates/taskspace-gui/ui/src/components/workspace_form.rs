use taskspace_shared::WorkspaceDraft;
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state
};

#[derive(Properties, PartialEq)]
pub struct WorkspaceFormProps {
  pub on_submit: Callback<WorkspaceDraft>,
  pub on_cancel: Callback<MouseEvent>
}

#[function_component(WorkspaceForm)]
pub fn workspace_form(
  props: &WorkspaceFormProps
) -> Html {
  let name = use_state(String::new);
  let color =
    use_state(|| "#000000".to_string());

  let on_name_input = {
    let name = name.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        name.set(input.value());
      }
    )
  };

  let on_color_input = {
    let color = color.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlInputElement =
          e.target_unchecked_into();
        color.set(input.value());
      }
    )
  };

  let on_submit = {
    let name = name.clone();
    let color = color.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(WorkspaceDraft {
          name:  (*name).clone(),
          color: (*color).clone()
        });
      }
    )
  };

  html! {
      <form class="modal" onsubmit={on_submit}>
          <div class="header">{ "New Workspace" }</div>
          <div class="field">
              <label for="name">{ "Name" }</label>
              <input
                  id="name"
                  required={true}
                  value={(*name).clone()}
                  oninput={on_name_input}
                  placeholder="Workspace name"
              />
          </div>
          <div class="field">
              <label for="color">{ "Color" }</label>
              <input
                  id="color"
                  type="color"
                  value={(*color).clone()}
                  oninput={on_color_input}
              />
          </div>
          <div class="footer">
              <button type="button" class="btn" onclick={props.on_cancel.clone()}>{ "Cancel" }</button>
              <button type="submit" class="btn" disabled={name.trim().is_empty()}>{ "Create" }</button>
          </div>
      </form>
  }
}
