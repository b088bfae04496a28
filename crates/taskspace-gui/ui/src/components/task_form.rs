use taskspace_shared::{
  Priority,
  TaskDraft
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  Properties,
  SubmitEvent,
  TargetCast,
  function_component,
  html,
  use_state,
  UseStateHandle
};

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
  pub workspace: String,
  pub on_submit: Callback<TaskDraft>,
  pub on_cancel: Callback<MouseEvent>
}

fn text_input(
  state: &UseStateHandle<String>
) -> Callback<web_sys::InputEvent> {
  let state = state.clone();
  Callback::from(
    move |e: web_sys::InputEvent| {
      let input: web_sys::HtmlInputElement =
        e.target_unchecked_into();
      state.set(input.value());
    }
  )
}

#[function_component(TaskForm)]
pub fn task_form(
  props: &TaskFormProps
) -> Html {
  let title = use_state(String::new);
  let description =
    use_state(String::new);
  let date = use_state(String::new);
  let high = use_state(|| false);
  let medium = use_state(|| false);

  let on_description_input = {
    let description =
      description.clone();
    Callback::from(
      move |e: web_sys::InputEvent| {
        let input: web_sys::HtmlTextAreaElement =
          e.target_unchecked_into();
        description.set(input.value());
      }
    )
  };

  let radio = |high_checked: bool,
               medium_checked: bool| {
    let high = high.clone();
    let medium = medium.clone();
    Callback::from(move |_: MouseEvent| {
      high.set(high_checked);
      medium.set(medium_checked);
    })
  };

  let on_submit = {
    let title = title.clone();
    let description =
      description.clone();
    let date = date.clone();
    let high = high.clone();
    let medium = medium.clone();
    let on_submit =
      props.on_submit.clone();
    Callback::from(
      move |e: SubmitEvent| {
        e.prevent_default();
        on_submit.emit(TaskDraft {
          title:       (*title).clone(),
          description: (*description)
            .clone(),
          date:        (*date).clone(),
          priority:
            Priority::from_selector(
              *high, *medium
            )
        });
      }
    )
  };

  let low_checked = !*high && !*medium;

  html! {
      <form class="modal" onsubmit={on_submit}>
          <div class="header">{ format!("New To-Do in {}", props.workspace) }</div>
          <div class="field">
              <label for="title">{ "Title" }</label>
              <input id="title" required={true} value={(*title).clone()} oninput={text_input(&title)} />
          </div>
          <div class="field">
              <label for="description">{ "Description" }</label>
              <textarea id="description" value={(*description).clone()} oninput={on_description_input} />
          </div>
          <div class="field">
              <label for="date">{ "Due Date" }</label>
              <input id="date" type="date" value={(*date).clone()} oninput={text_input(&date)} />
          </div>
          <div class="field priority">
              <label>
                  <input type="radio" name="priority" id="high" checked={*high} onclick={radio(true, false)} />
                  { "High" }
              </label>
              <label>
                  <input type="radio" name="priority" id="medium" checked={*medium} onclick={radio(false, true)} />
                  { "Medium" }
              </label>
              <label>
                  <input type="radio" name="priority" id="low" checked={low_checked} onclick={radio(false, false)} />
                  { "Low" }
              </label>
          </div>
          <div class="footer">
              <button type="button" class="btn" onclick={props.on_cancel.clone()}>{ "Cancel" }</button>
              <button type="submit" class="btn" disabled={title.trim().is_empty()}>{ "Add" }</button>
          </div>
      </form>
  }
}
