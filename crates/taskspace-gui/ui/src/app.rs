use std::cell::RefCell;
use std::rc::Rc;

use gloo::dialogs::alert;
use taskspace_shared::{
  AppView,
  Controller,
  Redraw,
  StoreError,
  TaskDraft,
  TaskId,
  WorkspaceDraft
};
use yew::{
  Callback,
  Html,
  MouseEvent,
  UseStateHandle,
  function_component,
  html,
  use_effect_with,
  use_mut_ref,
  use_state
};

use crate::components::{
  TaskForm,
  TaskList,
  WorkspaceForm,
  WorkspaceList
};
use crate::storage::BrowserStorage;

type SharedController =
  Rc<RefCell<Controller<BrowserStorage>>>;

/// Recomputes the view after a mutation.
/// Regions the operation did not touch
/// keep their previous description.
fn redraw(
  controller: &SharedController,
  view: &UseStateHandle<AppView>,
  regions: Redraw
) {
  if !regions.any() {
    return;
  }

  let fresh = controller.borrow().view();
  let mut next = (**view).clone();
  if regions.workspaces {
    next.workspaces = fresh.workspaces;
  }
  if regions.tasks {
    next.tasks = fresh.tasks;
  }
  view.set(next);
}

fn report(err: &StoreError) {
  tracing::warn!(
    error = %err,
    "rejected user action"
  );
  alert(&err.to_string());
}

#[function_component(App)]
pub fn app() -> Html {
  let controller = use_mut_ref(|| {
    Controller::bootstrap(BrowserStorage)
  });
  let view = {
    let controller = controller.clone();
    use_state(move || {
      controller.borrow().view()
    })
  };
  let workspace_form_open =
    use_state(|| false);
  let task_form_open =
    use_state(|| false);

  {
    use_effect_with((), move |_| {
      tracing::debug!(
        "frontend mounted"
      );
      || ()
    });
  }

  let on_select_workspace = {
    let controller = controller.clone();
    let view = view.clone();
    Callback::from(move |name: String| {
      let result = controller
        .borrow_mut()
        .select_workspace(&name);
      match result {
        | Ok(regions) => {
          tracing::debug!(
            workspace = %name,
            "selected workspace"
          );
          redraw(
            &controller,
            &view,
            regions
          );
        }
        | Err(err) => report(&err)
      }
    })
  };

  let on_delete_workspace = {
    let controller = controller.clone();
    let view = view.clone();
    let task_form_open =
      task_form_open.clone();
    Callback::from(move |name: String| {
      let regions = controller
        .borrow_mut()
        .delete_workspace(&name);
      if regions.tasks {
        task_form_open.set(false);
      }
      redraw(&controller, &view, regions);
    })
  };

  let on_new_workspace = {
    let workspace_form_open =
      workspace_form_open.clone();
    Callback::from(move |_: MouseEvent| {
      workspace_form_open.set(true);
    })
  };

  let on_cancel_workspace = {
    let workspace_form_open =
      workspace_form_open.clone();
    Callback::from(move |_: MouseEvent| {
      workspace_form_open.set(false);
    })
  };

  let on_submit_workspace = {
    let controller = controller.clone();
    let view = view.clone();
    let workspace_form_open =
      workspace_form_open.clone();
    Callback::from(
      move |draft: WorkspaceDraft| {
        let result = controller
          .borrow_mut()
          .create_workspace(draft);
        match result {
          | Ok(regions) => {
            workspace_form_open.set(false);
            redraw(
              &controller,
              &view,
              regions
            );
          }
          | Err(err) => report(&err)
        }
      }
    )
  };

  let on_new_task = {
    let controller = controller.clone();
    let task_form_open =
      task_form_open.clone();
    Callback::from(move |_: MouseEvent| {
      if controller
        .borrow()
        .store()
        .selected()
        .is_some()
      {
        task_form_open.set(true);
      } else {
        report(
          &StoreError::NoWorkspaceSelected
        );
      }
    })
  };

  let on_cancel_task = {
    let task_form_open =
      task_form_open.clone();
    Callback::from(move |_: MouseEvent| {
      task_form_open.set(false);
    })
  };

  let on_submit_task = {
    let controller = controller.clone();
    let view = view.clone();
    let task_form_open =
      task_form_open.clone();
    Callback::from(
      move |draft: TaskDraft| {
        let result = controller
          .borrow_mut()
          .create_task(draft);
        match result {
          | Ok(id) => {
            tracing::debug!(
              id = %id,
              "created task"
            );
            task_form_open.set(false);
            redraw(
              &controller,
              &view,
              Redraw::ALL
            );
          }
          | Err(err) => report(&err)
        }
      }
    )
  };

  let on_toggle_task = {
    let controller = controller.clone();
    let view = view.clone();
    Callback::from(
      move |(workspace, id): (
        String,
        TaskId
      )| {
        let result = controller
          .borrow_mut()
          .toggle_task(&workspace, id);
        match result {
          | Ok(regions) => redraw(
            &controller,
            &view,
            regions
          ),
          | Err(err) => report(&err)
        }
      }
    )
  };

  let on_delete_task = {
    let controller = controller.clone();
    let view = view.clone();
    Callback::from(
      move |(workspace, id): (
        String,
        TaskId
      )| {
        let result = controller
          .borrow_mut()
          .delete_task(&workspace, id);
        match result {
          | Ok(regions) => redraw(
            &controller,
            &view,
            regions
          ),
          | Err(err) => report(&err)
        }
      }
    )
  };

  let selected_name = view
    .tasks
    .as_ref()
    .map(|tasks| tasks.workspace.clone());

  html! {
      <div class="app">
          <WorkspaceList
              view={view.workspaces.clone()}
              on_select={on_select_workspace}
              on_delete={on_delete_workspace}
              on_new={on_new_workspace}
          />
          <TaskList
              view={view.tasks.clone()}
              on_toggle={on_toggle_task}
              on_delete={on_delete_task}
              on_new={on_new_task}
          />
          {
              if *workspace_form_open {
                  html! {
                      <WorkspaceForm
                          on_submit={on_submit_workspace}
                          on_cancel={on_cancel_workspace}
                      />
                  }
              } else {
                  html! {}
              }
          }
          {
              match (selected_name, *task_form_open) {
                  | (Some(workspace), true) => html! {
                      <TaskForm
                          {workspace}
                          on_submit={on_submit_task}
                          on_cancel={on_cancel_task}
                      />
                  },
                  | _ => html! {}
              }
          }
      </div>
  }
}
