use tracing::info;

use crate::model::{
  Priority,
  Task
};
use crate::store::WorkspaceStore;

struct SampleWorkspace {
  name:  &'static str,
  color: &'static str,
  tasks: [SampleTask; 3]
}

struct SampleTask {
  title:       &'static str,
  description: &'static str,
  date:        &'static str,
  priority:    Priority
}

const SAMPLES: [SampleWorkspace; 2] = [
  SampleWorkspace {
    name:  "Errands",
    color: "#0000ff",
    tasks: [
      SampleTask {
        title:       "Buy Groceries",
        description: "Milk, eggs, bread \
                      and fresh \
                      vegetables",
        date:        "2024-08-12",
        priority:    Priority::Low
      },
      SampleTask {
        title:       "Pick up Dry \
                      Cleaning",
        description: "Suits and the \
                      winter coat",
        date:        "2024-08-14",
        priority:    Priority::Medium
      },
      SampleTask {
        title:       "Pay Utility Bills",
        description: "Electricity and \
                      water before the \
                      due date",
        date:        "2024-08-15",
        priority:    Priority::High
      }
    ]
  },
  SampleWorkspace {
    name:  "Personal",
    color: "#ff5733",
    tasks: [
      SampleTask {
        title:       "Plan Vacation",
        description: "Research \
                      destinations and \
                      book flights",
        date:        "2024-08-25",
        priority:    Priority::High
      },
      SampleTask {
        title:       "Call Mom",
        description: "Catch up over the \
                      weekend",
        date:        "2024-08-18",
        priority:    Priority::Medium
      },
      SampleTask {
        title:       "Read a Book",
        description: "Finish the current \
                      novel",
        date:        "2024-08-30",
        priority:    Priority::Low
      }
    ]
  }
];

/// Fills an empty store with the sample
/// workspaces. Leaves a non-empty store
/// alone and reports whether it seeded.
pub fn seed_samples(
  store: &mut WorkspaceStore
) -> bool {
  if !store.is_empty() {
    return false;
  }

  for sample in &SAMPLES {
    if store
      .add_workspace(
        sample.name,
        sample.color
      )
      .is_err()
    {
      continue;
    }
    for task in &sample.tasks {
      store.add_task(
        sample.name,
        Task::new(
          task.title,
          task.description,
          task.date,
          task.priority
        )
      );
    }
  }

  info!(
    workspaces = store.len(),
    "seeded sample workspaces"
  );
  true
}
