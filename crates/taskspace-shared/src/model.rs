use std::fmt;
use std::str::FromStr;

use serde::{
  Deserialize,
  Serialize
};
use uuid::Uuid;

#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  PartialOrd,
  Ord,
  Hash,
)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
  pub fn new() -> Self {
    Self(Uuid::new_v4())
  }

  pub fn as_uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for TaskId {
  fn default() -> Self {
    Self::new()
  }
}

impl From<Uuid> for TaskId {
  fn from(value: Uuid) -> Self {
    Self(value)
  }
}

impl fmt::Display for TaskId {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    fmt::Display::fmt(&self.0, f)
  }
}

/// Stored under its display color so
/// the persisted blob reads the same as
/// the rendered view.
#[derive(
  Debug,
  Clone,
  Copy,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
  Default,
)]
pub enum Priority {
  #[default]
  #[serde(rename = "green", alias = "low")]
  Low,
  #[serde(
    rename = "yellow",
    alias = "medium"
  )]
  Medium,
  #[serde(rename = "red", alias = "high")]
  High
}

impl Priority {
  /// Maps the high/medium/low radio
  /// group onto a priority. High wins
  /// over medium; nothing checked is
  /// low.
  pub fn from_selector(
    high: bool,
    medium: bool
  ) -> Self {
    if high {
      Self::High
    } else if medium {
      Self::Medium
    } else {
      Self::Low
    }
  }

  pub fn color(&self) -> &'static str {
    match self {
      | Self::Low => "green",
      | Self::Medium => "yellow",
      | Self::High => "red"
    }
  }

  pub fn label(&self) -> &'static str {
    match self {
      | Self::Low => "low",
      | Self::Medium => "medium",
      | Self::High => "high"
    }
  }
}

impl FromStr for Priority {
  type Err = String;

  fn from_str(
    s: &str
  ) -> Result<Self, Self::Err> {
    match s
      .trim()
      .to_ascii_lowercase()
      .as_str()
    {
      | "low" | "green" | "l" => {
        Ok(Self::Low)
      }
      | "medium" | "yellow" | "m" => {
        Ok(Self::Medium)
      }
      | "high" | "red" | "h" => {
        Ok(Self::High)
      }
      | other => Err(format!(
        "unknown priority: {other} \
         (expected low, medium or high)"
      ))
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(
    &self,
    f: &mut fmt::Formatter<'_>
  ) -> fmt::Result {
    f.write_str(self.label())
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Task {
  #[serde(default)]
  pub id:          TaskId,
  pub title:       String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub date:        String,
  #[serde(default)]
  pub priority:    Priority,
  #[serde(default)]
  pub completed:   bool
}

impl Task {
  pub fn new(
    title: impl Into<String>,
    description: impl Into<String>,
    date: impl Into<String>,
    priority: Priority
  ) -> Self {
    Self {
      id: TaskId::new(),
      title: title.into(),
      description: description.into(),
      date: date.into(),
      priority,
      completed: false
    }
  }
}

#[derive(
  Debug,
  Clone,
  Serialize,
  Deserialize,
  PartialEq,
  Eq,
)]
pub struct Workspace {
  pub name:  String,
  pub color: String,
  #[serde(default)]
  pub tasks: Vec<Task>
}

impl Workspace {
  pub fn new(
    name: impl Into<String>,
    color: impl Into<String>
  ) -> Self {
    Self {
      name:  name.into(),
      color: color.into(),
      tasks: Vec::new()
    }
  }
}

/// Raw values of the "new workspace"
/// form.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct WorkspaceDraft {
  pub name:  String,
  pub color: String
}

/// Raw values of the "new task" form.
#[derive(
  Debug, Clone, Default, PartialEq,
)]
pub struct TaskDraft {
  pub title:       String,
  pub description: String,
  pub date:        String,
  pub priority:    Priority
}

impl TaskDraft {
  pub fn into_task(self) -> Task {
    Task::new(
      self.title,
      self.description,
      self.date,
      self.priority
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn selector_defaults_to_low() {
    assert_eq!(
      Priority::from_selector(
        false, false
      ),
      Priority::Low
    );
    assert_eq!(
      Priority::from_selector(
        false, true
      ),
      Priority::Medium
    );
    assert_eq!(
      Priority::from_selector(
        true, false
      ),
      Priority::High
    );
    assert_eq!(
      Priority::High.color(),
      "red"
    );
    assert_eq!(
      Priority::Medium.color(),
      "yellow"
    );
    assert_eq!(
      Priority::default().color(),
      "green"
    );
  }

  #[test]
  fn priority_reads_colors_and_levels()
  {
    let parsed: Vec<Priority> =
      serde_json::from_str(
        r#"["red", "medium", "green"]"#
      )
      .expect("parse priorities");
    assert_eq!(
      parsed,
      vec![
        Priority::High,
        Priority::Medium,
        Priority::Low
      ]
    );
    assert_eq!(
      serde_json::to_string(
        &Priority::High
      )
      .expect("serialize"),
      "\"red\""
    );
    assert_eq!(
      "Medium".parse::<Priority>(),
      Ok(Priority::Medium)
    );
    assert!(
      "urgent"
        .parse::<Priority>()
        .is_err()
    );
  }

  #[test]
  fn task_without_id_gets_a_fresh_one()
  {
    let raw = r#"{"title":"a","description":"b","date":"2024-08-12","priority":"red","completed":true}"#;
    let first: Task =
      serde_json::from_str(raw)
        .expect("parse task");
    let second: Task =
      serde_json::from_str(raw)
        .expect("parse task");
    assert_ne!(first.id, second.id);
    assert!(first.completed);
    assert_eq!(
      first.priority,
      Priority::High
    );
  }

  #[test]
  fn new_task_starts_incomplete() {
    let task = TaskDraft {
      title:       "Test".to_string(),
      description: String::new(),
      date:        "2024-09-01"
        .to_string(),
      priority:    Priority::High
    }
    .into_task();
    assert!(!task.completed);
    assert_eq!(task.title, "Test");
  }
}
