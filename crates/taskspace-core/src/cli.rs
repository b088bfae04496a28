use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::anyhow;
use clap::{ArgAction, Parser, Subcommand};
use taskspace_shared::Priority;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct KeyVal {
    pub key: String,
    pub value: String,
}

impl std::str::FromStr for KeyVal {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (k, v) = s
            .split_once('=')
            .ok_or_else(|| anyhow!("expected KEY=VALUE, got: {s}"))?;
        Ok(Self {
            key: k.trim().to_string(),
            value: v.trim().to_string(),
        })
    }
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "taskspace",
    version,
    about = "Taskspace: tasks organized into color-tagged workspaces",
    disable_help_subcommand = true
)]
pub struct GlobalCli {
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[arg(short = 'q', long = "quiet", action = ArgAction::Count, global = true)]
    pub quiet: u8,

    #[arg(
        long = "rc",
        value_parser = clap::builder::ValueParser::new(|s: &str| s.parse::<KeyVal>()),
        action = ArgAction::Append,
        global = true
    )]
    pub rc_overrides: Vec<KeyVal>,

    #[arg(long = "taskspacerc", global = true)]
    pub taskspacerc: Option<PathBuf>,

    #[arg(long = "data", global = true)]
    pub data: Option<PathBuf>,

    /// Workspace to select for this invocation; defaults to the first one.
    #[arg(short = 'w', long = "workspace", global = true)]
    pub workspace: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// List workspaces, marking the selected one.
    Workspaces,

    /// Create a workspace.
    AddWorkspace {
        name: String,
        #[arg(long, default_value = "#000000")]
        color: String,
    },

    /// Delete a workspace and all of its tasks.
    RemoveWorkspace { name: String },

    /// List the tasks of the selected workspace.
    Tasks,

    /// Add a task to the selected workspace.
    AddTask {
        title: String,
        #[arg(short, long, default_value = "")]
        description: String,
        /// Due date (YYYY-MM-DD); defaults to today.
        #[arg(long)]
        due: Option<String>,
        #[arg(short, long, default_value = "low")]
        priority: Priority,
    },

    /// Flip the completion flag of the task at POSITION.
    Toggle { position: usize },

    /// Delete the task at POSITION.
    Delete { position: usize },

    /// Print the persisted workspace JSON.
    Export,
}

impl Command {
    /// Maps `default.command` onto a subcommand that takes no arguments.
    pub fn from_default_name(name: &str) -> Option<Self> {
        match name.trim() {
            "workspaces" => Some(Self::Workspaces),
            "tasks" => Some(Self::Tasks),
            "export" => Some(Self::Export),
            _ => None,
        }
    }
}

pub fn init_tracing(verbose: u8, quiet: u8) -> anyhow::Result<()> {
    let default_level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))?;

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_add_task_with_globals_after_subcommand() {
        let cli = GlobalCli::try_parse_from([
            "taskspace",
            "add-task",
            "Test",
            "--priority",
            "high",
            "-w",
            "Personal",
            "--rc",
            "color=off",
        ])
        .expect("parse");

        assert_eq!(cli.workspace.as_deref(), Some("Personal"));
        assert_eq!(cli.rc_overrides.len(), 1);
        assert_eq!(cli.rc_overrides[0].value, "off");
        assert_eq!(
            cli.command,
            Some(Command::AddTask {
                title: "Test".to_string(),
                description: String::new(),
                due: None,
                priority: Priority::High,
            })
        );
    }

    #[test]
    fn rejects_unknown_priority_and_bad_override() {
        assert!(GlobalCli::try_parse_from(["taskspace", "add-task", "x", "-p", "urgent"]).is_err());
        assert!(GlobalCli::try_parse_from(["taskspace", "--rc", "novalue"]).is_err());
    }

    #[test]
    fn no_subcommand_is_allowed() {
        let cli = GlobalCli::try_parse_from(["taskspace", "-v"]).expect("parse");
        assert_eq!(cli.command, None);
        assert_eq!(cli.verbose, 1);
        assert_eq!(Command::from_default_name("tasks"), Some(Command::Tasks));
        assert_eq!(Command::from_default_name("toggle"), None);
    }
}
