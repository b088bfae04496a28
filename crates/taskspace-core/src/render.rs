use std::io::{self, IsTerminal, Write};

use taskspace_shared::{Priority, TaskListView, WorkspaceListView};
use unicode_width::UnicodeWidthStr;

use crate::config::Config;

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    /// Color is used only when enabled and stdout is a terminal.
    pub fn new(cfg: &Config) -> Self {
        Self {
            color: cfg.color && io::stdout().is_terminal(),
        }
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_workspace_list(&self, view: &WorkspaceListView) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_workspace_list(&mut out, view)
    }

    #[tracing::instrument(skip(self, view))]
    pub fn print_task_list(&self, view: Option<&TaskListView>) -> anyhow::Result<()> {
        let mut out = io::stdout().lock();
        self.write_task_list(&mut out, view)
    }

    pub fn write_workspace_list<W: Write>(
        &self,
        mut out: W,
        view: &WorkspaceListView,
    ) -> anyhow::Result<()> {
        if view.items.is_empty() {
            writeln!(out, "No workspaces.")?;
            return Ok(());
        }

        let headers = vec![
            " ".to_string(),
            "Workspace".to_string(),
            "Color".to_string(),
            "Tasks".to_string(),
        ];

        let rows = view
            .items
            .iter()
            .map(|item| {
                let marker = if item.selected { "*" } else { " " };
                vec![
                    marker.to_string(),
                    self.paint_hex(&item.name, &item.color),
                    item.color.clone(),
                    item.task_count.to_string(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    pub fn write_task_list<W: Write>(
        &self,
        mut out: W,
        view: Option<&TaskListView>,
    ) -> anyhow::Result<()> {
        let Some(view) = view else {
            writeln!(out, "No workspace selected.")?;
            return Ok(());
        };

        writeln!(out, "{}", self.paint_hex(&view.workspace, &view.color))?;
        if view.tasks.is_empty() {
            writeln!(out, "No tasks.")?;
            return Ok(());
        }

        let headers = vec![
            "#".to_string(),
            "Done".to_string(),
            "Priority".to_string(),
            "Title".to_string(),
            "Description".to_string(),
            "Due".to_string(),
        ];

        let rows = view
            .tasks
            .iter()
            .map(|task| {
                let done = if task.completed { "[x]" } else { "[ ]" };
                vec![
                    self.paint(&task.position.to_string(), "33"),
                    done.to_string(),
                    self.paint(task.priority.label(), priority_code(task.priority)),
                    task.title.clone(),
                    task.description.clone(),
                    task.date.clone(),
                ]
            })
            .collect();

        write_table(out, headers, rows)
    }

    fn paint(&self, text: &str, code: &str) -> String {
        if !self.color {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }

    /// Truecolor foreground for `#rrggbb`; anything else is left plain.
    fn paint_hex(&self, text: &str, color: &str) -> String {
        match parse_hex_color(color) {
            Some((r, g, b)) => self.paint(text, &format!("38;2;{r};{g};{b}")),
            None => text.to_string(),
        }
    }
}

fn priority_code(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "32",
        Priority::Medium => "33",
        Priority::High => "31",
    }
}

fn parse_hex_color(value: &str) -> Option<(u8, u8, u8)> {
    let raw = value.trim().strip_prefix('#')?;
    if raw.len() != 6 || !raw.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&raw[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskspace_shared::{Controller, MemoryStorage};

    fn plain() -> Renderer {
        Renderer { color: false }
    }

    #[test]
    fn task_table_lists_positions_and_priorities() {
        let storage = MemoryStorage::new();
        let controller = Controller::bootstrap(&storage);
        let view = controller.view();

        let mut buf = Vec::new();
        plain()
            .write_task_list(&mut buf, view.tasks.as_ref())
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");

        assert!(text.starts_with("Errands\n"));
        assert!(text.contains("Buy Groceries"));
        assert!(text.contains("2024-08-12"));
        let first_row = text
            .lines()
            .find(|line| line.contains("Buy Groceries"))
            .expect("row");
        assert!(first_row.starts_with("1 "));
        assert!(first_row.contains("[ ]"));
        assert!(first_row.contains("low"));
    }

    #[test]
    fn workspace_table_marks_selection() {
        let storage = MemoryStorage::new();
        let controller = Controller::bootstrap(&storage);
        let mut buf = Vec::new();
        plain()
            .write_workspace_list(&mut buf, &controller.view().workspaces)
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");

        let errands = text.lines().find(|l| l.contains("Errands")).expect("row");
        let personal = text.lines().find(|l| l.contains("Personal")).expect("row");
        assert!(errands.starts_with('*'));
        assert!(personal.starts_with(' '));
    }

    #[test]
    fn empty_views_print_placeholders() {
        let mut buf = Vec::new();
        plain().write_task_list(&mut buf, None).expect("write");
        plain()
            .write_workspace_list(&mut buf, &WorkspaceListView::default())
            .expect("write");
        let text = String::from_utf8(buf).expect("utf8");
        assert_eq!(text, "No workspace selected.\nNo workspaces.\n");
    }

    #[test]
    fn hex_colors_become_truecolor_codes() {
        assert_eq!(parse_hex_color("#ff5733"), Some((255, 87, 51)));
        assert_eq!(parse_hex_color("blue"), None);
        let painted = Renderer { color: true }.paint_hex("x", "#0000ff");
        assert_eq!(painted, "\x1b[38;2;0;0;255mx\x1b[0m");
        assert_eq!(strip_ansi(&painted), "x");
    }
}
