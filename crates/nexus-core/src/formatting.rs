use crossterm::style::Stylize;
use serde_json::{Map, Value};
use unicode_width::UnicodeWidthStr;

/// Keys keep insertion order.
pub type Row = Map<String, Value>;

/// Renders command output as JSON, aligned tables or key/value summaries.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputFormatter;

impl OutputFormatter {
    pub fn new() -> Self {
        Self
    }

    /// Pretty JSON with two-space indentation.
    pub fn format_json(&self, data: &Value) -> String {
        serde_json::to_string_pretty(data).unwrap_or_else(|_| data.to_string())
    }

    /// Columns default to the keys of the first row. Missing and null cells
    /// render empty.
    pub fn format_table(&self, rows: &[Row], columns: Option<&[&str]>, title: Option<&str>) -> String {
        if rows.is_empty() {
            return "No data to display".to_string();
        }

        let columns: Vec<String> = match columns {
            Some(cols) => cols.iter().map(|c| c.to_string()).collect(),
            None => rows[0].keys().cloned().collect(),
        };

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|row| columns.iter().map(|c| cell_text(row.get(c))).collect())
            .collect();

        let widths: Vec<usize> = columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|r| r[i].width())
                    .chain(std::iter::once(c.width()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let border = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let mut lines = Vec::with_capacity(rows.len() + 5);
        if let Some(title) = title {
            lines.push(title.to_string());
        }
        lines.push(border.clone());
        lines.push(render_row(&columns, &widths));
        lines.push(border.clone());
        for row in &cells {
            lines.push(render_row(row, &widths));
        }
        lines.push(border);
        lines.join("\n")
    }

    /// One `Key Name: value` line per entry; snake_case keys become Title Case.
    pub fn format_summary(&self, data: &Row, title: Option<&str>) -> String {
        let mut lines = Vec::new();
        if let Some(title) = title {
            lines.push(String::new());
            lines.push(title.to_string());
            lines.push("=".repeat(50));
        }
        for (key, value) in data {
            lines.push(format!("{}: {}", title_case(key), cell_text(Some(value))));
        }
        lines.join("\n")
    }

    pub fn print_json(&self, data: &Value) {
        println!("{}", self.format_json(data));
    }

    pub fn print_error(&self, message: &str) {
        eprintln!("{} {}", "Error:".bold().red(), message);
    }

    pub fn print_warning(&self, message: &str) {
        eprintln!("{} {}", "Warning:".bold().yellow(), message);
    }

    pub fn print_success(&self, message: &str) {
        println!("{} {}", "Success:".bold().green(), message);
    }
}

fn cell_text(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

fn render_row(cells: &[String], widths: &[usize]) -> String {
    let inner = cells
        .iter()
        .zip(widths)
        // pad by display columns; wide glyphs such as emoji take two
        .map(|(cell, w)| format!(" {}{} ", cell, " ".repeat(w.saturating_sub(cell.width()))))
        .collect::<Vec<_>>()
        .join("|");
    format!("|{}|", inner)
}

fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn json_is_pretty_printed() {
        let out = OutputFormatter::new().format_json(&json!({"a": [1]}));
        assert_eq!(out, "{\n  \"a\": [\n    1\n  ]\n}");
    }

    #[test]
    fn empty_table() {
        assert_eq!(
            OutputFormatter::new().format_table(&[], None, None),
            "No data to display"
        );
    }

    #[test]
    fn table_aligns_columns_and_blanks_missing_cells() {
        let rows = vec![
            row(json!({"tool": "git", "status": "Available"})),
            row(json!({"tool": "glab", "status": null})),
            row(json!({"tool": "jq"})),
        ];
        let out = OutputFormatter::new().format_table(&rows, Some(&["tool", "status"]), Some("Tools"));
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Tools");
        assert_eq!(lines[1], "+------+-----------+");
        assert_eq!(lines[2], "| tool | status    |");
        assert_eq!(lines[4], "| git  | Available |");
        assert_eq!(lines[5], "| glab |           |");
        assert_eq!(lines[6], "| jq   |           |");
        assert_eq!(lines.len(), 8);
    }

    #[test]
    fn table_columns_default_to_first_row_keys() {
        let rows = vec![row(json!({"id": 1, "name": "x"}))];
        let out = OutputFormatter::new().format_table(&rows, None, None);
        assert!(out.contains("| id | name |"));
        assert!(out.contains("| 1  | x    |"));
    }

    #[test]
    fn summary_and_default_columns_keep_insertion_order() {
        let mut data = Row::new();
        data.insert("repo_type".into(), json!("gitlab"));
        data.insert("config_file".into(), json!("x"));
        let fmt = OutputFormatter::new();

        let summary = fmt.format_summary(&data, None);
        assert_eq!(summary, "Repo Type: gitlab\nConfig File: x");

        let table = fmt.format_table(&[data], None, None);
        assert_eq!(table.lines().nth(1), Some("| repo_type | config_file |"));
    }

    #[test]
    fn table_aligns_wide_glyphs_by_display_width() {
        let rows = vec![
            row(json!({"Status": "✅ Available"})),
            row(json!({"Status": "n/a"})),
        ];
        let out = OutputFormatter::new().format_table(&rows, None, None);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "+--------------+");
        assert_eq!(lines[1], "| Status       |");
        assert_eq!(lines[3], "| ✅ Available |");
        assert_eq!(lines[4], "| n/a          |");
        for line in &lines {
            assert_eq!(line.width(), 16, "{line}");
        }
    }

    #[test]
    fn summary_title_cases_keys() {
        let data = row(json!({"repo_type": "gitlab", "config_file": null}));
        let out = OutputFormatter::new().format_summary(&data, Some("Status"));
        assert!(out.contains("Status\n=================================================="));
        assert!(out.contains("Repo Type: gitlab"));
        assert!(out.contains("Config File: "));
    }

    #[test]
    fn title_case_handles_odd_keys() {
        assert_eq!(title_case("already"), "Already");
        assert_eq!(title_case("__lead_TRAIL_"), "Lead Trail");
    }
}
