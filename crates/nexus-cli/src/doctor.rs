use crate::app::App;
use anyhow::Result;
use crossterm::style::Stylize;
use nexus_core::formatting::Row;
use nexus_core::{CodeHost, IssueTracker, OutputFormatter, Vcs};
use serde_json::Value;
use std::ffi::{OsStr, OsString};
use std::io::Write;
use std::path::{Path, PathBuf};

// ── constants ────────────────────────────────────────────────────────────────

/// External command-line tools the integrations rely on.
const EXTERNAL_TOOLS: &[(&str, &str)] = &[
    ("git", "Version control"),
    ("gh", "GitHub CLI"),
    ("glab", "GitLab CLI"),
    ("jq", "JSON processor"),
    ("acli", "Atlassian CLI (JIRA)"),
];

const RULE_WIDTH: usize = 50;

// ── entry point ──────────────────────────────────────────────────────────────

pub fn run(app: &App, out: &mut impl Write) -> Result<()> {
    let path_var = std::env::var_os("PATH");
    report(app, path_var.as_deref(), out)
}

fn report(app: &App, path_var: Option<&OsStr>, out: &mut impl Write) -> Result<()> {
    writeln!(out, "\n🔍 {}", "Nexus Doctor".bold().cyan())?;
    writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;

    // configuration
    writeln!(out, "\n📋 Configuration:")?;
    match app.config.config_path() {
        Some(path) => writeln!(out, "  ✅ Config file: {}", path.display())?,
        None => {
            writeln!(out, "  ⚠️  No config file found (will use auto-detection)")?;
            writeln!(out, "     Expected locations:")?;
            for candidate in app.config.candidate_paths() {
                writeln!(out, "     - {}", candidate.display())?;
            }
        }
    }

    // environment
    writeln!(out, "\n🔧 Environment:")?;
    match app.config.code_host_type() {
        "unknown" => writeln!(out, "  ⚠️  Repository type: not detected")?,
        repo_type => writeln!(out, "  ✅ Repository type: {}", repo_type)?,
    }

    // registry
    writeln!(out, "\n🧩 Registered implementations:")?;
    let selector = app.selector();
    let registered = [
        ("CodeHost", selector.list_available_tools::<dyn CodeHost>()),
        ("IssueTracker", selector.list_available_tools::<dyn IssueTracker>()),
        ("Vcs", selector.list_available_tools::<dyn Vcs>()),
    ];
    for (interface, names) in registered {
        let listed = if names.is_empty() {
            "none".to_string()
        } else {
            names.join(", ")
        };
        writeln!(out, "  {}: {}", interface, listed)?;
    }

    // external tools
    writeln!(out, "\n🛠️  Available Tools:")?;
    let rows: Vec<Row> = EXTERNAL_TOOLS
        .iter()
        .map(|(tool, purpose)| {
            let status = if find_on_path(tool, path_var).is_some() {
                "✅ Available"
            } else {
                "❌ Not found"
            };
            let mut row = Row::new();
            row.insert("Tool".into(), Value::from(*tool));
            row.insert("Purpose".into(), Value::from(*purpose));
            row.insert("Status".into(), Value::from(status));
            row
        })
        .collect();
    let table = OutputFormatter::new().format_table(&rows, Some(&["Tool", "Purpose", "Status"]), None);
    writeln!(out, "{}", table)?;

    writeln!(out, "\n📊 Summary:")?;
    writeln!(out, "  Nexus is ready for use!")?;
    writeln!(out, "  Run 'nexus --help' for available commands.")?;
    Ok(())
}

/// First executable file named `tool` in the given `PATH` value.
fn find_on_path(tool: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let paths: OsString = path_var?.to_os_string();
    std::env::split_paths(&paths)
        .map(|dir| dir.join(tool))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.is_file() && meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
