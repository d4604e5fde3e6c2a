//! Human-friendly CLI output formatters.
//!
//! Each `fmt_*` function formats one tool's output for terminal display.
//! When `color` is true, ANSI escape codes are emitted via `owo_colors`.

use crate::tools::{EnforceOutput, ExcludedOutput, ListOutput, NormalizeOutput};
use owo_colors::OwoColorize;
use std::io::{self, Write};

/// Display form of a canonical path; the root is shown as `.`.
fn display_path(path: &str) -> &str {
    if path.is_empty() {
        "."
    } else {
        path
    }
}

// ── normalize ───────────────────────────────────────────────────────────────

pub fn fmt_normalize(w: &mut impl Write, out: &NormalizeOutput, _color: bool) -> io::Result<()> {
    writeln!(w, "{}", display_path(&out.path))
}

// ── enforce ─────────────────────────────────────────────────────────────────

pub fn fmt_enforce(w: &mut impl Write, out: &EnforceOutput, color: bool) -> io::Result<()> {
    if out.allowed {
        let path = display_path(out.path.as_deref().unwrap_or(""));
        if color {
            writeln!(w, "{}  {}", "allowed".green().bold(), path)?;
        } else {
            writeln!(w, "allowed  {path}")?;
        }
        return Ok(());
    }

    let reason = out.reason.unwrap_or("refused");
    if color {
        writeln!(w, "{}  {} ({})", "refused".red().bold(), out.input, reason.dimmed())?;
    } else {
        writeln!(w, "refused  {} ({})", out.input, reason)?;
    }
    if let Some(resolved) = &out.resolved {
        if color {
            writeln!(w, "  {} {}", "→".dimmed(), resolved)?;
        } else {
            writeln!(w, "  → {resolved}")?;
        }
    }
    Ok(())
}

// ── excluded ────────────────────────────────────────────────────────────────

pub fn fmt_excluded(w: &mut impl Write, out: &ExcludedOutput, color: bool) -> io::Result<()> {
    match (out.rule, out.token) {
        (Some(rule), Some(token)) => {
            let rule = format!("{rule:?}").to_lowercase();
            if color {
                writeln!(
                    w,
                    "{}  {} ({} {})",
                    "excluded".yellow().bold(),
                    out.path,
                    rule.dimmed(),
                    token.dimmed()
                )
            } else {
                writeln!(w, "excluded  {} ({} {})", out.path, rule, token)
            }
        }
        _ => {
            if color {
                writeln!(w, "{}  {}", "visible".green().bold(), out.path)
            } else {
                writeln!(w, "visible  {}", out.path)
            }
        }
    }
}

// ── list ────────────────────────────────────────────────────────────────────

pub fn fmt_list(w: &mut impl Write, out: &ListOutput, color: bool) -> io::Result<()> {
    for file in &out.files {
        if color {
            writeln!(w, "{}  {}", file.path.bold(), format!("{} B", file.size).dimmed())?;
        } else {
            writeln!(w, "{}  {} B", file.path, file.size)?;
        }
    }

    let summary = format!("{} files in {}", out.total, display_path(&out.dir));
    if color {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{summary}")?;
    }
    Ok(())
}
