//! workspace-guard: check agent file paths against a workspace root.
//!
//! Usage:
//!   workspace-guard enforce <path>      # Authoritative check (exit 2 if refused)
//!   workspace-guard normalize <path>    # Advisory canonical form
//!   workspace-guard excluded <path>     # Would listings hide this path?
//!   workspace-guard list [dir]          # Visible files under the workspace

use clap::{Parser, Subcommand};
use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workspace_guard::config::WORKSPACE_ROOT_ENV;
use workspace_guard::security::{AuditSink, JsonLinesAuditSink, TracingAuditSink};
use workspace_guard::services::WorkspaceLister;
use workspace_guard::{fmt, tools, ConfigError, PolicyConfig, WorkspaceRoot};

#[derive(Parser)]
#[command(name = "workspace-guard")]
#[command(about = "Workspace path sandboxing and file-visibility policy")]
#[command(version)]
struct Cli {
    /// Workspace root (relative roots are resolved against the current directory)
    #[arg(long, env = WORKSPACE_ROOT_ENV, default_value = WorkspaceRoot::DEFAULT)]
    root: PathBuf,

    /// Append refused paths as JSON lines to this file
    #[arg(long)]
    audit_log: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a path and print its canonical form
    Enforce {
        /// Untrusted path
        path: String,
    },

    /// Strip redundant workspace prefixes (advisory only)
    Normalize {
        /// Raw path
        path: String,
    },

    /// Check a relative path against the exclusion policy
    Excluded {
        /// Workspace-relative path
        path: String,
    },

    /// List visible files
    List {
        /// Directory inside the workspace
        #[arg(default_value = "")]
        dir: String,

        /// Skip dotfiles and dot-directories
        #[arg(long)]
        no_hidden: bool,

        /// Honor .gitignore files
        #[arg(long)]
        gitignore: bool,

        /// Maximum depth below the directory
        #[arg(long)]
        max_depth: Option<usize>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Log to stderr only; stdout carries command output
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("workspace_guard=info".parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let root = resolve_root(&cli.root)?;
    let config = PolicyConfig::new(root);

    let sink: Arc<dyn AuditSink> = match &cli.audit_log {
        Some(path) => Arc::new(JsonLinesAuditSink::open(path)?),
        None => Arc::new(TracingAuditSink),
    };
    let guard = config.audited_guard(sink);
    tracing::debug!(root = %config.root, "workspace guard ready");

    let color = !cli.json && io::stdout().is_terminal();
    let mut stdout = io::stdout().lock();

    match cli.command {
        Commands::Enforce { path } => {
            let out = tools::execute_enforce(&guard, tools::EnforceInput { path });
            let allowed = out.allowed;
            if cli.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&out)?)?;
            } else {
                fmt::fmt_enforce(&mut stdout, &out, color)?;
            }
            if !allowed {
                stdout.flush()?;
                std::process::exit(2);
            }
        }

        Commands::Normalize { path } => {
            let out = tools::execute_normalize(&guard, tools::NormalizeInput { path });
            if cli.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&out)?)?;
            } else {
                fmt::fmt_normalize(&mut stdout, &out, color)?;
            }
        }

        Commands::Excluded { path } => {
            let out = tools::execute_excluded(&config.exclusions, tools::ExcludedInput { path });
            if cli.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&out)?)?;
            } else {
                fmt::fmt_excluded(&mut stdout, &out, color)?;
            }
        }

        Commands::List {
            dir,
            no_hidden,
            gitignore,
            max_depth,
        } => {
            let lister = WorkspaceLister::new(guard, config.exclusions);
            let input = tools::ListInput {
                dir,
                include_hidden: !no_hidden,
                respect_gitignore: gitignore,
                max_depth,
            };
            let out = tools::execute_list(&lister, input).map_err(|e| anyhow::anyhow!(e))?;
            if cli.json {
                writeln!(stdout, "{}", serde_json::to_string_pretty(&out)?)?;
            } else {
                fmt::fmt_list(&mut stdout, &out, color)?;
            }
        }
    }

    Ok(())
}

/// Validates the configured root, making relative roots absolute first.
fn resolve_root(root: &Path) -> anyhow::Result<WorkspaceRoot> {
    match WorkspaceRoot::new(root.to_string_lossy()) {
        Err(ConfigError::RelativeRoot { .. }) => {
            let absolute = dunce::canonicalize(root)?;
            Ok(WorkspaceRoot::new(absolute.to_string_lossy())?)
        }
        other => Ok(other?),
    }
}
