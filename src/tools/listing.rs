//! Workspace listing tool.

use crate::services::{ListOptions, ListedFile, WorkspaceLister};
use serde::{Deserialize, Serialize};

/// Input for the list tool.
#[derive(Debug, Deserialize)]
pub struct ListInput {
    /// Directory to list (default: workspace root)
    #[serde(default)]
    pub dir: String,
    /// Include dotfiles (default: true)
    #[serde(default = "default_include_hidden")]
    pub include_hidden: bool,
    /// Honor .gitignore files
    #[serde(default)]
    pub respect_gitignore: bool,
    /// Maximum depth below `dir`
    #[serde(default)]
    pub max_depth: Option<usize>,
}

const fn default_include_hidden() -> bool {
    true
}

/// Output for the list tool.
#[derive(Debug, Serialize)]
pub struct ListOutput {
    /// Canonical form of the listed directory
    pub dir: String,
    /// Visible files, sorted by path
    pub files: Vec<ListedFile>,
    /// Number of files returned
    pub total: usize,
}

/// Executes the list tool.
///
/// # Errors
///
/// Returns the error message when `dir` leaves the workspace or does not
/// exist.
pub fn execute_list(lister: &WorkspaceLister, input: ListInput) -> Result<ListOutput, String> {
    let dir = lister
        .guard()
        .enforce(&input.dir)
        .map_err(|e| e.to_string())?;

    let options = ListOptions {
        include_hidden: input.include_hidden,
        respect_gitignore: input.respect_gitignore,
        max_depth: input.max_depth,
        ..ListOptions::default()
    };
    let files = lister
        .list(dir.as_str(), &options)
        .map_err(|e| e.to_string())?;

    Ok(ListOutput {
        dir: dir.into_string(),
        total: files.len(),
        files,
    })
}
