//! Services that touch the filesystem on behalf of the policy layer.

pub mod listing;

pub use listing::{ListOptions, ListedFile, WorkspaceLister};
