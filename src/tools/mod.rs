//! Tool operations for the agent's file-operation dispatcher.

mod listing;
mod path;

// listing
pub use listing::{execute_list, ListInput, ListOutput};

// path
pub use path::{
    execute_enforce, execute_excluded, execute_normalize, EnforceInput, EnforceOutput,
    ExcludedInput, ExcludedOutput, NormalizeInput, NormalizeOutput,
};
