//! CLI command handlers. Each command is in its own file.

mod clear_history;
mod completions;
mod copy;
mod download;
mod history;
mod process;
mod qualities;

pub use clear_history::run_clear_history;
pub use completions::run_completions;
pub use copy::run_copy;
pub use download::run_download;
pub use history::run_history;
pub use process::run_process;
pub use qualities::run_qualities;
