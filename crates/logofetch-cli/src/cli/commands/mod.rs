//! CLI command handlers. Each command is in its own file.

mod paths;
mod run;
mod urls;

pub use paths::run_paths;
pub use run::run_interactive;
pub use urls::run_urls;
