//! Terminal reference host running the demo sign-up form.

pub mod demo;
pub mod output;
mod session;
mod shell;

pub use session::{CliError, CliMode};
pub use shell::{run_cli, SCRIPT_ENV};
