pub mod commands;
pub mod handlers;

pub use commands::{BackendArg, CliArgs};
pub use handlers::{handle_run, EXIT_CONFIG, EXIT_FAILURE, EXIT_SUCCESS};
