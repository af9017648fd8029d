use trailcopy::cli::handlers::build_config;
use trailcopy::cli::{handle_run, CliArgs};
use trailcopy::util::logging::{init_logging, parse_level, LoggingConfig};
use trailcopy::VERSION;

use clap::Parser;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    let config = build_config(&args);

    init_logging(LoggingConfig::with_level(parse_level(&config.log_level)).json(config.log_json));

    debug!("trailcopy v{} starting", VERSION);
    debug!("Arguments: {:?}", args);

    std::process::exit(handle_run(&config));
}
