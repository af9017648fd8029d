use crate::config::Backend;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Copy every file under a directory tree into numbered outputs with a trailer appended
#[derive(Parser, Debug)]
#[command(
    name = "trailcopy",
    version,
    about = "Copy every file under a directory tree into numbered outputs with a trailer appended",
    long_about = "trailcopy walks the input directory recursively and writes each file's \
                  contents, followed by a fixed trailer, to testFile<N>.txt in the output \
                  directory. N is the file's position in the walk.\n\n\
                  Examples:\n  \
                  trailcopy\n  \
                  trailcopy --input ./in --output ./out\n  \
                  trailcopy --backend memory -v"
)]
pub struct CliArgs {
    #[arg(
        short = 'i',
        long,
        value_name = "DIR",
        help = "Input directory (defaults to TRAILCOPY_INPUT_DIR or ../files/input/)"
    )]
    pub input: Option<PathBuf>,

    #[arg(
        short = 'o',
        long,
        value_name = "DIR",
        help = "Output directory (defaults to TRAILCOPY_OUTPUT_DIR or ../files/output/)"
    )]
    pub output: Option<PathBuf>,

    #[arg(
        short = 'b',
        long,
        value_enum,
        help = "Which filesystem to run against (defaults to TRAILCOPY_BACKEND or both)"
    )]
    pub backend: Option<BackendArg>,

    #[arg(long, value_name = "LEVEL", help = "Set logging level")]
    pub log_level: Option<String>,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,

    #[arg(short = 'v', long, help = "Verbose output (debug level)")]
    pub verbose: bool,

    #[arg(
        short = 'q',
        long,
        conflicts_with = "verbose",
        help = "Quiet mode - only log errors"
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    Os,
    Memory,
    Both,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Os => Backend::Os,
            BackendArg::Memory => Backend::Memory,
            BackendArg::Both => Backend::Both,
        }
    }
}

impl CliArgs {
    /// Log level string after applying `--log-level`, `-v` and `-q`.
    pub fn effective_log_level(&self, fallback: &str) -> String {
        if let Some(level) = &self.log_level {
            level.to_lowercase()
        } else if self.verbose {
            "debug".to_string()
        } else if self.quiet {
            "error".to_string()
        } else {
            fallback.to_string()
        }
    }
}
