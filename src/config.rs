use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_INPUT_DIR: &str = "../files/input/";
const DEFAULT_OUTPUT_DIR: &str = "../files/output/";
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_JSON: bool = false;

/// Which orchestrator(s) a run drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Host orchestrator only
    Os,
    /// Abstraction variant over an in-memory copy of the input tree
    Memory,
    /// Host orchestrator, then the abstraction variant over the host
    Both,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "os" => Ok(Backend::Os),
            "memory" | "mem" => Ok(Backend::Memory),
            "both" => Ok(Backend::Both),
            other => Err(ConfigError::InvalidBackend(other.to_string())),
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Backend::Os => "os",
            Backend::Memory => "memory",
            Backend::Both => "both",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid backend: {0}. Valid options: os, memory, both")]
    InvalidBackend(String),

    #[error("Configuration validation failed: {0}")]
    ValidationFailed(String),
}

#[derive(Debug, Clone)]
pub struct TrailcopyConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub backend: Backend,
    pub log_level: String,
    pub log_json: bool,
}

impl Default for TrailcopyConfig {
    fn default() -> Self {
        let input_dir = env::var("TRAILCOPY_INPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT_DIR));

        let output_dir = env::var("TRAILCOPY_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        let backend = env::var("TRAILCOPY_BACKEND")
            .ok()
            .and_then(|v| v.parse::<Backend>().ok())
            .unwrap_or(Backend::Both);

        let log_level = env::var("TRAILCOPY_LOG_LEVEL")
            .unwrap_or_else(|_| DEFAULT_LOG_LEVEL.to_string())
            .to_lowercase();

        let log_json = env::var("TRAILCOPY_LOG_JSON")
            .ok()
            .and_then(|v| v.parse::<bool>().ok())
            .unwrap_or(DEFAULT_LOG_JSON);

        Self {
            input_dir,
            output_dir,
            backend,
            log_level,
            log_json,
        }
    }
}

impl TrailcopyConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Input directory must not be empty".to_string(),
            ));
        }
        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigError::ValidationFailed(
                "Output directory must not be empty".to_string(),
            ));
        }
        if self.input_dir.components().eq(self.output_dir.components()) {
            return Err(ConfigError::ValidationFailed(format!(
                "Output directory must differ from input directory: {}",
                self.input_dir.display()
            )));
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(ConfigError::ValidationFailed(format!(
                    "Invalid log level: {}. Valid options: trace, debug, info, warn, error",
                    self.log_level
                )))
            }
        }

        Ok(())
    }
}

impl fmt::Display for TrailcopyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trailcopy Configuration:")?;
        writeln!(f, "  Input Dir: {}", self.input_dir.display())?;
        writeln!(f, "  Output Dir: {}", self.output_dir.display())?;
        writeln!(f, "  Backend: {}", self.backend)?;
        writeln!(f, "  Log Level: {}", self.log_level)?;
        writeln!(f, "  Log JSON: {}", self.log_json)?;
        Ok(())
    }
}
