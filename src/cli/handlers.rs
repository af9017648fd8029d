use crate::abstracted::insert_all_with_fs;
use crate::cli::commands::CliArgs;
use crate::config::{Backend, TrailcopyConfig};
use crate::fs::{MockFileSystem, RealFileSystem};
use crate::orchestrator::{insert_all, output_file_name, resolve_dir};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_CONFIG: i32 = 2;

/// Environment-derived configuration with CLI flags layered on top.
pub fn build_config(args: &CliArgs) -> TrailcopyConfig {
    let default_config = TrailcopyConfig::default();
    TrailcopyConfig {
        input_dir: args.input.clone().unwrap_or(default_config.input_dir),
        output_dir: args.output.clone().unwrap_or(default_config.output_dir),
        backend: args.backend.map(Backend::from).unwrap_or(default_config.backend),
        log_level: args.effective_log_level(&default_config.log_level),
        log_json: args.log_json || default_config.log_json,
    }
}

pub fn handle_run(config: &TrailcopyConfig) -> i32 {
    if let Err(e) = config.validate() {
        error!("{}", e);
        return EXIT_CONFIG;
    }
    debug!("{}", config);

    match run(config) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            EXIT_FAILURE
        }
    }
}

fn run(config: &TrailcopyConfig) -> Result<()> {
    let input_dir = resolve_dir(&config.input_dir)?;
    let output_dir = resolve_dir(&config.output_dir)?;
    info!(
        input = %input_dir.display(),
        output = %output_dir.display(),
        backend = %config.backend,
        "Starting copy"
    );

    match config.backend {
        Backend::Os => run_host(&input_dir, &output_dir),
        Backend::Both => {
            run_host(&input_dir, &output_dir)?;
            insert_all_with_fs(RealFileSystem::new(), &input_dir, &output_dir)
                .context("Copy through the filesystem layer failed")?;
            Ok(())
        }
        Backend::Memory => run_memory(&input_dir, &output_dir),
    }
}

fn run_host(input_dir: &Path, output_dir: &Path) -> Result<()> {
    let report = insert_all(input_dir, output_dir).context("Host copy failed")?;
    info!(files = report.len(), "Wrote outputs to {}", output_dir.display());
    Ok(())
}

fn run_memory(input_dir: &Path, output_dir: &Path) -> Result<()> {
    let memory = MockFileSystem::with_root(PathBuf::from("/"));
    let loaded = memory
        .load_from(&RealFileSystem::new(), input_dir)
        .context("Failed to load input tree into memory")?;
    debug!(files = loaded, "Loaded input tree into memory");

    let memory = insert_all_with_fs(memory, input_dir, output_dir)
        .context("In-memory copy failed")?;

    // outputs are numbered contiguously from zero
    for index in 0.. {
        let path = output_dir.join(output_file_name(index));
        let Some(content) = memory.read_file(&path) else {
            break;
        };
        info!(path = %path.display(), bytes = content.len(), "In-memory output");
    }
    Ok(())
}
