//! Walk-and-transform through a [`FileSystem`]
//!
//! Same sequence as [`insert_all`](crate::orchestrator::insert_all), but
//! every operation goes through the abstraction so the run can target an
//! in-memory tree as easily as the host.

use crate::error::CopyError;
use crate::fs::FileSystem;
use crate::orchestrator::output_file_name;
use crate::transform::append_trailer;
use std::path::Path;
use tracing::{debug, info};

/// Copies every file under `input_dir` into `output_dir` on `fs` and hands
/// the filesystem back for inspection.
pub fn insert_all_with_fs<F: FileSystem>(
    fs: F,
    input_dir: &Path,
    output_dir: &Path,
) -> Result<F, CopyError> {
    if !fs.is_dir(output_dir) {
        fs.create_dir_all(output_dir)
            .map_err(|source| CopyError::CreateDir {
                path: output_dir.to_path_buf(),
                source,
            })?;
    }

    let mut index = 0usize;

    fs.walk(input_dir, &mut |path, file_type| {
        if file_type.is_dir() {
            return Ok(());
        }

        let destination = output_dir.join(output_file_name(index));

        let mut writer = fs.create(&destination).map_err(|source| CopyError::Create {
            path: destination.clone(),
            source,
        })?;
        let mut reader = fs.open(path).map_err(|source| CopyError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let bytes = append_trailer(&mut reader, &mut writer).map_err(|source| CopyError::Copy {
            path: destination.clone(),
            source,
        })?;

        debug!(
            source = %path.display(),
            destination = %destination.display(),
            bytes,
            "Copied file"
        );

        index += 1;
        Ok(())
    })?;

    info!(files = index, output = %output_dir.display(), "Abstracted copy complete");

    Ok(fs)
}
