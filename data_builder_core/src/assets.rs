use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::error::{BuildError, Result};

/// Ensures `path` exists as a directory. Only the last component is created.
pub fn prepare_output_dir(path: &Path) -> Result<()> {
    if path.exists() {
        if !path.is_dir() {
            return Err(BuildError::OutputNotDirectory(path.to_path_buf()));
        }
        debug!("Output directory {:?} already exists", path);
        return Ok(());
    }

    fs::create_dir(path).map_err(|source| BuildError::CreateOutputDir {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Created output directory {:?}", path);
    Ok(())
}

/// Copies `from` over `to` byte for byte, replacing any existing file.
pub fn copy_asset(from: &Path, to: &Path) -> Result<u64> {
    let bytes = fs::copy(from, to).map_err(|source| BuildError::Copy {
        from: from.to_path_buf(),
        to: to.to_path_buf(),
        source,
    })?;
    debug!("Copied {:?} -> {:?} ({} bytes)", from, to, bytes);
    Ok(bytes)
}
