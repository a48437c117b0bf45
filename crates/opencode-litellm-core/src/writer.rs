//! Writing the generated config to disk

use crate::error::{ConfigGenError, ConfigGenResult};
use crate::opencode::OpenCodeConfig;
use std::fs::{DirBuilder, File};
use std::io::Write;
use std::path::Path;
use tracing::debug;

/// Create the parent directory of `path` and any missing ancestors.
///
/// A bare file name has no parent to create and is left alone.
pub fn create_parent_dirs(path: &Path) -> ConfigGenResult<()> {
    let Some(parent) = path.parent() else {
        return Ok(());
    };
    if parent.as_os_str().is_empty() || parent == Path::new(".") {
        return Ok(());
    }

    debug!("Creating directory: {}", parent.display());

    let mut builder = DirBuilder::new();
    builder.recursive(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o755);
    }
    builder
        .create(parent)
        .map_err(|e| ConfigGenError::filesystem(format!("failed to create directory: {e}")))
}

/// Serialize `config` with 2-space indentation and write it to `path`,
/// replacing any existing file.
pub fn write_config(path: &Path, config: &OpenCodeConfig) -> ConfigGenResult<()> {
    let mut content = serde_json::to_string_pretty(config)
        .map_err(|e| ConfigGenError::filesystem(format!("failed to write config: {e}")))?;
    content.push('\n');

    let mut file = File::create(path)
        .map_err(|e| ConfigGenError::filesystem(format!("failed to create file: {e}")))?;
    file.write_all(content.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|e| ConfigGenError::filesystem(format!("failed to write config: {e}")))?;

    debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
