//! Filesystem infrastructure: implements `ArtifactStore`.

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::application::ports::ArtifactStore;

#[cfg(unix)]
const EXPORT_MODE: u32 = 0o644;

/// Production filesystem implementation of `ArtifactStore`.
///
/// Saves go through a temporary file in the target directory that is
/// persisted over the final name, so a failed write never leaves a partial
/// program behind. The temporary handle is released when `save` returns.
pub struct LocalFs;

impl ArtifactStore for LocalFs {
    fn save(&self, dir: &Path, file_name: &str, mime: &str, contents: &[u8]) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating directory {}", dir.display()))?;

        let mut staged = tempfile::Builder::new()
            .prefix(".ccdeploy-")
            .tempfile_in(dir)
            .with_context(|| format!("creating temporary file in {}", dir.display()))?;
        staged
            .write_all(contents)
            .context("writing temporary file")?;
        staged.flush().context("flushing temporary file")?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt as _;
            // tempfile stages with 0600; exported programs are ordinary files.
            staged
                .as_file()
                .set_permissions(std::fs::Permissions::from_mode(EXPORT_MODE))
                .context("setting file permissions")?;
        }

        let target = dir.join(file_name);
        staged
            .persist(&target)
            .map_err(|e| e.error)
            .with_context(|| format!("writing file {}", target.display()))?;
        debug!(path = %target.display(), mime, bytes = contents.len(), "file saved");
        Ok(target)
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes =
            std::fs::read(path).with_context(|| format!("reading file {}", path.display()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
