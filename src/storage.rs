use crate::error::Result;
use std::fs;
use std::path::Path;
use tracing::debug;

pub struct OutputStorage;

impl OutputStorage {
    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    /// Creates missing parent directories, then replaces any previous file.
    pub fn save(path: &Path, markup: &str) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            debug!(dir = %parent.display(), "creating output directory");
            fs::create_dir_all(parent)?;
        }
        Self::atomic_write(path, markup)
    }
}
