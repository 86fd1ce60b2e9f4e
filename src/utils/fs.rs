//! File system utilities

use std::io;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Expands a leading `~` to the user's home directory
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest.trim_start_matches(['/', '\\']));
        }
    }
    PathBuf::from(path)
}

/// Copies `from` over `to` and flushes the destination to disk
pub async fn copy_file(from: &Path, to: &Path) -> io::Result<()> {
    tokio::fs::copy(from, to).await?;
    let destination = tokio::fs::OpenOptions::new().write(true).open(to).await?;
    destination.sync_all().await
}

/// Writes `contents` to a new file; an existing file is left untouched
pub async fn create_file_if_absent(path: &Path, contents: &str) -> io::Result<()> {
    let file = tokio::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await;
    let mut file = match file {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => return Ok(()),
        Err(e) => return Err(e),
    };
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await
}
