//! Canonical file paths for the flat-file record store.

use std::path::{Path, PathBuf};

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// File name of the record array inside the data directory.
pub const RECORDS_FILE_NAME: &str = "denuncias.json";

/// Returns the data directory, honoring the `DATA_DIR` environment
/// variable.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var("DATA_DIR").map_or_else(|_| PathBuf::from(DEFAULT_DATA_DIR), PathBuf::from)
}

/// Returns the path of the record file inside `data_dir`.
#[must_use]
pub fn records_path(data_dir: &Path) -> PathBuf {
    data_dir.join(RECORDS_FILE_NAME)
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub async fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !tokio::fs::try_exists(path).await? {
        tokio::fs::create_dir_all(path).await?;
    }
    Ok(())
}
