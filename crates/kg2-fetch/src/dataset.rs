//! The dataset existence gate.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{ArchiveFetcher, FetchError, extract_tar_gz};

/// Outcome of [`ensure_dataset`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DatasetStatus {
    /// The dataset directory already existed; nothing was fetched.
    Present { dataset_dir: PathBuf },
    /// The archive was downloaded and extracted.
    Downloaded {
        dataset_dir: PathBuf,
        archive: PathBuf,
    },
}

impl DatasetStatus {
    #[must_use]
    pub fn dataset_dir(&self) -> &Path {
        match self {
            Self::Present { dataset_dir } | Self::Downloaded { dataset_dir, .. } => dataset_dir,
        }
    }
}

/// Make sure `<target_dir>/<dataset_name>` exists, fetching and extracting
/// `source_url` only when it does not.
///
/// The check is existence only; a present directory is never validated or
/// refreshed.
///
/// # Errors
///
/// Propagates fetch and extraction errors, and returns
/// [`FetchError::MissingDataset`] if the archive did not produce the directory.
pub async fn ensure_dataset<F: ArchiveFetcher + Sync>(
    fetcher: &F,
    source_url: &str,
    target_dir: &Path,
    dataset_name: &str,
) -> Result<DatasetStatus, FetchError> {
    tokio::fs::create_dir_all(target_dir).await?;
    let dataset_dir = target_dir.join(dataset_name);

    if dataset_dir.is_dir() {
        tracing::debug!(path = %dataset_dir.display(), "dataset already present");
        return Ok(DatasetStatus::Present { dataset_dir });
    }

    let archive = fetcher.fetch(source_url, target_dir).await?;

    let (archive_path, output_dir) = (archive.clone(), target_dir.to_path_buf());
    tokio::task::spawn_blocking(move || extract_tar_gz(&archive_path, &output_dir))
        .await
        .map_err(|e| FetchError::Task(e.to_string()))??;

    if !dataset_dir.is_dir() {
        return Err(FetchError::MissingDataset(dataset_dir));
    }

    Ok(DatasetStatus::Downloaded {
        dataset_dir,
        archive,
    })
}
