//! Gzip-compressed tar archives.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;

use crate::FetchError;

/// Unpack every member of `archive` into `output_dir`, returning `output_dir`.
///
/// Partial output is left in place on failure.
///
/// # Errors
///
/// Returns [`FetchError::Io`] if the archive cannot be opened and
/// [`FetchError::Extract`] if it is malformed or a member cannot be written.
pub fn extract_tar_gz(archive: &Path, output_dir: &Path) -> Result<PathBuf, FetchError> {
    std::fs::create_dir_all(output_dir)?;
    let file = File::open(archive)?;

    tracing::info!(
        archive = %archive.display(),
        output = %output_dir.display(),
        "extracting archive"
    );
    let mut tar = tar::Archive::new(GzDecoder::new(BufReader::new(file)));
    tar.unpack(output_dir).map_err(|source| FetchError::Extract {
        archive: archive.to_path_buf(),
        source,
    })?;

    Ok(output_dir.to_path_buf())
}

/// Pack `source_dir` into `archive`, rooted at the directory's own name.
///
/// # Errors
///
/// Returns [`FetchError::InvalidPath`] if `source_dir` has no file name and
/// [`FetchError::Io`] on read or write failures.
pub fn create_tar_gz(source_dir: &Path, archive: &Path) -> Result<PathBuf, FetchError> {
    let root = source_dir
        .file_name()
        .ok_or_else(|| FetchError::InvalidPath(source_dir.to_path_buf()))?;
    if !source_dir.is_dir() {
        return Err(FetchError::InvalidPath(source_dir.to_path_buf()));
    }

    let encoder = GzEncoder::new(File::create(archive)?, Compression::default());
    let mut builder = tar::Builder::new(encoder);
    builder.append_dir_all(root, source_dir)?;
    builder.into_inner()?.finish()?;

    tracing::debug!(archive = %archive.display(), "archive written");
    Ok(archive.to_path_buf())
}
