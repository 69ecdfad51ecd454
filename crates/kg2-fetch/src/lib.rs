//! # kg2-fetch
//!
//! Download and extraction of the packaged graph dataset.
//!
//! - [`ArchiveFetcher`] / [`HttpFetcher`]: fetch a URL into a directory
//! - [`extract_tar_gz`] / [`create_tar_gz`]: unpack and pack dataset archives
//! - [`ensure_dataset`]: the existence gate; fetches and extracts only when the
//!   dataset directory is missing

mod dataset;
mod error;
mod extract;
mod http;

pub use dataset::{DatasetStatus, ensure_dataset};
pub use error::FetchError;
pub use extract::{create_tar_gz, extract_tar_gz};

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::io::AsyncWriteExt;

/// Called after each received chunk with `(bytes_so_far, content_length)`.
pub type ProgressFn = Arc<dyn Fn(u64, Option<u64>) + Send + Sync>;

/// Retrieves a remote resource into a local directory.
///
/// Implementations do not check for existing output; callers gate on that.
pub trait ArchiveFetcher {
    /// Download `url` into `dest_dir`, returning the path of the written file.
    fn fetch(
        &self,
        url: &str,
        dest_dir: &Path,
    ) -> impl Future<Output = Result<PathBuf, FetchError>> + Send;
}

/// HTTP(S) fetcher streaming the response body to disk.
pub struct HttpFetcher {
    http: reqwest::Client,
    on_progress: Option<ProgressFn>,
}

impl HttpFetcher {
    /// Create a fetcher with default client settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying client cannot be built.
    pub fn new() -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("kg2-gateway/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            http,
            on_progress: None,
        })
    }

    /// Wrap an existing client, e.g. one with custom proxy or TLS settings.
    #[must_use]
    pub const fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            on_progress: None,
        }
    }

    /// Report download progress through `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressFn) -> Self {
        self.on_progress = Some(callback);
        self
    }
}

impl ArchiveFetcher for HttpFetcher {
    async fn fetch(&self, url: &str, dest_dir: &Path) -> Result<PathBuf, FetchError> {
        let file_name = file_name_from_url(url)?;
        tokio::fs::create_dir_all(dest_dir).await?;
        let path = dest_dir.join(file_name);

        tracing::info!(url, path = %path.display(), "downloading archive");
        let mut resp = http::check_response(self.http.get(url).send().await?).await?;
        let total = resp.content_length();

        let mut file = tokio::fs::File::create(&path).await?;
        let mut written: u64 = 0;
        while let Some(chunk) = resp.chunk().await? {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(progress) = &self.on_progress {
                progress(written, total);
            }
        }
        file.flush().await?;

        tracing::info!(bytes = written, "download complete");
        Ok(path)
    }
}

/// Last path segment of `url`, percent-decoded.
fn file_name_from_url(url: &str) -> Result<String, FetchError> {
    let parsed =
        reqwest::Url::parse(url).map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?;
    let segment = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or_default();
    let decoded = urlencoding::decode(segment)
        .map_err(|e| FetchError::InvalidUrl(format!("{url}: {e}")))?
        .into_owned();

    if decoded.is_empty() || decoded == "." || decoded == ".." || decoded.contains(['/', '\\']) {
        return Err(FetchError::InvalidUrl(format!(
            "{url}: no file name in URL path"
        )));
    }
    Ok(decoded)
}
