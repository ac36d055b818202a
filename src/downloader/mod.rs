mod fetcher;
pub mod filename;
pub mod writer;

use std::fs;
use std::path::PathBuf;

use image::ImageFormat;
use tracing::{debug, info};
use url::Url;

use crate::config::{Limits, OUTPUT_DIR};
use crate::error::{DownloadError, FetchError};

pub use fetcher::{FileFetcher, Response, UReqFetcher};

#[cfg(test)]
pub use fetcher::MockFetcher;

#[derive(Debug, Clone, PartialEq)]
pub struct Saved {
    pub filename: String,
    pub path: PathBuf,
    pub bytes: u64,
    pub chunks: u64,
    /// Sniffed from the leading bytes. Informational only.
    pub format: Option<ImageFormat>,
}

pub struct Downloader<T: FileFetcher> {
    fetcher: T,
    dir: PathBuf,
    limits: Limits,
}

impl<T> Downloader<T>
where
    T: FileFetcher,
{
    pub fn with_fetcher(dir: impl Into<PathBuf>, fetcher: T) -> Self {
        Self::with_limits(dir, fetcher, Limits::default())
    }

    pub fn with_limits(dir: impl Into<PathBuf>, fetcher: T, limits: Limits) -> Self {
        Downloader {
            fetcher,
            dir: dir.into(),
            limits,
        }
    }

    pub fn fetcher(&self) -> &T {
        &self.fetcher
    }

    /// Nothing is written unless both header gates pass.
    pub fn download(&self, url: &str) -> Result<Saved, DownloadError> {
        fs::create_dir_all(&self.dir)?;

        let parsed = Url::parse(url).map_err(|source| FetchError::InvalidUrl {
            url: url.to_string(),
            source,
        })?;

        debug!(url, "fetching");
        let mut response = self.fetcher.fetch(parsed.as_str())?;

        if !response.is_success() {
            return Err(FetchError::Status {
                code: response.status,
                url: url.to_string(),
            }
            .into());
        }

        debug!(
            status = response.status,
            content_type = ?response.content_type,
            content_length = ?response.content_length,
            "received headers"
        );

        let content_type = check_content_type(response.content_type.as_deref())?;
        self.check_declared_length(response.content_length.as_deref())?;

        let filename = filename::derive_filename(&parsed, content_type);
        let path = self.dir.join(&filename);

        let written = writer::write_streaming(
            &mut response.body,
            &path,
            self.limits.chunk_size,
            self.limits.max_content_length,
        )?;

        let format = image::guess_format(&written.head).ok();

        info!(
            url,
            path = %path.display(),
            bytes = written.bytes,
            chunks = written.chunks,
            format = ?format,
            "saved image"
        );

        Ok(Saved {
            filename,
            path,
            bytes: written.bytes,
            chunks: written.chunks,
            format,
        })
    }

    /// Absent and negative lengths count as 0; anything past `u64::MAX` saturates.
    fn check_declared_length(&self, header: Option<&str>) -> Result<u64, DownloadError> {
        let declared = match header {
            None => 0,
            Some(raw) => raw
                .trim()
                .parse::<i128>()
                .map(|n| u64::try_from(n.max(0)).unwrap_or(u64::MAX))
                .map_err(|_| DownloadError::MalformedContentLength(raw.to_string()))?,
        };

        let limit = self.limits.max_content_length;
        if declared > limit {
            return Err(DownloadError::TooLarge { declared, limit });
        }

        Ok(declared)
    }
}

impl Downloader<UReqFetcher> {
    pub fn new() -> Self {
        Downloader::with_fetcher(OUTPUT_DIR, UReqFetcher::new())
    }
}

impl Default for Downloader<UReqFetcher> {
    fn default() -> Self {
        Self::new()
    }
}

fn check_content_type(header: Option<&str>) -> Result<&str, DownloadError> {
    let content_type = header.unwrap_or_default();

    let is_image = content_type
        .get(..6)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("image/"));

    if is_image {
        Ok(content_type)
    } else {
        Err(DownloadError::UnsupportedContentType(content_type.to_string()))
    }
}
