use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL \"{url}\": {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("HTTP status {code} for url: {url}")]
    Status { code: u16, url: String },

    #[error("{0}")]
    Transport(String),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("unsupported content type ({0})")]
    UnsupportedContentType(String),

    #[error("declared length {declared} exceeds limit of {limit} bytes")]
    TooLarge { declared: u64, limit: u64 },

    #[error("body exceeded limit of {limit} bytes")]
    ExceededLimit { limit: u64 },

    #[error("malformed Content-Length header: {0:?}")]
    MalformedContentLength(String),

    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl DownloadError {
    pub fn is_network(&self) -> bool {
        matches!(self, DownloadError::Fetch(_))
    }

    pub fn is_too_large(&self) -> bool {
        matches!(
            self,
            DownloadError::TooLarge { .. } | DownloadError::ExceededLimit { .. }
        )
    }
}
