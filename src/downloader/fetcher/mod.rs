mod ureq_fetcher;

use std::fmt;
use std::io::Read;

use crate::error::FetchError;

pub use ureq_fetcher::UReqFetcher;

#[cfg(test)]
mod mock_fetcher;

#[cfg(test)]
pub use mock_fetcher::MockFetcher;

pub struct Response {
    pub status: u16,
    pub content_type: Option<String>,
    pub content_length: Option<String>,
    pub body: Box<dyn Read + Send>,
}

impl Response {
    pub fn new(status: u16, body: impl Read + Send + 'static) -> Self {
        Self {
            status,
            content_type: None,
            content_length: None,
            body: Box::new(body),
        }
    }

    pub fn with_content_type(mut self, content_type: &str) -> Self {
        self.content_type = Some(content_type.to_string());
        self
    }

    pub fn with_content_length(mut self, content_length: &str) -> Self {
        self.content_length = Some(content_length.to_string());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("content_type", &self.content_type)
            .field("content_length", &self.content_length)
            .finish_non_exhaustive()
    }
}

/// Issues the GET for a single download attempt. The body must be left unread.
pub trait FileFetcher {
    fn fetch(&self, url: &str) -> Result<Response, FetchError>;
}
