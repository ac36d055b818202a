pub mod config;
pub mod downloader;
pub mod error;
pub mod logging;
pub mod session;

pub use downloader::{Downloader, FileFetcher, Response, Saved, UReqFetcher};
pub use error::{DownloadError, FetchError};
pub use session::{Outcome, Session};
