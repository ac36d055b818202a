use std::collections::HashSet;
use std::io::{self, BufRead, Write};

use tracing::debug;

use crate::downloader::{Downloader, FileFetcher, Saved};
use crate::error::DownloadError;

pub const PROMPT: &str = "Please enter the image URL (or 'done' to exit): ";
pub const TERMINATOR: &str = "done";

#[derive(Debug)]
pub enum Outcome {
    Saved(Saved),
    Duplicate,
    Failed(DownloadError),
}

pub struct Session<T: FileFetcher> {
    downloader: Downloader<T>,
    downloaded: HashSet<String>,
}

impl<T> Session<T>
where
    T: FileFetcher,
{
    pub fn new(downloader: Downloader<T>) -> Self {
        Session {
            downloader,
            downloaded: HashSet::new(),
        }
    }

    pub fn downloader(&self) -> &Downloader<T> {
        &self.downloader
    }

    pub fn is_downloaded(&self, url: &str) -> bool {
        self.downloaded.contains(url)
    }

    /// Only a full save adds `url` to the session set.
    pub fn attempt(&mut self, url: &str) -> Outcome {
        if self.downloaded.contains(url) {
            debug!(url, "already downloaded");
            return Outcome::Duplicate;
        }

        match self.downloader.download(url) {
            Ok(saved) => {
                self.downloaded.insert(url.to_string());
                Outcome::Saved(saved)
            }
            Err(e) => {
                debug!(url, error = %e, "download failed");
                Outcome::Failed(e)
            }
        }
    }

    /// Only I/O errors on the operator streams escape; download failures are reported
    /// and the loop carries on.
    pub fn run<R, W>(&mut self, mut input: R, mut output: W) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "Welcome to the Ubuntu Image Fetcher")?;
        writeln!(output, "A tool for mindfully collecting images from the web\n")?;

        let mut line = String::new();

        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("input closed");
                writeln!(output)?;
                writeln!(output, "Download session finished.")?;
                break;
            }

            let url = line.trim_end_matches(['\n', '\r']);

            if url.eq_ignore_ascii_case(TERMINATOR) {
                writeln!(output, "Download session finished.")?;
                break;
            }

            let outcome = self.attempt(url);
            report(&mut output, &outcome)?;
        }

        writeln!(output, "\nConnection strengthened. Community enriched.")?;
        output.flush()
    }
}

pub fn report<W: Write>(output: &mut W, outcome: &Outcome) -> io::Result<()> {
    match outcome {
        Outcome::Saved(saved) => {
            writeln!(output, "✓ Successfully fetched: {}", saved.filename)?;
            writeln!(output, "✓ Image saved to {}", saved.path.display())
        }
        Outcome::Duplicate => {
            writeln!(output, "✗ This URL has already been downloaded. Skipping.")
        }
        Outcome::Failed(DownloadError::UnsupportedContentType(content_type)) => writeln!(
            output,
            "✗ The URL content is not a supported image type ({content_type}). Skipping."
        ),
        Outcome::Failed(e) if e.is_too_large() => {
            writeln!(output, "✗ File is too large. Skipping.")
        }
        Outcome::Failed(e) if e.is_network() => writeln!(output, "✗ Connection error: {e}"),
        Outcome::Failed(e) => writeln!(output, "✗ An unexpected error occurred: {e}"),
    }
}
