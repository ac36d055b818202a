//! Streams a response body to disk in fixed-size chunks.
//!
//! Bytes land in `<name>.part` and are renamed onto the final path only after the
//! body ended within the byte ceiling. On any failure the part file is removed, so a
//! previously saved file of the same name survives a failed re-download.

use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::DownloadError;

pub const TEMP_SUFFIX: &str = ".part";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub bytes: u64,
    pub chunks: u64,
    /// Up to the first 16 bytes, enough for format sniffing.
    pub head: Vec<u8>,
}

pub fn write_streaming(
    body: &mut dyn Read,
    final_path: &Path,
    chunk_size: usize,
    max_bytes: u64,
) -> Result<Written, DownloadError> {
    let part_path = temp_path(final_path);

    let result = copy_chunks(body, &part_path, chunk_size, max_bytes).and_then(|written| {
        fs::rename(&part_path, final_path)?;
        Ok(written)
    });

    if result.is_err() {
        if let Err(e) = fs::remove_file(&part_path) {
            debug!(path = %part_path.display(), error = %e, "could not remove part file");
        }
    }

    result
}

fn copy_chunks(
    body: &mut dyn Read,
    part_path: &Path,
    chunk_size: usize,
    max_bytes: u64,
) -> Result<Written, DownloadError> {
    let mut file = File::create(part_path)?;
    let mut buf = vec![0u8; chunk_size.max(1)];

    let mut written = Written {
        bytes: 0,
        chunks: 0,
        head: Vec::new(),
    };

    loop {
        let n = match body.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        };

        written.bytes += n as u64;
        if written.bytes > max_bytes {
            return Err(DownloadError::ExceededLimit { limit: max_bytes });
        }

        if written.head.len() < 16 {
            let take = (16 - written.head.len()).min(n);
            written.head.extend_from_slice(&buf[..take]);
        }

        file.write_all(&buf[..n])?;
        written.chunks += 1;
    }

    file.flush()?;

    Ok(written)
}

pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}
