//! File delivery for finished exports.

use std::fs;
use std::io::Write;
use std::path::PathBuf;

use histx_core::ExportResult;

/// Delivery contract for finished exports: write these exact bytes under the
/// suggested filename. The core enforces nothing beyond that; mapping the
/// declared MIME type to a file extension happens here.
pub trait DownloadSink {
    fn deliver(&self, result: &ExportResult) -> std::io::Result<PathBuf>;
}

/// Writes exports into a directory, appending an extension derived from the
/// declared MIME type.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl DownloadSink for FileSink {
    fn deliver(&self, result: &ExportResult) -> std::io::Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}.{}", result.filename, extension_for(result.mime_type)));

        let mut file = fs::File::create(&path)?;
        file.write_all(&result.content)?;
        file.flush()?;
        Ok(path)
    }
}

fn extension_for(mime_type: &str) -> &'static str {
    match mime_type {
        "text/csv" => "csv",
        "application/json" => "json",
        _ => "bin",
    }
}
