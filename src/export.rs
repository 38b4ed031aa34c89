//! Download of the current payload
//!
//! The core only serializes; handing the bytes to the user is the job of an
//! [`ExportSink`] supplied by the host.

use crate::{core::constants::EXPORT_MIME_TYPE, data::payload::Payload, MapError, Result};
use std::path::{Path, PathBuf};

/// Host capability that offers bytes to the user as a downloadable file
pub trait ExportSink {
    fn offer_download(&mut self, bytes: &[u8], filename: &str) -> Result<()>;
}

/// Two-space indented JSON of the payload, `null` when there is none.
pub fn serialize_payload(payload: Option<&Payload>) -> Result<Vec<u8>> {
    let text = match payload {
        Some(payload) => payload.to_pretty_json()?,
        None => "null".to_string(),
    };
    Ok(text.into_bytes())
}

/// Writes downloads into a directory
#[derive(Debug, Clone)]
pub struct FileExportSink {
    directory: PathBuf,
}

impl FileExportSink {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl ExportSink for FileExportSink {
    fn offer_download(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        let name = Path::new(filename)
            .file_name()
            .ok_or_else(|| MapError::Export(format!("invalid file name '{filename}'")))?;
        let path = self.directory.join(name);
        std::fs::write(&path, bytes)?;
        log::info!(
            "exported {} bytes of {EXPORT_MIME_TYPE} to {}",
            bytes.len(),
            path.display()
        );
        Ok(())
    }
}

/// A download kept in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Collects downloads in memory, for hosts that hand them over themselves
#[derive(Debug, Clone, Default)]
pub struct MemoryExportSink {
    downloads: Vec<Download>,
}

impl MemoryExportSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn downloads(&self) -> &[Download] {
        &self.downloads
    }

    pub fn last(&self) -> Option<&Download> {
        self.downloads.last()
    }
}

impl ExportSink for MemoryExportSink {
    fn offer_download(&mut self, bytes: &[u8], filename: &str) -> Result<()> {
        self.downloads.push(Download {
            filename: filename.to_string(),
            mime_type: EXPORT_MIME_TYPE,
            bytes: bytes.to_vec(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialize() {
        let payload = Payload::from_value(json!({"a": 1}));
        assert_eq!(serialize_payload(Some(&payload)).unwrap(), b"{\n  \"a\": 1\n}");
        assert_eq!(serialize_payload(None).unwrap(), b"null");
    }

    #[test]
    fn test_memory_sink() {
        let mut sink = MemoryExportSink::new();
        sink.offer_download(b"[]", "donnees.json").unwrap();
        let download = sink.last().unwrap();
        assert_eq!(download.filename, "donnees.json");
        assert_eq!(download.mime_type, "application/json");
        assert_eq!(download.bytes, b"[]");
    }

    #[test]
    fn test_file_sink_rejects_empty_name() {
        let mut sink = FileExportSink::new(std::env::temp_dir());
        assert!(matches!(
            sink.offer_download(b"{}", ".."),
            Err(MapError::Export(_))
        ));
    }
}
