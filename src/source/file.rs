use crate::{
    data::{
        payload::Payload,
        records::{normalize_all, AntennaFileRecord},
    },
    source::PayloadSource,
    Result,
};
use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;

/// Where a file source reads its text from
#[derive(Debug, Clone, PartialEq, Eq)]
enum FileInput {
    Path(PathBuf),
    /// Text already handed over by the host, e.g. from a file picker
    Text { name: String, content: String },
}

/// A user-selected JSON file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSource {
    input: FileInput,
}

impl FileSource {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            input: FileInput::Path(path.into()),
        }
    }

    pub fn from_text(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            input: FileInput::Text {
                name: name.into(),
                content: content.into(),
            },
        }
    }

    /// Raw file content; reading suspends the caller until it is available.
    pub async fn read_text(&self) -> Result<String> {
        match &self.input {
            FileInput::Path(path) => {
                let text = tokio::fs::read_to_string(path).await.map_err(|err| {
                    log::error!("cannot read {}: {err}", path.display());
                    err
                })?;
                log::debug!("read {} ({} bytes)", path.display(), text.len());
                Ok(text)
            }
            FileInput::Text { content, .. } => Ok(content.clone()),
        }
    }

    /// Reads the file as a flat array of antenna records.
    ///
    /// Anything other than an array yields no records.
    pub async fn fetch_antenna_records(&self) -> Result<Vec<AntennaFileRecord>> {
        let text = self.read_text().await?;
        let value: Value = serde_json::from_str(&text).map_err(|err| {
            log::error!("{} is not valid JSON: {err}", self.describe());
            err
        })?;
        Ok(normalize_all(Some(&value)))
    }
}

#[async_trait]
impl PayloadSource for FileSource {
    fn describe(&self) -> String {
        match &self.input {
            FileInput::Path(path) => format!("file {}", path.display()),
            FileInput::Text { name, .. } => format!("file {name}"),
        }
    }

    async fn fetch(&self) -> Result<Payload> {
        let text = self.read_text().await?;
        Payload::from_json_str(&text).map_err(|err| {
            log::error!("{} is not valid JSON: {err}", self.describe());
            err
        })
    }
}
