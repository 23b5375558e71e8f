//! Static cascade sources
//!
//! The cascade is built offline and shipped as a JSON document:
//!
//! ```json
//! { "levels": [ { "type": "blacklist", "size": 512, "hashCount": 4,
//!                 "bitArray": [0, 1, ...] }, ... ] }
//! ```

use std::borrow::Cow;
use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::domain::FilterCascade;
use crate::error::LoadError;
use crate::ports::CascadeSource;

/// Cascade read from a file on disk.
#[derive(Clone, Debug)]
pub struct FileCascadeSource {
    path: PathBuf,
}

impl FileCascadeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl CascadeSource for FileCascadeSource {
    async fn load_cascade(&self) -> Result<FilterCascade, LoadError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|source| LoadError::Io {
                path: self.path.clone(),
                source,
            })?;

        let cascade = FilterCascade::from_json_slice(&bytes)?;
        info!(
            path = %self.path.display(),
            depth = cascade.depth(),
            "Loaded cascade from file"
        );
        Ok(cascade)
    }

    fn describe(&self) -> String {
        format!("file:{}", self.path.display())
    }
}

/// Cascade document held in memory, typically via `include_bytes!`.
#[derive(Clone, Debug)]
pub struct BundledCascadeSource {
    name: String,
    document: Cow<'static, [u8]>,
}

impl BundledCascadeSource {
    pub fn from_static(name: impl Into<String>, document: &'static [u8]) -> Self {
        Self {
            name: name.into(),
            document: Cow::Borrowed(document),
        }
    }

    pub fn from_bytes(name: impl Into<String>, document: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            document: Cow::Owned(document),
        }
    }
}

#[async_trait]
impl CascadeSource for BundledCascadeSource {
    async fn load_cascade(&self) -> Result<FilterCascade, LoadError> {
        FilterCascade::from_json_slice(&self.document)
    }

    fn describe(&self) -> String {
        format!("bundled:{}", self.name)
    }
}
