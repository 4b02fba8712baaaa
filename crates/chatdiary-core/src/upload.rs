//! Image upload preparation.
//!
//! Local image references are read into memory up front so that a failure on
//! any file aborts the upload before a request is sent.

use std::path::{Path, PathBuf};

use crate::models::EntryKind;
use crate::{Error, Result};

/// MIME type used when the extension does not identify an image format.
pub const FALLBACK_IMAGE_MIME: &str = "image/*";

/// Path to an image on the local filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocalImageRef(PathBuf);

impl LocalImageRef {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn path(&self) -> &Path {
        &self.0
    }

    /// File name sent with the multipart part.
    pub fn file_name(&self) -> Result<String> {
        self.0
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                Error::InvalidInput(format!("'{}' does not name a file", self.0.display()))
            })
    }

    /// MIME type guessed from the extension.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.0)
            .first()
            .filter(|mime| mime.type_() == mime_guess::mime::IMAGE)
            .map_or_else(|| FALLBACK_IMAGE_MIME.to_string(), |mime| mime.to_string())
    }
}

impl From<PathBuf> for LocalImageRef {
    fn from(path: PathBuf) -> Self {
        Self(path)
    }
}

impl From<&str> for LocalImageRef {
    fn from(path: &str) -> Self {
        Self(PathBuf::from(path))
    }
}

/// One in-memory image ready to become a multipart part.
#[derive(Clone, PartialEq, Eq)]
pub struct ImagePart {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImagePart {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ImagePart")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("bytes", &self.bytes.len())
            .finish()
    }
}

impl ImagePart {
    /// Read a local image into memory.
    pub async fn read(image: &LocalImageRef) -> Result<Self> {
        let file_name = image.file_name()?;
        let bytes = tokio::fs::read(image.path()).await?;
        Ok(Self {
            file_name,
            mime_type: image.mime_type(),
            bytes,
        })
    }
}

/// All images of one upload plus their shared metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub kind: EntryKind,
    pub position: String,
    pub content: String,
    pub images: Vec<ImagePart>,
}

impl ImageUpload {
    /// Read every reference; fails without a partial result if any read fails.
    pub async fn prepare(
        kind: EntryKind,
        position: impl Into<String>,
        content: impl Into<String>,
        images: &[LocalImageRef],
    ) -> Result<Self> {
        if images.is_empty() {
            return Err(Error::InvalidInput(
                "at least one image is required".to_string(),
            ));
        }

        let mut parts = Vec::with_capacity(images.len());
        for image in images {
            parts.push(ImagePart::read(image).await?);
        }

        Ok(Self {
            kind,
            position: position.into(),
            content: content.into(),
            images: parts,
        })
    }
}
