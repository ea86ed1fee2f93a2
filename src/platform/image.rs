//! # Image Reading
//!
//! Turns user-chosen image files into inline `data:` payloads.
//!
//! Files are read one after another in the order they were listed, so the
//! payload order always matches the listing order. A failure anywhere drops
//! the whole batch; the caller never sees a partial list.

use base64::Engine as _;
use base64::engine::general_purpose;
use log::{debug, info};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::core::record::ImagePayload;

/// MIME types the register accepts.
pub const ACCEPTED_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/gif"];

#[derive(Debug)]
pub enum ImageError {
    Io { path: PathBuf, source: io::Error },
    UnsupportedType { path: PathBuf, mime: String },
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Io { path, source } => {
                write!(f, "อ่านไฟล์ {} ไม่สำเร็จ: {source}", path.display())
            }
            ImageError::UnsupportedType { path, mime } => write!(
                f,
                "ไฟล์ {} ไม่รองรับ ({mime}); ใช้ได้เฉพาะ JPEG, PNG, GIF",
                path.display()
            ),
        }
    }
}

impl std::error::Error for ImageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ImageError::Io { source, .. } => Some(source),
            ImageError::UnsupportedType { .. } => None,
        }
    }
}

/// Split a typed path list on whitespace. Double quotes group a path that
/// contains spaces: `"my photo.png" other.jpg`.
pub fn parse_path_list(input: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for ch in input.chars() {
        match ch {
            '"' => quoted = !quoted,
            c if c.is_whitespace() && !quoted => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(std::mem::take(&mut current)));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }
    paths
}

/// The accepted MIME type for `path`, judged by its extension.
pub fn image_mime(path: &Path) -> Result<&'static str, ImageError> {
    let guessed = mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| "application/octet-stream".to_string());

    ACCEPTED_TYPES
        .iter()
        .copied()
        .find(|accepted| *accepted == guessed)
        .ok_or(ImageError::UnsupportedType {
            path: path.to_path_buf(),
            mime: guessed,
        })
}

pub fn encode_bytes(mime: &str, bytes: &[u8]) -> ImagePayload {
    let encoded = general_purpose::STANDARD.encode(bytes);
    ImagePayload::new(format!("data:{mime};base64,{encoded}"))
}

pub fn encode_image(path: &Path) -> Result<ImagePayload, ImageError> {
    let mime = image_mime(path)?;
    let bytes = fs::read(path).map_err(|source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("Encoded {} ({} bytes, {})", path.display(), bytes.len(), mime);
    Ok(encode_bytes(mime, &bytes))
}

/// Encode every path in order. Types are checked for the whole batch before
/// any file is read.
pub fn read_images(paths: &[PathBuf]) -> Result<Vec<ImagePayload>, ImageError> {
    for path in paths {
        image_mime(path)?;
    }
    let payloads = paths
        .iter()
        .map(|p| encode_image(p))
        .collect::<Result<Vec<_>, _>>()?;
    info!("Read {} image(s)", payloads.len());
    Ok(payloads)
}
