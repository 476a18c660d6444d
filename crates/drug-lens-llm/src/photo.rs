//! Uploaded photo decoding.
//!
//! Only checks that the bytes are a real image in a format the model API
//! accepts. No resizing or other preprocessing.

use image::{GenericImageView, ImageFormat};
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Image decode errors.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Uploaded file is empty")]
    Empty,

    #[error("Cannot identify image file")]
    UnknownFormat,

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("Cannot decode image: {0}")]
    Malformed(String),
}

/// A photo that decoded successfully. Keeps the original bytes for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
    pub bytes: Vec<u8>,
}

impl DecodedImage {
    /// SHA-256 of the original bytes, hex encoded. Used to correlate log lines.
    pub fn digest(&self) -> String {
        hex::encode(Sha256::digest(&self.bytes))
    }
}

/// Decode uploaded bytes, failing fast on anything that is not a readable image.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let format = image::guess_format(bytes).map_err(|_| DecodeError::UnknownFormat)?;
    let mime_type = mime_type_for(format)?;

    let decoded = image::load_from_memory_with_format(bytes, format)
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;
    let (width, height) = decoded.dimensions();

    Ok(DecodedImage {
        mime_type,
        width,
        height,
        bytes: bytes.to_vec(),
    })
}

fn mime_type_for(format: ImageFormat) -> Result<&'static str, DecodeError> {
    match format {
        ImageFormat::Png => Ok("image/png"),
        ImageFormat::Jpeg => Ok("image/jpeg"),
        ImageFormat::WebP => Ok("image/webp"),
        other => Err(DecodeError::UnsupportedFormat(format!("{:?}", other))),
    }
}
