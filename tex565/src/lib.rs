//! Converts decoded raster images into RGB565 source arrays for embedded graphics libraries.
//!
//! The conversion runs in four steps:
//!
//! 1. [`pack`]: every ARGB8888 pixel is quantized to RGB565 by truncation.
//! 2. [`key`]: if the image uses alpha (or the target library reserves `0x0000` as its
//!    transparent color), an RGB565 value that no opaque pixel uses is picked as the transparency
//!    key. Pixels with less than 50% alpha are replaced by that key.
//! 3. [`emit`]: the packed pixels are rendered in one of five [`Dialect`]s.
//! 4. [`convert`] ties the steps together over an owned copy of a [`DecodedImage`].
//!
//! # Dialects
//!
//! | name        | data                     | metadata                                       |
//! |-------------|--------------------------|------------------------------------------------|
//! | `plain`     | `<name>_data[]`          | `TEXTURE` record with width, height and data   |
//! | `texture`   | `<name>_data[]`          | `Texture` record, transparency fields, key `0` |
//! | `texture2d` | `<name>_data[]`          | `Texture2D` record, transparency fields        |
//! | `sprite`    | `<name>[]`               | width, height and key as the first 3 elements  |
//! | `script`    | base64 little-endian     | `new Texture(width, height, key or null)`      |
#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

pub mod convert;
pub mod emit;
pub mod key;
pub mod pack;

use alloc::{string::String, vec::Vec};
use snafu::ensure;

pub use convert::{convert, Conversion, ConvertError, ConvertOptions};
pub use emit::{Dialect, EmitParams, Storage, Transparency};

/// An ARGB8888 pixel, stored as `[a, r, g, b]`.
pub type Argb = [u8; 4];

/// A fully decoded, single-frame image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    width: u32,
    height: u32,
    pixels: Vec<Argb>,
    has_alpha: bool,
}

impl DecodedImage {
    /// Wraps a row-major pixel buffer.
    ///
    /// `has_alpha` should only be set if the alpha channel is actually used, i.e. at least one
    /// pixel is below [`OPAQUE_THRESHOLD`](pack::OPAQUE_THRESHOLD).
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Argb>,
        has_alpha: bool,
    ) -> Result<Self, ConvertError> {
        ensure!(
            width > 0 && height > 0 && pixel_count(width, height) == Some(pixels.len()),
            convert::InvalidDimensionsSnafu {
                width,
                height,
                pixel_count: pixels.len()
            }
        );

        Ok(Self {
            width,
            height,
            pixels,
            has_alpha,
        })
    }

    /// Wraps a fully opaque RGB888 pixel buffer.
    pub fn from_rgb(width: u32, height: u32, pixels: &[[u8; 3]]) -> Result<Self, ConvertError> {
        let pixels = pixels.iter().map(|&[r, g, b]| [0xFF, r, g, b]).collect();
        Self::new(width, height, pixels, false)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Argb] {
        &self.pixels
    }

    #[inline]
    pub fn has_alpha(&self) -> bool {
        self.has_alpha
    }
}

/// `width * height`, or `None` if it doesn't fit in a `usize`.
fn pixel_count(width: u32, height: u32) -> Option<usize> {
    usize::try_from(width)
        .ok()?
        .checked_mul(usize::try_from(height).ok()?)
}

/// Derives a C identifier from an image path: the file name up to its first `.`, sanitized with
/// [`sanitize_identifier`].
pub fn identifier_from_path(path: &str) -> String {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    let base = file_name.split('.').next().unwrap_or(file_name);

    sanitize_identifier(base)
}

/// Replaces everything that can't appear in a C identifier with `_`.
pub fn sanitize_identifier(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();

    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    ident
}
