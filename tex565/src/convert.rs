use crate::{
    emit::{emit, Dialect, EmitParams, Storage, Transparency},
    key::{find_key_color, reserve_zero},
    pack::pack_pixels,
    DecodedImage,
};
use alloc::{string::String, vec::Vec};
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ConvertError {
    #[snafu(display(
        "Every RGB565 color is used by an opaque pixel, no transparency key is left"
    ))]
    ExhaustedColorSpace,
    #[snafu(display(
        "Image dimensions don't match the number of pixels: {width} * {height} == {} pixels, but {pixel_count} pixels were given",
        u64::from(*width) * u64::from(*height)
    ))]
    InvalidDimensions {
        width: u32,
        height: u32,
        pixel_count: usize,
    },
    #[snafu(display(
        "Unknown format `{name}`, expected one of: plain, texture, texture2d, sprite, script"
    ))]
    UnknownDialect { name: String },
}

#[derive(Debug, Clone)]
pub struct ConvertOptions {
    pub dialect: Dialect,
    /// Base identifier of the generated symbols.
    pub name: String,
    /// File name of the source image, for the header comment.
    pub source_name: String,
    pub storage: Storage,
}

/// Result of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub lines: Vec<String>,
    pub packed: Vec<u16>,
    pub transparency: Transparency,
}

/// Converts an image into source lines.
///
/// The image itself is left untouched: the zero-reservation pass of [`Dialect::Texture`] works on
/// a copy, and the key search runs after it so it sees the remapped colors.
pub fn convert(image: &DecodedImage, options: &ConvertOptions) -> Result<Conversion, ConvertError> {
    let dialect = options.dialect;
    let mut pixels = image.pixels().to_vec();

    if dialect.reserves_zero() {
        let remapped = reserve_zero(&mut pixels);
        if remapped > 0 {
            log::debug!("remapped {remapped} black pixels to keep 0x0000 free");
        }
    }

    let transparency = if image.has_alpha() || dialect.reserves_zero() {
        Transparency {
            enabled: image.has_alpha(),
            key: find_key_color(&pixels)?,
        }
    } else {
        Transparency::default()
    };
    log::debug!(
        "{dialect}: transparency {}, key {:#06x}",
        if transparency.enabled { "on" } else { "off" },
        transparency.key
    );

    let packed: Vec<u16> = pack_pixels(&pixels, transparency.key).collect();

    let lines = emit(
        dialect,
        &EmitParams {
            source_name: &options.source_name,
            name: &options.name,
            storage: options.storage,
            width: image.width(),
            height: image.height(),
            transparency,
            pixels: &packed,
        },
    );

    Ok(Conversion {
        lines,
        packed,
        transparency,
    })
}
