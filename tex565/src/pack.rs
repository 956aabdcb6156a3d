use crate::Argb;

/// Pixels with an alpha value below this are replaced by the transparency key.
pub const OPAQUE_THRESHOLD: u8 = 0x80;

/// Splits a RGB565 pixel into its components.
#[inline]
pub const fn decode_565(pixel: u16) -> [u8; 3] {
    let r = (pixel & 0b1111_1000_0000_0000) >> 11;
    let g = (pixel & 0b0000_0111_1110_0000) >> 5;
    let b = pixel & 0b0000_0000_0001_1111;

    [r as u8, g as u8, b as u8]
}

/// Compose the 5-bit R, 6-bit G, and 5-bit B values into a RGB565 u16 pixel. Does not mask off
/// higher bits if they are set.
#[inline]
pub const fn encode_rgb565_unchecked([r, g, b]: [u8; 3]) -> u16 {
    ((r as u16) << 11) | ((g as u16) << 5) | (b as u16)
}

/// Packs an RGB888 pixel into RGB565, keeping the high bits of each channel.
///
/// This truncates instead of rounding, so `0xFF` maps to the channel maximum and everything below
/// `0x08` (`0x04` for green) maps to zero.
#[inline]
pub const fn pack_rgb565([r, g, b]: [u8; 3]) -> u16 {
    encode_rgb565_unchecked([r >> 3, g >> 2, b >> 3])
}

/// Packs an ARGB8888 pixel into RGB565. Alpha is dropped.
#[inline]
pub const fn pack_argb([_, r, g, b]: Argb) -> u16 {
    pack_rgb565([r, g, b])
}

#[inline]
pub const fn is_opaque([a, ..]: Argb) -> bool {
    a >= OPAQUE_THRESHOLD
}

/// Packs every pixel, substituting `key` for every pixel that isn't opaque.
pub fn pack_pixels(pixels: &[Argb], key: u16) -> impl Iterator<Item = u16> + '_ {
    pixels
        .iter()
        .map(move |&p| if is_opaque(p) { pack_argb(p) } else { key })
}
