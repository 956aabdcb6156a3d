//! Transparency key search.
//!
//! RGB565 has no alpha channel, so transparent pixels are marked with a "key" color instead: a
//! value that no opaque pixel of the image packs to.

use crate::{
    convert::{ConvertError, ExhaustedColorSpaceSnafu},
    pack::{is_opaque, pack_argb},
    Argb,
};
use snafu::OptionExt;

/// Stand-in for opaque black when `0x0000` is reserved as the key. Packs to `0x0001`.
pub const NEAR_BLACK: [u8; 3] = [0, 0, 8];

/// Set of RGB565 values, one bit per value.
#[derive(Clone)]
pub struct ColorPresence {
    bits: [u64; 1024],
}

impl ColorPresence {
    pub const fn new() -> Self {
        Self { bits: [0; 1024] }
    }

    /// Collects the packed colors of all opaque pixels.
    pub fn from_opaque_pixels(pixels: &[Argb]) -> Self {
        let mut presence = Self::new();
        for &pixel in pixels.iter().filter(|&&p| is_opaque(p)) {
            presence.insert(pack_argb(pixel));
        }
        presence
    }

    #[inline]
    pub fn insert(&mut self, color: u16) {
        self.bits[usize::from(color >> 6)] |= 1u64 << (color & 0b11_1111);
    }

    #[inline]
    pub fn contains(&self, color: u16) -> bool {
        self.bits[usize::from(color >> 6)] & (1u64 << (color & 0b11_1111)) != 0
    }

    /// Returns the smallest value not in the set.
    pub fn first_absent(&self) -> Option<u16> {
        let i = self.bits.iter().position(|&word| word != u64::MAX)?;
        Some(((i as u16) << 6) | (self.bits[i].trailing_ones() as u16))
    }

    /// Number of distinct colors in the set.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|&w| w == 0)
    }
}

impl Default for ColorPresence {
    fn default() -> Self {
        Self::new()
    }
}

/// Finds the smallest RGB565 value that no opaque pixel packs to.
pub fn find_key_color(pixels: &[Argb]) -> Result<u16, ConvertError> {
    let presence = ColorPresence::from_opaque_pixels(pixels);
    log::debug!("{} distinct opaque colors", presence.len());

    presence.first_absent().context(ExhaustedColorSpaceSnafu)
}

/// Moves every opaque pixel that packs to `0x0000` over to [`NEAR_BLACK`], keeping its alpha.
///
/// Returns the number of remapped pixels.
pub fn reserve_zero(pixels: &mut [Argb]) -> usize {
    let [r, g, b] = NEAR_BLACK;
    let mut remapped = 0;

    for pixel in pixels
        .iter_mut()
        .filter(|p| is_opaque(**p) && pack_argb(**p) == 0)
    {
        *pixel = [pixel[0], r, g, b];
        remapped += 1;
    }

    remapped
}
