//! MPX container layout and shared wire-format types.
//!
//! An MPX container is a flat byte stream consumed whole by the
//! playback device:
//!
//! ```text
//! byte 0        non-reserved color count (palette size minus B&W)
//! byte 1        frame count
//! bytes 2..     palette: one R,G,B triple per non-reserved color,
//!               insertion order
//! per frame:
//!   1 byte      tempo (1-255, unit = 10 ms)
//!   K bytes     row-scoped RLE stream, all rows concatenated
//!   1 byte      0x00 frame terminator
//! ```
//!
//! Frame bytes are palette indices biased by [`INDEX_BIAS`], which
//! keeps three byte domains disjoint inside a frame section: `0x00` is
//! the terminator, `0x01..0x1F` are run-length tokens, `0x20..` are
//! literal index bytes. The geometry (one fixed width and height for
//! the whole animation) is not stored; the device knows its own panel
//! size.

use crate::error::MpxError;

/// Offset added to every palette index before it is stored in a frame.
pub const INDEX_BIAS: u8 = 0x20;

/// Byte marking the end of one frame's encoded row stream.
pub const FRAME_TERMINATOR: u8 = 0x00;

/// Largest value a single run-length token may carry. Anything at or
/// above [`INDEX_BIAS`] would be read back as a literal.
pub const MAX_RUN: u8 = INDEX_BIAS - 1;

/// Palette slots fixed before any frame is processed: black at index
/// 0, white at index 1.
pub const RESERVED_COLORS: usize = 2;

/// Total palette capacity, reserved entries included. The device
/// firmware reserves 230 slots, but every legal index must survive the
/// bias as a non-zero byte, which caps the usable capacity at 224
/// (index 224 would bias to exactly 0x00, the terminator).
pub const PALETTE_CAPACITY: usize = 0x100 - INDEX_BIAS as usize;

/// Largest container the device firmware will accept, in bytes.
pub const CONTAINER_CEILING: usize = 2300;

// Index domain and terminator domain must stay disjoint: the smallest
// biased index sits above the terminator and every run-length token,
// and the largest biased index still fits a byte.
const _: () = assert!(INDEX_BIAS > FRAME_TERMINATOR);
const _: () = assert!(PALETTE_CAPACITY - 1 + (INDEX_BIAS as usize) <= 0xFF);
const _: () = assert!(RESERVED_COLORS <= PALETTE_CAPACITY);

/// An RGB color. Equality is exact channel match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Per-frame display duration in 10 ms units. Zero is not a valid
/// tempo; the device treats the tempo byte as mandatory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tempo(u8);

impl Tempo {
    pub fn new(units: u8) -> Result<Self, MpxError> {
        if units == 0 {
            return Err(MpxError::InvalidTempo);
        }
        Ok(Self(units))
    }

    pub fn as_byte(self) -> u8 {
        self.0
    }

    pub fn as_millis(self) -> u32 {
        self.0 as u32 * 10
    }
}

/// The fixed frame geometry of one animation, established by its
/// first frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Geometry {
    pub width: u16,
    pub height: u16,
}

impl Geometry {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Pixels per frame.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// An assembled MPX container: the complete byte stream of the layout
/// above, already validated against [`CONTAINER_CEILING`]. Immutable
/// once built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Container {
    bytes: Vec<u8>,
}

impl Container {
    pub(crate) fn from_assembled(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Header field: count of palette entries after black and white.
    pub fn non_reserved_colors(&self) -> u8 {
        self.bytes[0]
    }

    /// Header field: number of frames in the animation.
    pub fn frame_count(&self) -> u8 {
        self.bytes[1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tempo_rejects_zero() {
        assert_eq!(Tempo::new(0), Err(MpxError::InvalidTempo));
        assert_eq!(Tempo::new(1).unwrap().as_byte(), 1);
        assert_eq!(Tempo::new(255).unwrap().as_millis(), 2550);
    }

    #[test]
    fn biased_indices_stay_clear_of_terminator() {
        for index in 0..PALETTE_CAPACITY {
            let biased = index + INDEX_BIAS as usize;
            assert!(biased <= 0xFF);
            assert_ne!(biased as u8, FRAME_TERMINATOR);
            assert!(biased as u8 > MAX_RUN);
        }
    }
}
