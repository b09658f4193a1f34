//! The shared color palette built across all frames of one animation.

use crate::error::MpxError;
use crate::format::{Color, PALETTE_CAPACITY, RESERVED_COLORS};

/// An insertion-ordered, capacity-bounded set of distinct colors.
///
/// Indices 0 and 1 are always black and white, seeded at construction
/// before any frame is processed. Every later color gets the next free
/// index the first time it is seen; index assignment therefore depends
/// only on frame order and row-major pixel order, and re-running the
/// same frames reproduces the same palette byte for byte.
///
/// Lookup is a linear equality scan. The palette is small by design
/// (at most [`PALETTE_CAPACITY`] entries), and the scan preserves the
/// exact first-seen-wins behavior the container layout depends on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// A palette with the two reserved entries already in place.
    pub fn new() -> Self {
        let mut colors = Vec::with_capacity(PALETTE_CAPACITY);
        colors.push(Color::BLACK);
        colors.push(Color::WHITE);
        Self { colors }
    }

    /// Returns the index of `color`, appending it if unseen. Fails
    /// with `PaletteOverflow` once the capacity is exhausted.
    pub fn intern(&mut self, color: Color) -> Result<u8, MpxError> {
        for (i, existing) in self.colors.iter().enumerate() {
            if *existing == color {
                return Ok(i as u8);
            }
        }
        if self.colors.len() >= PALETTE_CAPACITY {
            return Err(MpxError::PaletteOverflow {
                capacity: PALETTE_CAPACITY,
            });
        }
        self.colors.push(color);
        Ok((self.colors.len() - 1) as u8)
    }

    /// Total entries, reserved ones included.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        false // the reserved entries are always present
    }

    /// The entries after black and white, in insertion order. These
    /// are the colors serialized into the container's palette section.
    pub fn non_reserved(&self) -> &[Color] {
        &self.colors[RESERVED_COLORS..]
    }

    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::new()
    }
}
