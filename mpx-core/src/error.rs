//! Error taxonomy for container assembly and decoding.
//!
//! Every failure is fatal for the current run: there is no partial
//! container, no retry, and no silent clamping. Callers fix their
//! inputs and assemble again.

use crate::format::Geometry;

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum MpxError {
    /// A frame's geometry disagrees with the animation's fixed
    /// geometry (established by the first frame).
    #[error("frame {frame} is {}x{}, expected {}x{}", got.width, got.height, expected.width, expected.height)]
    DimensionMismatch {
        frame: usize,
        expected: Geometry,
        got: Geometry,
    },

    /// More distinct colors across all frames than the palette holds.
    #[error("palette overflow: more than {capacity} distinct colors")]
    PaletteOverflow { capacity: usize },

    /// Non-reserved color count does not fit the one-byte header field.
    #[error("{count} non-reserved colors do not fit the one-byte header field")]
    TooManyColors { count: usize },

    /// Frame count does not fit the one-byte header field.
    #[error("{0} frames do not fit the one-byte header field")]
    TooManyFrames(usize),

    /// An animation needs at least one frame.
    #[error("animation has no frames")]
    EmptyAnimation,

    /// Cumulative container size would exceed the device buffer.
    #[error("container would exceed the {ceiling}-byte ceiling")]
    ContainerTooLarge { ceiling: usize },

    /// Tempo byte of 0; valid range is 1-255 (unit: 10 ms).
    #[error("tempo 0 is invalid, valid range is 1-255")]
    InvalidTempo,

    /// Container byte stream ends in the middle of a structure.
    #[error("container truncated at byte {offset}")]
    Truncated { offset: usize },

    /// Container byte stream violates the format.
    #[error("malformed container at byte {offset}: {reason}")]
    Malformed { offset: usize, reason: &'static str },
}
