//! Mapping frames to biased palette-index bytes.

use crate::error::MpxError;
use crate::format::{Color, Geometry, INDEX_BIAS};
use crate::palette::Palette;

/// One frame of raster input. Implementations supply pixels fully
/// decoded; the core never touches files or sockets.
pub trait PixelSource {
    fn width(&self) -> u16;
    fn height(&self) -> u16;
    fn pixel_at(&self, x: u16, y: u16) -> Color;
}

/// The biased index bytes of one frame, row-major, `width × height`
/// entries. Built right after the palette absorbs the frame's colors
/// and consumed immediately by the row encoder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameIndexMap {
    geometry: Geometry,
    bytes: Vec<u8>,
}

impl FrameIndexMap {
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Rows in top-to-bottom order, each `width` bytes long.
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks_exact(self.geometry.width as usize)
    }
}

/// Maps every pixel of `source` to `palette_index + INDEX_BIAS`,
/// in row-major order, interning unseen colors into the shared
/// palette as they are encountered.
///
/// Palette construction and indexing are deliberately interleaved:
/// one linear pass per frame, mutating the palette threaded through
/// each call, so a color first seen in frame 3 indexes above every
/// color frames 1-2 already interned.
pub fn index_frame(
    source: &impl PixelSource,
    palette: &mut Palette,
    expected: Geometry,
    frame: usize,
) -> Result<FrameIndexMap, MpxError> {
    let got = Geometry::new(source.width(), source.height());
    if got != expected {
        return Err(MpxError::DimensionMismatch {
            frame,
            expected,
            got,
        });
    }

    let mut bytes = Vec::with_capacity(expected.area());
    for y in 0..expected.height {
        for x in 0..expected.width {
            let index = palette.intern(source.pixel_at(x, y))?;
            // Never 0x00: the bias keeps index bytes out of the
            // terminator and run-token domains.
            bytes.push(index + INDEX_BIAS);
        }
    }

    Ok(FrameIndexMap {
        geometry: expected,
        bytes,
    })
}
