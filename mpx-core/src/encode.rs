//! Container assembly: the whole pipeline from pixel sources to a
//! finished MPX byte stream.

use crate::error::MpxError;
use crate::format::{
    Container, Geometry, Tempo, CONTAINER_CEILING, FRAME_TERMINATOR, RESERVED_COLORS,
};
use crate::index::{index_frame, FrameIndexMap, PixelSource};
use crate::palette::Palette;
use crate::rle::encode_row;

/// One frame of input to [`assemble`]: where its pixels come from and
/// how long the device displays it. Tempo is mandatory up front;
/// nothing prompts for it mid-assembly.
pub struct FrameSpec<S> {
    pub source: S,
    pub tempo: Tempo,
}

impl<S> FrameSpec<S> {
    pub fn new(source: S, tempo: Tempo) -> Self {
        Self { source, tempo }
    }
}

/// Output buffer that refuses to grow past the device ceiling. The
/// check runs before every append, so a too-large animation fails the
/// moment the running total would cross the limit, never after a
/// truncated write.
struct BoundedBuffer {
    bytes: Vec<u8>,
    ceiling: usize,
}

impl BoundedBuffer {
    fn new(ceiling: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(ceiling),
            ceiling,
        }
    }

    fn push(&mut self, byte: u8) -> Result<(), MpxError> {
        self.reserve(1)?;
        self.bytes.push(byte);
        Ok(())
    }

    fn extend(&mut self, chunk: &[u8]) -> Result<(), MpxError> {
        self.reserve(chunk.len())?;
        self.bytes.extend_from_slice(chunk);
        Ok(())
    }

    fn reserve(&mut self, additional: usize) -> Result<(), MpxError> {
        if self.bytes.len() + additional > self.ceiling {
            return Err(MpxError::ContainerTooLarge {
                ceiling: self.ceiling,
            });
        }
        Ok(())
    }

    fn into_inner(self) -> Vec<u8> {
        self.bytes
    }
}

/// Assembles an ordered sequence of frames into one MPX container.
///
/// The animation's geometry is established by the first frame; every
/// later frame must match it. Pass one indexes all frames in order
/// against a single shared palette (so palette indices depend only on
/// frame order and row-major pixel order); pass two serializes the
/// header, the non-reserved palette triples, and each frame's tempo,
/// row-encoded stream, and terminator, enforcing the byte ceiling
/// incrementally.
pub fn assemble<S: PixelSource>(frames: &[FrameSpec<S>]) -> Result<Container, MpxError> {
    if frames.is_empty() {
        return Err(MpxError::EmptyAnimation);
    }
    if frames.len() > u8::MAX as usize {
        return Err(MpxError::TooManyFrames(frames.len()));
    }

    let geometry = Geometry::new(frames[0].source.width(), frames[0].source.height());

    // Pass 1: shared palette + one index map per frame.
    let mut palette = Palette::new();
    let mut maps: Vec<FrameIndexMap> = Vec::with_capacity(frames.len());
    for (i, frame) in frames.iter().enumerate() {
        maps.push(index_frame(&frame.source, &mut palette, geometry, i)?);
    }

    let non_reserved = palette.len() - RESERVED_COLORS;
    if non_reserved > u8::MAX as usize {
        return Err(MpxError::TooManyColors {
            count: non_reserved,
        });
    }

    // Pass 2: serialize through the bounded buffer.
    let mut buf = BoundedBuffer::new(CONTAINER_CEILING);
    buf.push(non_reserved as u8)?;
    buf.push(frames.len() as u8)?;

    for color in palette.non_reserved() {
        buf.extend(&[color.r, color.g, color.b])?;
    }

    for (frame, map) in frames.iter().zip(&maps) {
        buf.push(frame.tempo.as_byte())?;
        for row in map.rows() {
            buf.extend(&encode_row(row))?;
        }
        buf.push(FRAME_TERMINATOR)?;
    }

    Ok(Container::from_assembled(buf.into_inner()))
}
