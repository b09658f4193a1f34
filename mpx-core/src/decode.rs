//! Reading an MPX container back into palette and index maps.
//!
//! The device's geometry is not stored in the container, so the
//! caller supplies it. Decoding mirrors the encoder's row rule: the
//! current-value state resets at every row boundary, and a run token
//! may never carry a run across one.

use crate::error::MpxError;
use crate::format::{Color, Geometry, FRAME_TERMINATOR, INDEX_BIAS, RESERVED_COLORS};

/// One frame recovered from a container: its tempo byte and its
/// biased index map, row-major, exactly as the indexer produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedFrame {
    pub tempo: u8,
    pub index_map: Vec<u8>,
}

/// A fully parsed container. The palette includes the two reserved
/// entries, so `palette[index]` resolves any unbiased frame index.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedContainer {
    pub geometry: Geometry,
    pub palette: Vec<Color>,
    pub frames: Vec<DecodedFrame>,
}

/// Parses `bytes` as an MPX container for a device with `geometry`.
pub fn decode(bytes: &[u8], geometry: Geometry) -> Result<DecodedContainer, MpxError> {
    let mut cursor = Cursor { bytes, pos: 0 };

    let non_reserved = cursor.take()? as usize;
    let frame_count = cursor.take()? as usize;
    if frame_count == 0 {
        return Err(cursor.malformed("frame count is zero"));
    }

    let mut palette = Vec::with_capacity(RESERVED_COLORS + non_reserved);
    palette.push(Color::BLACK);
    palette.push(Color::WHITE);
    for _ in 0..non_reserved {
        let r = cursor.take()?;
        let g = cursor.take()?;
        let b = cursor.take()?;
        palette.push(Color::new(r, g, b));
    }

    let mut frames = Vec::with_capacity(frame_count);
    for _ in 0..frame_count {
        frames.push(decode_frame(&mut cursor, geometry, palette.len())?);
    }

    if cursor.pos != bytes.len() {
        return Err(cursor.malformed("trailing bytes after the last frame"));
    }

    Ok(DecodedContainer {
        geometry,
        palette,
        frames,
    })
}

fn decode_frame(
    cursor: &mut Cursor<'_>,
    geometry: Geometry,
    palette_len: usize,
) -> Result<DecodedFrame, MpxError> {
    let tempo = cursor.take()?;
    if tempo == 0 {
        return Err(MpxError::InvalidTempo);
    }

    let width = geometry.width as usize;
    let mut index_map = Vec::with_capacity(geometry.area());

    for _ in 0..geometry.height {
        // Row state resets here: runs never span rows.
        let mut current = 0u8;
        let mut filled = 0usize;
        while filled < width {
            let b = cursor.take()?;
            if b == FRAME_TERMINATOR {
                return Err(cursor.malformed("terminator inside a row"));
            }
            if b >= INDEX_BIAS {
                let index = (b - INDEX_BIAS) as usize;
                if index >= palette_len {
                    return Err(cursor.malformed("index byte beyond the palette"));
                }
                index_map.push(b);
                current = b;
                filled += 1;
            } else {
                // Run token: repeat the current value. Consecutive
                // tokens extend the same run (the encoder splits long
                // runs).
                if current == 0 {
                    return Err(cursor.malformed("run token before any literal"));
                }
                let run = b as usize;
                if filled + run > width {
                    return Err(cursor.malformed("run crosses a row boundary"));
                }
                for _ in 0..run {
                    index_map.push(current);
                }
                filled += run;
            }
        }
    }

    let terminator = cursor.take()?;
    if terminator != FRAME_TERMINATOR {
        return Err(cursor.malformed("missing frame terminator"));
    }

    Ok(DecodedFrame { tempo, index_map })
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl Cursor<'_> {
    fn take(&mut self) -> Result<u8, MpxError> {
        let b = self
            .bytes
            .get(self.pos)
            .copied()
            .ok_or(MpxError::Truncated { offset: self.pos })?;
        self.pos += 1;
        Ok(b)
    }

    fn malformed(&self, reason: &'static str) -> MpxError {
        MpxError::Malformed {
            offset: self.pos,
            reason,
        }
    }
}
