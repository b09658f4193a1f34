//! Core MPX encoding pipeline: shared palette construction, per-frame
//! index maps, row-scoped run-length encoding, and container assembly
//! with the device's byte ceiling enforced throughout. Binary and
//! C-source serializations of the result live in [`serialize`].

pub mod decode;
pub mod encode;
pub mod error;
pub mod format;
pub mod index;
pub mod palette;
pub mod rle;
pub mod serialize;


#[cfg(test)]
mod tests {
    use crate::decode::decode;
    use crate::encode::{assemble, FrameSpec};
    use crate::format::{Color, Geometry, Tempo};
    use crate::index::{index_frame, PixelSource};
    use crate::palette::Palette;
    use crate::testutil::GridSource;

    fn tempo(units: u8) -> Tempo {
        Tempo::new(units).unwrap()
    }

    /// A small three-frame animation with colors introduced across
    /// frames, so palette ordering depends on frame order.
    fn sample_frames() -> Vec<FrameSpec<GridSource>> {
        let red = Color::new(255, 0, 0);
        let green = Color::new(0, 255, 0);
        let blue = Color::new(0, 0, 255);

        vec![
            FrameSpec::new(
                GridSource::new(
                    4,
                    2,
                    vec![
                        Color::BLACK, Color::BLACK, red, red,
                        red, red, Color::WHITE, Color::WHITE,
                    ],
                ),
                tempo(30),
            ),
            FrameSpec::new(
                GridSource::new(
                    4,
                    2,
                    vec![
                        green, green, green, green,
                        red, Color::BLACK, red, Color::BLACK,
                    ],
                ),
                tempo(10),
            ),
            FrameSpec::new(
                GridSource::new(
                    4,
                    2,
                    vec![
                        blue, blue, blue, blue,
                        blue, blue, blue, blue,
                    ],
                ),
                tempo(200),
            ),
        ]
    }

    #[test]
    fn container_round_trips_to_the_indexer_output() {
        let frames = sample_frames();
        let container = assemble(&frames).unwrap();
        let decoded = decode(container.as_bytes(), Geometry::new(4, 2)).unwrap();

        // Re-derive the index maps the way the assembler did.
        let mut palette = Palette::new();
        let geometry = Geometry::new(4, 2);
        let expected: Vec<_> = frames
            .iter()
            .enumerate()
            .map(|(i, f)| index_frame(&f.source, &mut palette, geometry, i).unwrap())
            .collect();

        assert_eq!(decoded.palette, palette.colors());
        assert_eq!(decoded.frames.len(), frames.len());
        for (decoded_frame, (map, spec)) in
            decoded.frames.iter().zip(expected.iter().zip(&frames))
        {
            assert_eq!(decoded_frame.tempo, spec.tempo.as_byte());
            assert_eq!(decoded_frame.index_map, map.as_bytes());
        }
    }

    #[test]
    fn assembly_is_deterministic() {
        let once = assemble(&sample_frames()).unwrap();
        let twice = assemble(&sample_frames()).unwrap();
        assert_eq!(once.as_bytes(), twice.as_bytes());
    }

    #[test]
    fn palette_order_follows_first_sighting_across_frames() {
        let container = assemble(&sample_frames()).unwrap();
        let decoded = decode(container.as_bytes(), Geometry::new(4, 2)).unwrap();

        // red first (frame 1), then green (frame 2), then blue
        // (frame 3), after the reserved pair.
        assert_eq!(
            decoded.palette,
            vec![
                Color::BLACK,
                Color::WHITE,
                Color::new(255, 0, 0),
                Color::new(0, 255, 0),
                Color::new(0, 0, 255),
            ]
        );
    }

    #[test]
    fn runs_do_not_cross_row_boundaries() {
        // Last pixel of row 0 and all of row 1 share a color. Encoded
        // independently, the shared color restarts as a literal in
        // row 1 instead of extending the row-0 run.
        let red = Color::new(255, 0, 0);
        let frames = vec![FrameSpec::new(
            GridSource::new(
                3,
                2,
                vec![Color::BLACK, red, red, red, red, red],
            ),
            tempo(30),
        )];
        let container = assemble(&frames).unwrap();

        // header + frame: tempo, row 0 = black, red, run 1,
        // row 1 = red literal again, run 2, terminator.
        assert_eq!(
            container.as_bytes(),
            &[1, 1, 255, 0, 0, 30, 0x20, 0x22, 0x01, 0x22, 0x02, 0x00]
        );

        let decoded = decode(container.as_bytes(), Geometry::new(3, 2)).unwrap();
        assert_eq!(
            decoded.frames[0].index_map,
            vec![0x20, 0x22, 0x22, 0x22, 0x22, 0x22]
        );
    }

    #[test]
    fn source_width_and_height_drive_the_geometry() {
        let frames = sample_frames();
        assert_eq!(frames[0].source.width(), 4);
        assert_eq!(frames[0].source.height(), 2);
        let container = assemble(&frames).unwrap();
        assert_eq!(container.frame_count(), 3);
    }
}
