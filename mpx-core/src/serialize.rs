//! The two serializations of an assembled container: raw binary and
//! an embeddable C source array. Both carry the identical byte
//! sequence; only the text rendering differs.

use std::fmt::Write;

use crate::format::{Container, FRAME_TERMINATOR};

/// The binary view: the assembled bytes, verbatim, no framing.
pub fn to_binary(container: &Container) -> &[u8] {
    container.as_bytes()
}

/// Renders the container as a C byte-array literal named
/// `array_name`, sized to the exact byte count. Header and palette
/// values are decimal, frame bytes hexadecimal, with lines wrapped
/// around 24 characters. The formatting is cosmetic; parsing the
/// values back yields the binary view byte for byte.
pub fn to_source_text(container: &Container, array_name: &str) -> String {
    let bytes = container.as_bytes();
    let mut out = String::new();

    let _ = writeln!(out, "char {}[{}] = {{", array_name, bytes.len());
    let _ = writeln!(out, "{:3}, {:3},", bytes[0], bytes[1]);

    // Palette section: one decimal triple per non-reserved color.
    let palette_end = 2 + container.non_reserved_colors() as usize * 3;
    let mut line_len = 0usize;
    for triple in bytes[2..palette_end].chunks_exact(3) {
        let _ = write!(out, "{:3}, {:3}, {:3}, ", triple[0], triple[1], triple[2]);
        line_len += 15;
        if line_len >= 24 {
            out.push('\n');
            line_len = 0;
        }
    }
    if line_len > 0 {
        out.push('\n');
    }

    // Frame sections. The terminator byte never occurs inside a frame
    // (literals and run tokens are both non-zero), so it delimits
    // frames unambiguously.
    let mut rest = &bytes[palette_end..];
    let mut frames_left = container.frame_count() as usize;
    while frames_left > 0 {
        let _ = writeln!(out, "{:3},", rest[0]); // tempo
        let end = rest[1..]
            .iter()
            .position(|&b| b == FRAME_TERMINATOR)
            .map(|p| p + 1)
            .unwrap_or(rest.len());
        for (i, b) in rest[1..end].iter().enumerate() {
            let _ = write!(out, "0x{:02X}, ", b);
            if i % 4 == 3 {
                out.push('\n');
            }
        }
        if (end - 1) % 4 != 0 {
            out.push('\n');
        }
        frames_left -= 1;
        if frames_left == 0 {
            out.push_str("0x00 };\n");
        } else {
            out.push_str("0x00,\n");
        }
        rest = &rest[end + 1..];
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{assemble, FrameSpec};
    use crate::format::{Color, Tempo};
    use crate::testutil::GridSource;

    /// Reverses the cosmetic rendering: strips the declaration and
    /// brace, then parses each comma-separated value as hex or
    /// decimal.
    fn parse_source_text(text: &str) -> Vec<u8> {
        let open = text.find('{').unwrap();
        let close = text.rfind('}').unwrap();
        text[open + 1..close]
            .split(',')
            .map(str::trim)
            .filter(|tok| !tok.is_empty())
            .map(|tok| {
                if let Some(hex) = tok.strip_prefix("0x").or_else(|| tok.strip_prefix("0X")) {
                    u8::from_str_radix(hex, 16).unwrap()
                } else {
                    tok.parse().unwrap()
                }
            })
            .collect()
    }

    fn sample_container() -> crate::format::Container {
        let red = Color::new(255, 0, 0);
        let blue = Color::new(0, 0, 255);
        let frames = vec![
            FrameSpec::new(
                GridSource::new(4, 2, vec![red, red, red, blue, blue, blue, blue, blue]),
                Tempo::new(30).unwrap(),
            ),
            FrameSpec::new(
                GridSource::new(4, 2, vec![Color::BLACK; 8]),
                Tempo::new(120).unwrap(),
            ),
        ];
        assemble(&frames).unwrap()
    }

    #[test]
    fn binary_view_is_identity() {
        let container = sample_container();
        assert_eq!(to_binary(&container), container.as_bytes());
    }

    #[test]
    fn source_text_declares_exact_size_and_name() {
        let container = sample_container();
        let text = to_source_text(&container, "motif");
        assert!(text.starts_with(&format!("char motif[{}] = {{", container.len())));
        assert!(text.trim_end().ends_with("0x00 };"));
    }

    #[test]
    fn source_text_round_trips_to_the_binary_view() {
        let container = sample_container();
        let text = to_source_text(&container, "motif");
        assert_eq!(parse_source_text(&text), to_binary(&container));
    }

    #[test]
    fn single_frame_text_round_trips() {
        let frames = vec![FrameSpec::new(
            GridSource::new(2, 2, vec![Color::WHITE; 4]),
            Tempo::new(1).unwrap(),
        )];
        let container = assemble(&frames).unwrap();
        let text = to_source_text(&container, "blink");
        assert_eq!(parse_source_text(&text), container.as_bytes());
    }
}
