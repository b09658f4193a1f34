//! Row-scoped run-length encoding of index bytes.

use crate::format::{INDEX_BIAS, MAX_RUN};

/// Encodes one row of biased index bytes as a literal/run stream.
///
/// The scheme is literal-run alternation, not count-prefixed RLE: a
/// value is emitted once as a literal when it first appears, and a
/// run-length token follows only if the value actually repeated, only
/// once the run closes (on a value change or at the row end). A value
/// of 0 for the "current" state means no run is open, which is safe
/// because biased index bytes are never 0.
///
/// Runs never span rows; the caller encodes each row independently
/// and the decoder resets its current-value state at every row
/// boundary. A run longer than [`MAX_RUN`] is split into consecutive
/// tokens so that no token collides with the literal byte domain.
pub fn encode_row(row: &[u8]) -> Vec<u8> {
    debug_assert!(row.iter().all(|&b| b >= INDEX_BIAS));

    let mut out = Vec::new();
    let mut current = 0u8;
    let mut run = 0usize;

    for &b in row {
        if current == 0 {
            // First pixel of the row.
            out.push(b);
            current = b;
            run = 0;
        } else if b == current {
            run += 1;
        } else {
            flush_run(&mut out, run);
            out.push(b);
            current = b;
            run = 0;
        }
    }
    flush_run(&mut out, run);
    out
}

fn flush_run(out: &mut Vec<u8>, mut run: usize) {
    while run > 0 {
        let token = run.min(MAX_RUN as usize) as u8;
        out.push(token);
        run -= token as usize;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: u8 = 0x22;
    const B: u8 = 0x23;

    #[test]
    fn empty_row_emits_nothing() {
        assert!(encode_row(&[]).is_empty());
    }

    #[test]
    fn single_pixel_is_one_literal() {
        assert_eq!(encode_row(&[A]), vec![A]);
    }

    #[test]
    fn run_closes_on_value_change() {
        // A,A,B,A: the A-run flushes as 1 when B arrives; the trailing
        // lone A carries no run token.
        assert_eq!(encode_row(&[A, A, B, A]), vec![A, 0x01, B, A]);
    }

    #[test]
    fn alternating_values_emit_only_literals() {
        assert_eq!(encode_row(&[A, B, A, B]), vec![A, B, A, B]);
    }

    #[test]
    fn uniform_reference_row_is_literal_plus_run() {
        // A full 32-pixel row of one color: literal then 31 repeats.
        let row = [A; 32];
        assert_eq!(encode_row(&row), vec![A, 31]);
    }

    #[test]
    fn run_at_row_end_is_flushed() {
        assert_eq!(encode_row(&[B, A, A, A]), vec![B, A, 0x03]);
    }

    #[test]
    fn long_runs_split_below_the_literal_domain() {
        // 100 identical pixels: 99 repeats = 31 + 31 + 31 + 6.
        let row = [A; 100];
        assert_eq!(encode_row(&row), vec![A, 31, 31, 31, 6]);
        for &b in &encode_row(&row)[1..] {
            assert!(b < INDEX_BIAS && b != 0);
        }
    }
}
