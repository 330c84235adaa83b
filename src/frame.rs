// src/frame.rs

//! Line framing for interleaved process output.
//!
//! Raw chunks arriving from a child's stdout or stderr may contain several
//! logical lines (or a partial one). Framing re-renders a chunk so that every
//! physical line carries the unit's prefix, which keeps output from many
//! concurrently-running processes readable. Writes stay line-atomic because the
//! whole block is framed before it is printed; the sink itself is never locked.

/// Re-render `chunk` as prefix-joined lines.
///
/// The chunk is decoded as UTF-8 (invalid bytes become replacement
/// characters), trimmed, split on newlines, and re-joined with
/// `"\n" + prefix`. The caller prints the first prefix itself and terminates
/// the block with a newline.
///
/// An empty or whitespace-only chunk yields `""`; callers must not print a
/// bare prefixed line in that case.
pub fn frame(chunk: &[u8], prefix: &str) -> String {
    let text = String::from_utf8_lossy(chunk);
    let separator = format!("\n{prefix}");
    let joined = text
        .trim()
        .split('\n')
        .collect::<Vec<_>>()
        .join(&separator);
    joined.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn multi_line_chunk_gets_prefixed_continuations() {
        assert_eq!(frame(b"a\nb\nc\n", "X: "), "a\nX: b\nX: c");
    }

    #[test]
    fn single_line_without_trailing_newline() {
        assert_eq!(frame(b"hello", "X: "), "hello");
    }

    #[test]
    fn empty_chunk_yields_empty_string() {
        assert_eq!(frame(b"", "X: "), "");
    }

    #[test]
    fn whitespace_only_chunk_yields_empty_string() {
        assert_eq!(frame(b"  \n\t\n  ", "X: "), "");
    }

    #[test]
    fn invalid_utf8_becomes_replacement_characters() {
        let framed = frame(b"ok\n\xff\xfe bad", "X: ");
        assert_eq!(framed, "ok\nX: \u{fffd}\u{fffd} bad");
    }

    proptest! {
        #[test]
        fn framed_output_has_no_surrounding_whitespace(chunk in ".*") {
            let framed = frame(chunk.as_bytes(), "P: ");
            prop_assert_eq!(framed.trim(), framed.as_str());
        }

        #[test]
        fn every_interior_newline_is_followed_by_the_prefix(chunk in ".*") {
            let framed = frame(chunk.as_bytes(), "P: ");
            for piece in framed.split('\n').skip(1) {
                prop_assert!(piece.starts_with("P: "));
            }
        }
    }
}
