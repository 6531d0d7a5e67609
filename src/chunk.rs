//! Overlapping fixed-size text chunker.
//!
//! Splits long source text (the web-page path) into substrings of at most
//! `chunk_size` characters, where consecutive substrings share exactly
//! `chunk_overlap` characters. The overlap keeps sentence context intact
//! across chunk boundaries for the downstream embedding model.
//!
//! Offsets are counted in characters, not bytes, so multi-byte text never
//! splits inside a codepoint.

/// Split `text` into ordered, overlapping chunks.
///
/// While more than `chunk_size` characters remain, each chunk starts
/// `chunk_size - chunk_overlap` characters after the previous one; the
/// final chunk may be shorter. Empty input yields no chunks.
///
/// Dropping the first `chunk_overlap` characters of every chunk but the
/// first and concatenating reconstructs `text` exactly.
///
/// # Panics
///
/// Panics if `chunk_size` is zero or `chunk_overlap >= chunk_size`;
/// [`crate::config::load_config`] rejects such configurations up front.
pub fn split_text(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    assert!(chunk_size > 0, "chunk_size must be > 0");
    assert!(
        chunk_overlap < chunk_size,
        "chunk_overlap must be < chunk_size"
    );

    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return Vec::new();
    }
    if chars.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let step = chunk_size - chunk_overlap;
    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let end = (start + chunk_size).min(chars.len());
        chunks.push(chars[start..end].iter().collect());
        if end == chars.len() {
            break;
        }
        start += step;
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Undo the overlap: keep the first chunk whole, skip the first
    /// `overlap` characters of every later chunk, concatenate.
    fn reconstruct(chunks: &[String], overlap: usize) -> String {
        let mut out = String::new();
        for (i, chunk) in chunks.iter().enumerate() {
            if i == 0 {
                out.push_str(chunk);
            } else {
                out.extend(chunk.chars().skip(overlap));
            }
        }
        out
    }

    #[test]
    fn test_empty_text_yields_no_chunks() {
        assert!(split_text("", 1000, 200).is_empty());
    }

    #[test]
    fn test_short_text_single_chunk() {
        let chunks = split_text("hello world", 1000, 200);
        assert_eq!(chunks, vec!["hello world".to_string()]);
    }

    #[test]
    fn test_exact_size_single_chunk() {
        let text: String = std::iter::repeat('x').take(100).collect();
        let chunks = split_text(&text, 100, 20);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0], text);
    }

    #[test]
    fn test_one_over_size_splits() {
        let text: String = ('a'..='z').cycle().take(101).collect();
        let chunks = split_text(&text, 100, 20);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chars().count(), 100);
        assert_eq!(chunks[1].chars().count(), 21);
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_consecutive_chunks_overlap_exactly() {
        let text: String = ('a'..='z').cycle().take(250).collect();
        let chunks = split_text(&text, 100, 20);
        for pair in chunks.windows(2) {
            let tail: String = pair[0].chars().skip(pair[0].chars().count() - 20).collect();
            let head: String = pair[1].chars().take(20).collect();
            assert_eq!(tail, head);
        }
        assert_eq!(reconstruct(&chunks, 20), text);
    }

    #[test]
    fn test_chunk_count_is_minimal() {
        // len > size: first chunk covers `size` chars, each later chunk
        // adds `size - overlap` new ones.
        let size = 100;
        let overlap = 20;
        let step = size - overlap;
        for len in [101usize, 180, 181, 500, 1000] {
            let text: String = std::iter::repeat('y').take(len).collect();
            let chunks = split_text(&text, size, overlap);
            let expected = 1 + (len - size).div_ceil(step);
            assert_eq!(chunks.len(), expected, "len={}", len);
        }
    }

    #[test]
    fn test_multibyte_round_trip() {
        let text: String = "héllo wörld ünïcode προϊόν ".chars().cycle().take(2500).collect();
        let chunks = split_text(&text, 1000, 200);
        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= 1000);
        }
        assert_eq!(reconstruct(&chunks, 200), text);
    }
}
