//! Granularity-specific text splitting
//!
//! Each splitter turns a string into an ordered list of pieces tagged as
//! content or separator. Pieces always concatenate back to the input.

use unicode_segmentation::UnicodeSegmentation;

use crate::segment::Granularity;

/// One split piece: the text slice and whether it is a separator
pub(crate) struct Piece<'a> {
    pub text: &'a str,
    pub is_separator: bool,
}

/// Split text at the given granularity
pub(crate) fn split(text: &str, granularity: Granularity) -> Vec<Piece<'_>> {
    match granularity {
        Granularity::Line => split_lines(text),
        Granularity::Word => split_words(text),
        Granularity::Character => split_graphemes(text),
    }
}

/// Lines delimited by `\n`; the newline (including a preceding `\r`) is its
/// own separator piece
fn split_lines(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut start = 0;

    for (idx, _) in text.match_indices('\n') {
        let brk = if idx > start && text.as_bytes()[idx - 1] == b'\r' {
            idx - 1
        } else {
            idx
        };
        if brk > start {
            pieces.push(Piece {
                text: &text[start..brk],
                is_separator: false,
            });
        }
        pieces.push(Piece {
            text: &text[brk..=idx],
            is_separator: true,
        });
        start = idx + 1;
    }

    if start < text.len() {
        pieces.push(Piece {
            text: &text[start..],
            is_separator: false,
        });
    }
    pieces
}

/// Words are maximal non-whitespace runs; whitespace runs are separators
fn split_words(text: &str) -> Vec<Piece<'_>> {
    let mut pieces = Vec::new();
    let mut run_start = 0;
    let mut run_is_ws: Option<bool> = None;

    for (idx, ch) in text.char_indices() {
        let is_ws = ch.is_whitespace();
        match run_is_ws {
            Some(current) if current == is_ws => {}
            Some(current) => {
                pieces.push(Piece {
                    text: &text[run_start..idx],
                    is_separator: current,
                });
                run_start = idx;
                run_is_ws = Some(is_ws);
            }
            None => run_is_ws = Some(is_ws),
        }
    }

    if let Some(current) = run_is_ws {
        pieces.push(Piece {
            text: &text[run_start..],
            is_separator: current,
        });
    }
    pieces
}

/// Extended grapheme clusters; whitespace clusters are separators
fn split_graphemes(text: &str) -> Vec<Piece<'_>> {
    text.graphemes(true)
        .map(|g| Piece {
            text: g,
            is_separator: g.chars().all(char::is_whitespace),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reconstruct(pieces: &[Piece<'_>]) -> String {
        pieces.iter().map(|p| p.text).collect()
    }

    #[test]
    fn test_lines_round_trip() {
        let text = "Sip the Spirit\nof Summer";
        let pieces = split_lines(text);
        assert_eq!(reconstruct(&pieces), text);
        assert_eq!(pieces.iter().filter(|p| !p.is_separator).count(), 2);
    }

    #[test]
    fn test_crlf_is_one_separator() {
        let pieces = split_lines("a\r\nb");
        assert_eq!(pieces.len(), 3);
        assert_eq!(pieces[1].text, "\r\n");
        assert!(pieces[1].is_separator);
    }

    #[test]
    fn test_words_keep_whitespace_runs() {
        let pieces = split_words("Cool.  Crisp. Classic.");
        assert_eq!(reconstruct(&pieces), "Cool.  Crisp. Classic.");
        let words: Vec<_> = pieces.iter().filter(|p| !p.is_separator).collect();
        assert_eq!(words.len(), 3);
        assert_eq!(words[0].text, "Cool.");
    }

    #[test]
    fn test_graphemes_do_not_split_clusters() {
        // family emoji is a single extended grapheme cluster
        let text = "a\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F466}b";
        let pieces = split_graphemes(text);
        assert_eq!(pieces.len(), 3);
        assert_eq!(reconstruct(&pieces), text);
    }
}
