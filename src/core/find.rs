//! Case-insensitive find with a cyclic "find next" cursor
//!
//! Offsets are character offsets into the searched content, which is what
//! the editor widget uses for cursor placement.

use std::ops::Range;

/// Whether a match set has anything to cycle through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Empty,
    Active,
}

/// All matches of one search term
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchSet {
    term: String,
    /// Character ranges of each match, ordered by start
    spans: Vec<Range<usize>>,
    cursor: usize,
}

impl MatchSet {
    /// The terminal "no match" set
    pub fn empty(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            spans: Vec::new(),
            cursor: 0,
        }
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn state(&self) -> MatchState {
        if self.spans.is_empty() {
            MatchState::Empty
        } else {
            MatchState::Active
        }
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Number of matches, counting overlapping ones
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    /// Start offsets in increasing order
    #[allow(dead_code)]
    pub fn positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.spans.iter().map(|span| span.start)
    }

    /// Character range of the match starting at `position`
    pub fn span_at(&self, position: usize) -> Option<Range<usize>> {
        self.spans
            .binary_search_by_key(&position, |span| span.start)
            .ok()
            .map(|idx| self.spans[idx].clone())
    }

    /// Return the match under the cursor and move the cursor on, wrapping
    /// after the last match. `None` when there are no matches.
    pub fn advance(&mut self) -> Option<usize> {
        let span = self.spans.get(self.cursor)?;
        let position = span.start;
        self.cursor = (self.cursor + 1) % self.spans.len();
        Some(position)
    }
}

/// One character of lower-cased content, remembering where it came from
struct FoldedChar {
    ch: char,
    /// Index of the source character in the original content
    source: usize,
    /// First char of its source character's lower-case expansion
    leading: bool,
}

fn fold(text: &str) -> Vec<FoldedChar> {
    let mut folded = Vec::with_capacity(text.len());
    for (source, original) in text.chars().enumerate() {
        for (i, ch) in original.to_lowercase().enumerate() {
            folded.push(FoldedChar {
                ch,
                source,
                leading: i == 0,
            });
        }
    }
    folded
}

/// Find every case-insensitive occurrence of `term` in `content`.
///
/// After a hit at offset `p` the scan resumes at `p + 1`, so overlapping
/// occurrences are all reported ("aa" in "aaa" gives 0 and 1).
pub fn search(content: &str, term: &str) -> MatchSet {
    let needle: Vec<char> = term.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return MatchSet::empty(term);
    }

    let haystack = fold(content);
    let total_chars = haystack.last().map_or(0, |c| c.source + 1);
    let mut spans = Vec::new();

    if haystack.len() >= needle.len() {
        for start in 0..=haystack.len() - needle.len() {
            if !haystack[start].leading {
                continue;
            }
            let end = start + needle.len();
            // Both ends must fall on whole source characters
            let end_source = match haystack.get(end) {
                Some(next) if !next.leading => continue,
                Some(next) => next.source,
                None => total_chars,
            };
            if haystack[start..end].iter().zip(&needle).all(|(h, n)| h.ch == *n) {
                spans.push(haystack[start].source..end_source);
            }
        }
    }

    tracing::debug!("Search for {:?} found {} match(es)", term, spans.len());

    MatchSet {
        term: term.to_string(),
        spans,
        cursor: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn positions(set: &MatchSet) -> Vec<usize> {
        set.positions().collect()
    }

    #[test]
    fn test_overlapping_matches() {
        let set = search("aaa", "aa");
        assert_eq!(positions(&set), vec![0, 1]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.state(), MatchState::Active);
    }

    #[test]
    fn test_case_insensitive() {
        let set = search("The cat sat", "AT");
        assert_eq!(positions(&set), vec![5, 9]);

        let set = search("Hello world, HELLO Rust, hello Littera", "hello");
        assert_eq!(positions(&set), vec![0, 13, 25]);
    }

    #[test]
    fn test_positions_match_term() {
        let content = "Banana bandana BANANA";
        let term = "ana";
        let set = search(content, term);
        let chars: Vec<char> = content.chars().collect();

        assert_eq!(positions(&set), vec![1, 3, 11, 16, 18]);
        for p in set.positions() {
            let found: String = chars[p..p + term.len()].iter().collect();
            assert_eq!(found.to_lowercase(), term);
        }
        assert!(positions(&set).windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_term() {
        let mut set = search("anything", "");
        assert_eq!(set.state(), MatchState::Empty);
        assert_eq!(set.advance(), None);
        assert_eq!(set.advance(), None);
    }

    #[test]
    fn test_absent_term() {
        let mut set = search("Hello world", "rust");
        assert!(set.is_empty());
        assert_eq!(set.term(), "rust");
        assert_eq!(set.advance(), None);
    }

    #[test]
    fn test_term_longer_than_content() {
        assert!(search("ab", "abc").is_empty());
        assert!(search("", "a").is_empty());
    }

    #[test]
    fn test_advance_cycles() {
        let mut set = search("cat dog cat mouse cat", "cat");
        assert_eq!(set.advance(), Some(0));
        assert_eq!(set.advance(), Some(8));
        assert_eq!(set.advance(), Some(18));
        assert_eq!(set.advance(), Some(0));
    }

    #[test]
    fn test_advance_closure_from_any_cursor() {
        let mut set = search("abababab", "ab");
        let n = set.len();
        for _ in 0..2 {
            set.advance();
        }
        let first = set.advance();
        for _ in 0..n - 1 {
            set.advance();
        }
        assert_eq!(set.advance(), first);
    }

    #[test]
    fn test_unicode_offsets_are_chars() {
        let set = search("Hello 世界 world 世界", "世界");
        assert_eq!(positions(&set), vec![6, 15]);
        assert_eq!(set.span_at(6), Some(6..8));
    }

    #[test]
    fn test_case_folding_changes_length() {
        // 'İ' lower-cases to two chars; offsets still refer to the original
        let content = "İstanbul istanbul";
        let set = search(content, "stanbul");
        assert_eq!(positions(&set), vec![1, 10]);

        let set = search(content, "i\u{307}stanbul");
        assert_eq!(positions(&set), vec![0]);
        assert_eq!(set.span_at(0), Some(0..8));

        // A plain "i" may not match half of the expansion of 'İ'
        let set = search(content, "istanbul");
        assert_eq!(positions(&set), vec![9]);
    }

    #[test]
    fn test_span_at_unknown_position() {
        let set = search("one two", "two");
        assert_eq!(set.span_at(4), Some(4..7));
        assert_eq!(set.span_at(0), None);
    }
}
