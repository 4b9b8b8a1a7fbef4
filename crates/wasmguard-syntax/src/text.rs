//! Line-oriented text helpers used by the injector.

use std::borrow::Cow;

/// Returns the leading run of spaces and tabs in `line`.
#[must_use]
pub fn leading_indent(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .position(|byte| !matches!(byte, b' ' | b'\t'))
        .unwrap_or(line.len());
    line.split_at(end).0
}

/// Returns whether `needle` occurs anywhere in `haystack`.
pub(crate) fn contains_bytes(haystack: &[u8], needle: &[u8]) -> bool {
    needle.is_empty() || haystack.windows(needle.len()).any(|window| window == needle)
}

/// An ordered, growable sequence of lines.
///
/// Splitting on `\n` and joining with `\n` is lossless: a trailing newline
/// yields a final empty line and `\r` stays attached to its line. Original
/// lines are borrowed; inserted lines are owned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineBuffer<'a> {
    lines: Vec<Cow<'a, [u8]>>,
}

impl<'a> LineBuffer<'a> {
    /// Splits `source` into lines.
    #[must_use]
    pub fn split(source: &'a [u8]) -> Self {
        Self {
            lines: source.split(|byte| *byte == b'\n').map(Cow::Borrowed).collect(),
        }
    }

    /// Number of lines, counting a final empty line after a trailing newline.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns whether the buffer holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Returns the line at a zero-based `index`.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<&[u8]> {
        self.lines.get(index).map(AsRef::as_ref)
    }

    /// Inserts `line` at `index`, shifting the line there and all later lines
    /// down by one.
    ///
    /// Returns `false` and leaves the buffer untouched when `index` is past
    /// the end.
    #[must_use]
    pub fn insert(&mut self, index: usize, line: Vec<u8>) -> bool {
        if index > self.lines.len() {
            return false;
        }
        self.lines.insert(index, Cow::Owned(line));
        true
    }

    /// Joins the lines back together with `\n`.
    #[must_use]
    pub fn join(&self) -> Vec<u8> {
        self.lines.join(&b'\n')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(b"\t\tr1, _, err := Syscall(1)", b"\t\t")]
    #[case(b"    x := 1", b"    ")]
    #[case(b" \t mixed", b" \t ")]
    #[case(b"no indent", b"")]
    #[case(b"", b"")]
    #[case(b"\t\t", b"\t\t")]
    fn extracts_leading_indent(#[case] line: &[u8], #[case] expected: &[u8]) {
        assert_eq!(leading_indent(line), expected);
    }

    #[test]
    fn split_then_join_is_lossless() {
        let source = b"package main\r\n\nfunc main() {}\n";
        let buffer = LineBuffer::split(source);

        assert_eq!(buffer.len(), 4);
        assert_eq!(buffer.line(0), Some(&b"package main\r"[..]));
        assert_eq!(buffer.join(), source);
    }

    #[test]
    fn insert_shifts_following_lines() {
        let mut buffer = LineBuffer::split(b"a\nb\nc");

        assert!(buffer.insert(1, b"new".to_vec()));
        assert_eq!(buffer.join(), b"a\nnew\nb\nc");
        assert_eq!(buffer.line(2), Some(&b"b"[..]));
    }

    #[test]
    fn insert_at_end_appends() {
        let mut buffer = LineBuffer::split(b"a");

        assert!(buffer.insert(1, b"b".to_vec()));
        assert_eq!(buffer.join(), b"a\nb");
    }

    #[test]
    fn insert_past_end_is_rejected() {
        let mut buffer = LineBuffer::split(b"a\nb");

        assert!(!buffer.insert(5, b"x".to_vec()));
        assert_eq!(buffer.join(), b"a\nb");
    }

    #[rstest]
    #[case(b"abc", b"b", true)]
    #[case(b"abc", b"abcd", false)]
    #[case(b"abc", b"", true)]
    #[case(b"", b"a", false)]
    fn finds_substrings(#[case] haystack: &[u8], #[case] needle: &[u8], #[case] expected: bool) {
        assert_eq!(contains_bytes(haystack, needle), expected);
    }
}
