/// Where a marker line sits relative to the entry it delimits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Boundary {
    /// The marker line is the first line of an entry (`PMID- ...`).
    Opens,
    /// The marker line is the last line of an entry (`ER  -`).
    Closes,
}

/// An [Iterator] which splits text into chunks at marker lines.
///
/// [Iterator::next] returns consecutive chunks covering the whole input, along
/// with their starting line number. With [Boundary::Opens], text before the first
/// marker comes out as its own chunk; with [Boundary::Closes], text after the last
/// marker does. Callers decide whether such chunks are entries.
pub(crate) struct MarkerSplit<'a, F> {
    line_number: usize,
    text: &'a str,
    boundary: Boundary,
    is_marker: F,
}

impl<'a, F: Fn(&str) -> bool> MarkerSplit<'a, F> {
    pub(crate) fn new(text: &'a str, boundary: Boundary, is_marker: F) -> Self {
        Self {
            line_number: 1,
            text,
            boundary,
            is_marker,
        }
    }
}

impl<'a, F: Fn(&str) -> bool> Iterator for MarkerSplit<'a, F> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let mut i = 0;
        let mut lines = 0;
        for line in self.text.split_inclusive('\n') {
            let is_marker = (self.is_marker)(line.trim_end_matches(['\n', '\r']));
            if self.boundary == Boundary::Opens && is_marker && i > 0 {
                break;
            }
            lines += 1;
            i += line.len();
            if self.boundary == Boundary::Closes && is_marker {
                break;
            }
        }
        if i == 0 {
            None
        } else {
            let (part, rest) = self.text.split_at(i);
            let line_number = self.line_number;
            self.text = rest;
            self.line_number += lines;
            Some((line_number, part))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn opens(line: &str) -> bool {
        line.starts_with("ID")
    }

    fn closes(line: &str) -> bool {
        line == "END"
    }

    #[rstest]
    #[case("", &[])]
    #[case("ID 1\n", &[(1, "ID 1\n")])]
    #[case("ID 1\na\nID 2\nb", &[(1, "ID 1\na\n"), (3, "ID 2\nb")])]
    #[case("header\n\nID 1\na\n", &[(1, "header\n\n"), (3, "ID 1\na\n")])]
    #[case("ID 1\n\n\nID 2\n\n", &[(1, "ID 1\n\n\n"), (4, "ID 2\n\n")])]
    #[case("ID 1\r\nID 2\r\n", &[(1, "ID 1\r\n"), (2, "ID 2\r\n")])]
    fn test_split_on_opening_marker(#[case] text: &str, #[case] expected: &[(usize, &str)]) {
        let actual = MarkerSplit::new(text, Boundary::Opens, opens).collect_vec();
        assert_eq!(&actual, expected)
    }

    #[rstest]
    #[case("", &[])]
    #[case("a\nEND\n", &[(1, "a\nEND\n")])]
    #[case("a\nEND\nb\nEND", &[(1, "a\nEND\n"), (3, "b\nEND")])]
    #[case("a\nEND\n\nb\n", &[(1, "a\nEND\n"), (3, "\nb\n")])]
    #[case("a\nEND\n\n\n", &[(1, "a\nEND\n"), (3, "\n\n")])]
    #[case("a\r\nEND\r\nb", &[(1, "a\r\nEND\r\n"), (3, "b")])]
    fn test_split_on_closing_marker(#[case] text: &str, #[case] expected: &[(usize, &str)]) {
        let actual = MarkerSplit::new(text, Boundary::Closes, closes).collect_vec();
        assert_eq!(&actual, expected)
    }
}
