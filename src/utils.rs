use itertools::Itertools;

/// Reduces a title to its comparison key: ASCII letters and digits only,
/// lowercased, in their original order.
///
/// # Examples
///
/// ```
/// use bibdedup::normalize_title;
///
/// assert_eq!(normalize_title("A Study: Of Things!"), "astudyofthings");
/// assert_eq!(normalize_title(""), "");
/// ```
pub fn normalize_title(title: &str) -> String {
    title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Trims and lowercases a DOI, returning `None` when nothing is left.
pub(crate) fn normalize_doi(doi: &str) -> Option<String> {
    non_blank(doi).map(|doi| doi.to_lowercase())
}

/// Trims a value, returning `None` when nothing is left.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Returns the four-digit year a field value starts with, if any.
pub(crate) fn leading_year(value: &str) -> Option<String> {
    let year = value.trim_start().get(..4)?;
    year.chars()
        .all(|c| c.is_ascii_digit())
        .then(|| year.to_string())
}

/// Joins a value wrapped over several lines into one line, separating the
/// trimmed pieces with single spaces.
pub(crate) fn join_wrapped(value: &str) -> String {
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("A Study: Of Things!", "astudyofthings")]
    #[case("a study of things", "astudyofthings")]
    #[case("COVID-19 in 2020", "covid19in2020")]
    #[case("Café au lait", "cafaulait")]
    #[case("!!!", "")]
    #[case("", "")]
    fn test_normalize_title(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_title(input), expected);
    }

    #[rstest]
    #[case("10.1000/TEST", Some("10.1000/test"))]
    #[case("  10.1000/Test  ", Some("10.1000/test"))]
    #[case("   ", None)]
    #[case("", None)]
    fn test_normalize_doi(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(normalize_doi(input).as_deref(), expected);
    }

    #[rstest]
    #[case("2019 Dec", Some("2019"))]
    #[case("2023/12/25/Christmas edition", Some("2023"))]
    #[case("  2020", Some("2020"))]
    #[case("202", None)]
    #[case("Dec 2019", None)]
    #[case("", None)]
    fn test_leading_year(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(leading_year(input).as_deref(), expected);
    }

    #[rstest]
    #[case("one line", "one line")]
    #[case("Fantastic yeasts and\n      where to find them", "Fantastic yeasts and where to find them")]
    #[case("  padded \r\n\n  value ", "padded value")]
    fn test_join_wrapped(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(join_wrapped(input), expected);
    }
}
