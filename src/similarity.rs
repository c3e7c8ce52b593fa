//! Title similarity scoring.
//!
//! The ratio is `2 * M / T`, where `M` is the length of the longest common
//! subsequence of the two lowercased strings and `T` their combined length.
//! Pairs whose lengths differ too much are scored 0 without running the
//! quadratic comparison.
//!
//! A longest common subsequence may pick characters from several reordered
//! blocks, so reordered titles can score above a matching-blocks ratio such as
//! Python's `difflib`: `"exercise and diet"` against `"diet and exercise"` scores
//! 18/34 ≈ 0.529 here and 16/34 ≈ 0.471 there. Both stay far below the duplicate
//! thresholds.

/// Length difference, as a fraction of the longer title, above which two titles
/// score 0.
pub const DEFAULT_LENGTH_GATE: f64 = 0.2;

/// Similarity ratio in `[0, 1]` between two raw titles, compared
/// case-insensitively, using [`DEFAULT_LENGTH_GATE`].
///
/// # Examples
///
/// ```
/// use bibdedup::similarity::title_similarity;
///
/// assert_eq!(title_similarity("Deep Learning", "deep learning"), 1.0);
/// assert_eq!(title_similarity("", "deep learning"), 0.0);
/// // differs in length by more than 20% of the longer title
/// assert_eq!(title_similarity("Deep", "Deep learning"), 0.0);
/// ```
pub fn title_similarity(a: &str, b: &str) -> f64 {
    gated_similarity(a, b, DEFAULT_LENGTH_GATE)
}

/// Like [`title_similarity`], with a custom length gate.
pub fn gated_similarity(a: &str, b: &str, length_gate: f64) -> f64 {
    let a: Vec<char> = a.chars().flat_map(char::to_lowercase).collect();
    let b: Vec<char> = b.chars().flat_map(char::to_lowercase).collect();
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let longer = a.len().max(b.len());
    if a.len().abs_diff(b.len()) as f64 > longer as f64 * length_gate {
        return 0.0;
    }

    let matches = lcs_length(&a, &b);
    2.0 * matches as f64 / (a.len() + b.len()) as f64
}

/// LCS length using two-row DP.
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("abc", "abc", 3)]
    #[case("abcd", "acbd", 3)]
    #[case("abc", "xyz", 0)]
    #[case("kitten", "sitting", 4)]
    fn test_lcs_length(#[case] a: &str, #[case] b: &str, #[case] expected: usize) {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        assert_eq!(lcs_length(&a, &b), expected);
    }

    #[test]
    fn test_identical_titles_score_one() {
        assert_eq!(
            title_similarity("Machine Learning Basics", "MACHINE LEARNING BASICS"),
            1.0
        );
    }

    #[test]
    fn test_empty_titles_score_zero() {
        assert_eq!(title_similarity("", ""), 0.0);
        assert_eq!(title_similarity("title", ""), 0.0);
    }

    #[test]
    fn test_length_gate() {
        // 10 vs 13 chars: difference 3 > 13 * 0.2 = 2.6
        assert_eq!(title_similarity("abcdefghij", "abcdefghijklm"), 0.0);
        // 10 vs 12 chars: difference 2 <= 2.4, ratio is computed
        let score = title_similarity("abcdefghij", "abcdefghijkl");
        assert!((score - 20.0 / 22.0).abs() < 1e-9);
    }

    #[test]
    fn test_length_gate_ignores_content_overlap() {
        let short = "Effects of exercise on mood";
        let long = "Effects of exercise on mood: a randomized controlled trial in adults";
        assert_eq!(title_similarity(short, long), 0.0);
    }

    #[test]
    fn test_custom_gate() {
        assert!(gated_similarity("abcdefghij", "abcdefghijklm", 0.5) > 0.8);
    }

    #[test]
    fn test_score_is_bounded() {
        let score = title_similarity("Treatment of asthma in children", "Treatment of eczema in children");
        assert!(score > 0.0 && score < 1.0);
    }

    #[test]
    fn test_reordered_titles_score_by_subsequence() {
        let score = title_similarity("exercise and diet", "diet and exercise");
        assert!((score - 18.0 / 34.0).abs() < 1e-9);
    }
}
