//! # Fuzzy Alignment
//!
//! Approximate substring matching used to locate catalog entries inside a
//! free-text document.
//!
//! ## Scoring
//!
//! Similarity is the normalized indel ratio on a 0–100 scale:
//!
//! ```text
//! ratio(a, b) = 100 * 2 * LCS(a, b) / (len(a) + len(b))
//! ```
//!
//! where `LCS` is the length of the longest common subsequence. Two identical
//! strings score 100, strings sharing no characters score 0.
//!
//! ## Partial alignment
//!
//! The needle is slid across the haystack. Every window of the needle's
//! length is scored, as are the shorter partial windows hanging off either
//! edge of the haystack. The first best-scoring window wins and the scan stops
//! as soon as a perfect score is seen.
//!
//! Both strings are normalized first: lowercased, with every non-alphanumeric
//! character replaced by a space. Normalization is char-for-char, so offsets
//! in the normalized haystack are valid char offsets into the original text.

/// Best-scoring window of a partial alignment, as char offsets into the haystack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    /// Similarity score in 0.0..=100.0
    pub score: f64,
    /// First char of the window
    pub start: usize,
    /// One past the last char of the window
    pub end: usize,
}

/// Lowercase and blank out punctuation without changing the char count
pub fn normalize(text: &str) -> Vec<char> {
    text.chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_lowercase().next().unwrap_or(c)
            } else {
                ' '
            }
        })
        .collect()
}

/// [`normalize`], then strip leading and trailing whitespace
pub fn normalize_trimmed(text: &str) -> Vec<char> {
    let chars = normalize(text);
    let start = chars.iter().position(|c| *c != ' ').unwrap_or(chars.len());
    let end = chars
        .iter()
        .rposition(|c| *c != ' ')
        .map_or(start, |i| i + 1);
    chars[start..end].to_vec()
}

/// Length of the longest common subsequence of two char slices
fn lcs_length(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut previous = vec![0usize; b.len() + 1];
    let mut current = vec![0usize; b.len() + 1];

    for ca in a {
        for (j, cb) in b.iter().enumerate() {
            current[j + 1] = if ca == cb {
                previous[j] + 1
            } else {
                previous[j + 1].max(current[j])
            };
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

/// Normalized indel similarity of two already-normalized strings (0–100)
pub fn indel_ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 100.0;
    }
    // Multiply before dividing so exact ratios such as 90 stay exact.
    100.0 * (2 * lcs_length(a, b)) as f64 / total as f64
}

/// Similarity of two raw strings after normalization
pub fn ratio(a: &str, b: &str) -> f64 {
    indel_ratio(&normalize_trimmed(a), &normalize_trimmed(b))
}

/// Find the window of `haystack` most similar to `needle`
///
/// Returns `None` when the best score falls below `score_cutoff`.
pub fn partial_ratio_alignment(needle: &str, haystack: &str, score_cutoff: f64) -> Option<Alignment> {
    align_normalized(&normalize_trimmed(needle), &normalize(haystack), score_cutoff)
}

/// [`partial_ratio_alignment`] over inputs that are already normalized
///
/// Lets a caller normalize a document once and align many needles against it.
pub fn align_normalized(needle: &[char], haystack: &[char], score_cutoff: f64) -> Option<Alignment> {
    if needle.is_empty() || haystack.is_empty() {
        return None;
    }

    let m = needle.len();
    let n = haystack.len();

    if m >= n {
        let score = indel_ratio(needle, haystack);
        return (score >= score_cutoff).then_some(Alignment {
            score,
            start: 0,
            end: n,
        });
    }

    let mut best = Alignment {
        score: -1.0,
        start: 0,
        end: 0,
    };

    // Partial windows on the left edge, full-length windows, then partial
    // windows on the right edge, in increasing start order.
    let windows = (1..m)
        .map(|len| (0, len))
        .chain((0..=n - m).map(|start| (start, start + m)))
        .chain((1..m).rev().map(|len| (n - len, n)));

    for (start, end) in windows {
        let score = indel_ratio(needle, &haystack[start..end]);
        if score > best.score {
            best = Alignment { score, start, end };
            if score >= 100.0 {
                break;
            }
        }
    }

    (best.score >= score_cutoff).then_some(best)
}
