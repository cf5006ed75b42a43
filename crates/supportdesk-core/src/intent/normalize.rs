//! Text normalization shared by the heuristic and the response matcher.

/// Collapses every whitespace run to a single space, trims both ends and
/// lower-cases the result.
///
/// Idempotent: `normalize(&normalize(s)) == normalize(s)`.
pub fn normalize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for word in s.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out.to_lowercase()
}

/// Number of whitespace-separated tokens.
pub fn token_count(s: &str) -> usize {
    s.split_whitespace().count()
}
