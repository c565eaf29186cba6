//! Pluralization for log lines.

/// Return "s" suffix for plural counts
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

/// Format count with noun, handling pluralization
///
/// # Examples
///
/// - `plural_count(0, "page")` -> `"0 pages"`
/// - `plural_count(1, "page")` -> `"1 page"`
/// - `plural_count(3, "class")` -> `"3 classes"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = match plural_s(count) {
        "s" if noun.ends_with('s') => "es",
        s => s,
    };
    format!("{count} {noun}{suffix}")
}
