//! Text helpers for generated filenames.

/// Sanitize a filename component, retaining only word characters,
/// hyphens and underscores.
///
/// # Example
/// ```ignore
/// assert_eq!(sanitize_component("Helvetica Neue"), "HelveticaNeue");
/// ```
pub fn sanitize_component(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-'))
        .collect()
}
