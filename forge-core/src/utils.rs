//! Shared string utilities.

/// Name used when a label sanitizes to nothing.
const EMPTY_NAME: &str = "service";

/// Convert a display label into a directory and compose-key safe slug.
///
/// Lowercases ASCII letters, maps every character outside `[a-z0-9-]` to `-`,
/// collapses runs of `-` and trims them from both ends
/// (e.g., "My Cool App!" -> "my-cool-app").
pub fn sanitize_name(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = c.to_ascii_lowercase();
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() {
            c
        } else {
            '-'
        };
        if c == '-' && (out.is_empty() || out.ends_with('-')) {
            continue;
        }
        out.push(c);
    }
    while out.ends_with('-') {
        out.pop();
    }

    if out.is_empty() {
        EMPTY_NAME.to_string()
    } else {
        out
    }
}

/// Check whether `s` already has the shape produced by [`sanitize_name`].
pub fn is_sanitized(s: &str) -> bool {
    !s.is_empty()
        && s.split('-').all(|part| {
            !part.is_empty()
                && part
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}
