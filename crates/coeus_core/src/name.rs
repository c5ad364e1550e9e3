/// Longest display name the backend is sent, in characters.
pub const MAX_NAME_LEN: usize = 24;

/// Shortest normalized display name that may be registered.
pub const MIN_NAME_LEN: usize = 2;

/// Collapses whitespace runs to a single space, trims both ends and clamps
/// the result to [`MAX_NAME_LEN`] characters.
///
/// Idempotent: normalizing an already normalized name returns it unchanged.
pub fn normalize_display_name(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let clamped: String = collapsed.chars().take(MAX_NAME_LEN).collect();
    // Truncation can land right after a space.
    clamped.trim_end().to_string()
}
