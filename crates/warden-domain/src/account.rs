//! Account naming rules.

/// Characters allowed in a username besides ASCII letters and digits.
pub const USERNAME_EXTRA_CHARS: &str = "-._@+";

/// Split a provider display name into `(first, last)`.
///
/// The first whitespace-separated token is the first name; the last token is
/// the last name when there are at least two tokens. Middle tokens are dropped.
pub fn split_display_name(display_name: &str) -> (String, String) {
    let parts: Vec<&str> = display_name.split_whitespace().collect();
    let first = parts.first().copied().unwrap_or_default().to_owned();
    let last = if parts.len() > 1 {
        parts[parts.len() - 1].to_owned()
    } else {
        String::new()
    };
    (first, last)
}

/// Returns true if `username` is non-empty and uses only allowed characters.
/// Email addresses are valid usernames.
pub fn validate_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || USERNAME_EXTRA_CHARS.contains(c))
}

/// Lookup key for usernames and emails: comparisons are case-insensitive.
pub fn normalize_key(value: &str) -> String {
    value.to_uppercase()
}

/// Name to greet an account with: the first name, or the username when the
/// first name is blank.
pub fn greeting_name<'a>(first_name: &'a str, username: &'a str) -> &'a str {
    if first_name.trim().is_empty() {
        username
    } else {
        first_name
    }
}
