/// Decodes an authorization code pasted from a redirect URL.
///
/// Codes copied out of the browser's address bar are percent-encoded (`v%5E1.1%23...`). Input
/// without any `%` escape is returned unchanged, so a raw code containing `+` survives.
///
/// # Arguments
/// - `code` - Code as pasted by the user
///
/// # Returns
/// - `String` - Decoded code, trimmed
pub fn decode_pasted_code(code: &str) -> String {
    let code = code.trim();
    if !code.contains('%') {
        return code.to_string();
    }

    url::form_urlencoded::parse(format!("code={}", code).as_bytes())
        .find(|(key, _)| key == "code")
        .map(|(_, value)| value.into_owned())
        .unwrap_or_else(|| code.to_string())
}

/// Truncates `value` to at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate_chars(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('…');
    truncated
}
