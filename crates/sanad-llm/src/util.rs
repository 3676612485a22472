//! Common utilities for LLM providers

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
///
/// # Examples
/// ```
/// use sanad_llm::util::mask_api_key;
/// assert_eq!(mask_api_key("AIza1234567890abcdef"), "AIza...cdef");
/// assert_eq!(mask_api_key("short"), "****");
/// ```
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY {
        return "****".to_string();
    }
    let head: String = chars[..KEY_MASK_VISIBLE_CHARS].iter().collect();
    let tail: String = chars[chars.len() - KEY_MASK_VISIBLE_CHARS..].iter().collect();
    format!("{head}...{tail}")
}

/// Truncate a string to at most `max_bytes` without splitting a UTF-8 char
#[must_use]
pub fn truncate_safe(text: &str, max_bytes: usize) -> &str {
    if text.len() <= max_bytes {
        return text;
    }
    let mut end = max_bytes;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_api_key_long() {
        let masked = mask_api_key("AIza1234567890abcdefghij");
        assert_eq!(masked, "AIza...ghij");
        assert!(!masked.contains("567890"));
    }

    #[test]
    fn test_mask_api_key_short() {
        assert_eq!(mask_api_key("short"), "****");
        assert_eq!(mask_api_key("12345678"), "****");
        assert_eq!(mask_api_key(""), "****");
    }

    #[test]
    fn test_truncate_safe_respects_char_boundary() {
        // each Arabic letter is 2 bytes in UTF-8
        let text = "مرحبا";
        assert_eq!(truncate_safe(text, 3), "م");
        assert_eq!(truncate_safe(text, 100), text);
    }
}
