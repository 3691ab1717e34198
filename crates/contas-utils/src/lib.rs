//! Utility functions and helpers

use std::time::{SystemTime, UNIX_EPOCH};

/// Insert a separator every three digits of an unsigned integer string
pub fn group_thousands(digits: &str, separator: &str) -> String {
    if separator.is_empty() {
        return digits.to_string();
    }
    let mut result = String::new();
    let mut count = 0;
    for c in digits.chars().rev() {
        if count == 3 {
            result.push_str(&separator.chars().rev().collect::<String>());
            count = 0;
        }
        result.push(c);
        count += 1;
    }
    result.chars().rev().collect()
}

/// Escape user-provided text for inclusion in HTML
pub fn escape_html(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    for c in content.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Generate a millisecond-timestamp identifier
pub fn generate_id() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    format!("{}", now)
}

/// Generate an identifier that is not already taken
///
/// Starts from the current timestamp and counts upward past any collision.
pub fn generate_unique_id<F>(taken: F) -> String
where
    F: Fn(&str) -> bool,
{
    let base = generate_id();
    if !taken(&base) {
        return base;
    }
    let start: u128 = base.parse().unwrap_or_default();
    let mut candidate = start + 1;
    loop {
        let id = candidate.to_string();
        if !taken(&id) {
            return id;
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1234567", ","), "1,234,567");
        assert_eq!(group_thousands("123", "."), "123");
        assert_eq!(group_thousands("1234", ""), "1234");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>\"a\" & 'b'</script>"),
            "&lt;script&gt;&quot;a&quot; &amp; &#39;b&#39;&lt;/script&gt;"
        );
        assert_eq!(escape_html("Energia elétrica"), "Energia elétrica");
    }

    #[test]
    fn test_generate_unique_id_skips_taken() {
        let first = generate_unique_id(|_| false);
        let taken = first.clone();
        let second = generate_unique_id(|id| id <= taken.as_str() && id.len() == taken.len());
        assert_ne!(first, second);
        assert!(second.parse::<u128>().unwrap() > first.parse::<u128>().unwrap());
    }
}
