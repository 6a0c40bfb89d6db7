//! String sanitization helpers for noisy extracted contact fields
//!
//! Extraction output often decorates emails and phone numbers with emoji,
//! icons or labels. These helpers are pure and shared by scoring and by
//! callers that persist records.

use regex::Regex;
use std::sync::OnceLock;

/// Bare address around the first `@`: alphanumerics and `._-` on the left,
/// the same plus further `@` on the right.
fn email_span_regex() -> &'static Regex {
    static EMAIL_SPAN: OnceLock<Regex> = OnceLock::new();
    EMAIL_SPAN.get_or_init(|| {
        Regex::new(r"[\p{Alphabetic}\p{N}._-]*@[\p{Alphabetic}\p{N}@._-]*")
            .expect("Invalid email regex")
    })
}

fn digit_regex() -> &'static Regex {
    static DIGIT: OnceLock<Regex> = OnceLock::new();
    DIGIT.get_or_init(|| Regex::new(r"\p{Nd}").expect("Invalid digit regex"))
}

/// Remove every character outside the ASCII range.
pub fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii()).collect()
}

/// ASCII-only, trimmed form of an email field.
pub fn clean_email(raw: &str) -> String {
    strip_non_ascii(raw).trim().to_string()
}

/// Basic email shape check on an already cleaned string: an `@` whose
/// following segment (up to any further `@`) contains a `.`.
pub fn has_email_shape(email: &str) -> bool {
    let mut segments = email.split('@');
    segments.next();
    segments.next().is_some_and(|domain| domain.contains('.'))
}

/// All decimal digits of `text`, in order. Any script counts, so
/// full-width `５` is a digit just like `5`.
pub fn digits(text: &str) -> String {
    digit_regex().find_iter(text).map(|m| m.as_str()).collect()
}

/// Value of a decimal digit in any script.
pub fn decimal_value(c: char) -> Option<u32> {
    if let Some(value) = c.to_digit(10) {
        return Some(value);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    // Decimal digits are encoded in ascending runs of ten starting at zero
    let code = u32::from(c);
    let mut zero = code;
    while let Some(prev) = zero.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        zero -= 1;
    }
    Some((code - zero) % 10)
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    digit_regex().is_match(c.encode_utf8(&mut buf))
}

/// Pull the bare address out of a decorated email field.
///
/// The match is anchored on the first `@`. Returns `None` when there is no
/// `@` at all.
pub fn extract_email_address(raw: &str) -> Option<String> {
    email_span_regex().find(raw).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_ascii_removes_emoji() {
        assert_eq!(strip_non_ascii("📧 jane@example.com ✉"), " jane@example.com ");
        assert_eq!(strip_non_ascii("plain"), "plain");
        assert_eq!(strip_non_ascii("ünïcødé"), "ncd");
    }

    #[test]
    fn test_clean_email_trims() {
        assert_eq!(clean_email("  📧jane.doe@example.com 🙂 "), "jane.doe@example.com");
        assert_eq!(clean_email("🙂"), "");
    }

    #[test]
    fn test_email_shape() {
        assert!(has_email_shape("jane.doe@example.com"));
        assert!(has_email_shape("j@x.y"));
        assert!(!has_email_shape("jane.doe@example"));
        assert!(!has_email_shape("jane.doe.example.com"));
        assert!(!has_email_shape(""));
        // Only the segment right after the first '@' is inspected
        assert!(!has_email_shape("a@b@c.com"));
    }

    #[test]
    fn test_digits() {
        assert_eq!(digits("(555) 123-4567"), "5551234567");
        assert_eq!(digits("+91 98765 43210"), "919876543210");
        assert_eq!(digits("no digits"), "");
        assert_eq!(digits("５５５－１２３"), "５５５１２３");
        assert_eq!(digits("٣ years"), "٣");
    }

    #[test]
    fn test_decimal_value() {
        assert_eq!(decimal_value('7'), Some(7));
        assert_eq!(decimal_value('０'), Some(0));
        assert_eq!(decimal_value('９'), Some(9));
        assert_eq!(decimal_value('٣'), Some(3));
        assert_eq!(decimal_value('𝟗'), Some(9));
        assert_eq!(decimal_value('²'), None);
        assert_eq!(decimal_value('x'), None);
    }

    #[test]
    fn test_extract_email_address() {
        assert_eq!(
            extract_email_address("📧 john.doe@example.com 📱"),
            Some("john.doe@example.com".to_string())
        );
        assert_eq!(
            extract_email_address("Email: a_b-c@mail.co.uk, phone"),
            Some("a_b-c@mail.co.uk".to_string())
        );
        assert_eq!(extract_email_address("no address here"), None);
        assert_eq!(extract_email_address("@"), Some("@".to_string()));
        assert_eq!(
            extract_email_address("x y.z@@a.com!"),
            Some("y.z@@a.com".to_string())
        );
        assert_eq!(
            extract_email_address("ab @c d@e.com"),
            Some("@c".to_string())
        );
    }
}
