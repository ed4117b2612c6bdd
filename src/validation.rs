//! Input validation for registration credentials

/// Invisible separators and format characters that are not Unicode
/// whitespace but still render as nothing.
const INVISIBLE: [char; 6] = [
    '\u{180E}', // Mongolian vowel separator
    '\u{200B}', // zero-width space
    '\u{200C}', // zero-width non-joiner
    '\u{200D}', // zero-width joiner
    '\u{2060}', // word joiner
    '\u{FEFF}', // zero-width no-break space
];

fn is_forbidden(c: char) -> bool {
    c.is_whitespace() || ('\u{1C}'..='\u{1F}').contains(&c) || INVISIBLE.contains(&c)
}

fn within(s: &str, min: usize, max: usize) -> bool {
    let len = s.chars().count();
    (min..=max).contains(&len) && !s.chars().any(is_forbidden)
}

/// Usernames are 3 to 20 characters with no whitespace or invisible characters.
pub fn validate_username(username: &str) -> bool {
    within(username, 3, 20)
}

/// Passwords are 5 to 50 characters with the same character restrictions.
pub fn validate_password(password: &str) -> bool {
    within(password, 5, 50)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_length_bounds() {
        assert!(!validate_username(""));
        assert!(!validate_username("ab"));
        assert!(validate_username("abc"));
        assert!(validate_username(&"a".repeat(20)));
        assert!(!validate_username(&"a".repeat(21)));
    }

    #[test]
    fn test_username_counts_characters_not_bytes() {
        // Cyrillic letters are two bytes each
        assert!(validate_username("Иван"));
        assert!(validate_username(&"я".repeat(20)));
        assert!(!validate_username(&"я".repeat(21)));
    }

    #[test]
    fn test_username_rejects_whitespace() {
        for name in ["john doe", "john\tdoe", "john\ndoe", "john\u{00A0}doe", "john\u{3000}doe"] {
            assert!(!validate_username(name), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_username_rejects_invisible_characters() {
        for c in INVISIBLE {
            let name = format!("john{}doe", c);
            assert!(!validate_username(&name), "U+{:04X} should be rejected", c as u32);
        }
        assert!(!validate_username("john\u{1F}doe"));
    }

    #[test]
    fn test_username_allows_punctuation_and_unicode() {
        assert!(validate_username("j.o-h_n!"));
        assert!(validate_username("ユーザー"));
    }

    #[test]
    fn test_password_rules() {
        assert!(!validate_password("1234"));
        assert!(validate_password("12345"));
        assert!(validate_password(&"x".repeat(50)));
        assert!(!validate_password(&"x".repeat(51)));
        assert!(!validate_password("pass word"));
        assert!(!validate_password("pass\u{200B}word"));
    }
}
