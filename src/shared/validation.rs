use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for URL slugs (category slugs)
    /// Must be lowercase alphanumeric words joined by single hyphens
    /// - Valid: "mountain-bikes", "e-bike", "city2"
    /// - Invalid: "-bikes", "bikes-", "road--bikes", "Road", "road_bikes"
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").unwrap();

    /// Regex for validating username fields
    /// Must start with letter or underscore and contain only alphanumeric characters and underscores
    /// - Valid: "john_doe", "user123", "_admin", "JohnDoe"
    /// - Invalid: "123user", "-user", "user-name", "user name"
    pub static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();

    /// Loose phone number check: digits with optional leading +, spaces, dashes, parentheses
    pub static ref PHONE_REGEX: Regex = Regex::new(r"^\+?[0-9(][0-9 ()\-]{3,18}$").unwrap();
}

/// Derive a URL slug from a display name.
///
/// ASCII letters and digits are kept (lowercased). Whitespace, hyphens and
/// underscores separate words; other characters are dropped, so "Kid's Bikes"
/// becomes "kids-bikes". The result matches [`SLUG_REGEX`] unless empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_separator = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_separator = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("mountain-bikes"));
        assert!(SLUG_REGEX.is_match("city2"));
        assert!(SLUG_REGEX.is_match("e-bike"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("-bikes")); // starts with hyphen
        assert!(!SLUG_REGEX.is_match("bikes-")); // ends with hyphen
        assert!(!SLUG_REGEX.is_match("road--bikes")); // double hyphen
        assert!(!SLUG_REGEX.is_match("Road")); // uppercase
        assert!(!SLUG_REGEX.is_match("road_bikes")); // underscore
        assert!(!SLUG_REGEX.is_match("")); // empty
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Mountain Bikes"), "mountain-bikes");
        assert_eq!(slugify("  Road   & Gravel  "), "road-gravel");
        assert_eq!(slugify("Kid's Bikes"), "kids-bikes");
        assert_eq!(slugify("E-Bike__Pro"), "e-bike-pro");
        assert_eq!(slugify("City 2000"), "city-2000");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_output_is_valid_slug() {
        for name in ["Tandem", "BMX / Dirt", "  Cargo-Bikes ", "Fat_Tyre 26\""] {
            let slug = slugify(name);
            assert!(SLUG_REGEX.is_match(&slug), "{:?} -> {:?}", name, slug);
        }
    }

    #[test]
    fn test_username_regex() {
        assert!(USERNAME_REGEX.is_match("john_doe"));
        assert!(USERNAME_REGEX.is_match("_rider"));
        assert!(!USERNAME_REGEX.is_match("1rider"));
        assert!(!USERNAME_REGEX.is_match("rider name"));
    }

    #[test]
    fn test_phone_regex() {
        assert!(PHONE_REGEX.is_match("+62 812-3456-789"));
        assert!(PHONE_REGEX.is_match("(021) 555 1234"));
        assert!(!PHONE_REGEX.is_match("call me"));
        assert!(!PHONE_REGEX.is_match("12"));
    }
}
