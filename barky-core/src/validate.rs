//! Field-level validation shared by the record types.

use crate::error::CoreError;

pub(crate) const BOOKMARK_TITLE_MAX: usize = 255;
pub(crate) const URL_MAX: usize = 200;
pub(crate) const SNIPPET_TITLE_MAX: usize = 100;
pub(crate) const LANGUAGE_MAX: usize = 100;
pub(crate) const USERNAME_MAX: usize = 150;

pub(crate) fn positive_id(field: &'static str, id: i64) -> Result<(), CoreError> {
    if id < 1 {
        return Err(CoreError::invalid(field, format!("must be a positive integer, got {id}")));
    }
    Ok(())
}

pub(crate) fn non_blank(field: &'static str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::invalid(field, "must not be blank"));
    }
    Ok(())
}

pub(crate) fn max_chars(field: &'static str, value: &str, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max {
        return Err(CoreError::invalid(
            field,
            format!("must be at most {max} characters, got {len}"),
        ));
    }
    Ok(())
}

/// Accepts absolute `http` and `https` URLs with a non-empty host.
pub(crate) fn http_url(field: &'static str, value: &str) -> Result<(), CoreError> {
    max_chars(field, value, URL_MAX)?;
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"))
        .ok_or_else(|| CoreError::invalid(field, "must start with http:// or https://"))?;
    if value.chars().any(char::is_whitespace) {
        return Err(CoreError::invalid(field, "must not contain whitespace"));
    }
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    let host = host.split(':').next().unwrap_or_default();
    if host.is_empty() {
        return Err(CoreError::invalid(field, "must include a host"));
    }
    Ok(())
}

pub(crate) fn username(value: &str) -> Result<(), CoreError> {
    if value.is_empty() {
        return Err(CoreError::invalid("username", "must not be empty"));
    }
    max_chars("username", value, USERNAME_MAX)?;
    if let Some(bad) = value
        .chars()
        .find(|c| !(c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')))
    {
        return Err(CoreError::invalid(
            "username",
            format!("may only contain letters, digits and @/./+/-/_, found {bad:?}"),
        ));
    }
    Ok(())
}

pub(crate) fn language(value: &str) -> Result<(), CoreError> {
    non_blank("language", value)?;
    max_chars("language", value, LANGUAGE_MAX)?;
    if let Some(bad) = value.chars().find(|c| {
        !(c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '+' | '-' | '_' | '.'))
    }) {
        return Err(CoreError::invalid(
            "language",
            format!("must be a lowercase language tag, found {bad:?}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_url_accepts_common_forms() {
        for url in [
            "https://awesomedjango.org/",
            "http://localhost:8000/bookmarks/",
            "https://user@example.com/path?q=1#frag",
            "https://example.com",
        ] {
            assert!(http_url("url", url).is_ok(), "{url} should be accepted");
        }
    }

    #[test]
    fn http_url_rejects_bad_values() {
        for url in ["", "ftp://example.com", "https://", "https:///path", "https://exa mple.com"] {
            assert!(http_url("url", url).is_err(), "{url:?} should be rejected");
        }
        let long = format!("https://example.com/{}", "a".repeat(URL_MAX));
        assert!(http_url("url", &long).is_err(), "over-long URL should be rejected");
    }

    #[test]
    fn username_allows_django_style_characters() {
        assert!(username("allie").is_ok());
        assert!(username("eric.smith+test@x_y-z").is_ok());
        assert!(username("").is_err());
        assert!(username("has space").is_err());
        assert!(username(&"u".repeat(USERNAME_MAX + 1)).is_err());
    }

    #[test]
    fn language_requires_lowercase_tag() {
        assert!(language("python").is_ok());
        assert!(language("c++").is_ok());
        assert!(language("Python").is_err());
        assert!(language("  ").is_err());
    }

    #[test]
    fn max_chars_counts_characters_not_bytes() {
        let title = "é".repeat(SNIPPET_TITLE_MAX);
        assert!(max_chars("title", &title, SNIPPET_TITLE_MAX).is_ok());
    }

    #[test]
    fn positive_id_rejects_zero_and_negative() {
        assert!(positive_id("id", 1).is_ok());
        assert!(positive_id("id", 0).is_err());
        assert!(positive_id("id", -4).is_err());
    }
}
