//! Shared utility functions used across multiple modules.

/// Normalize optional text by trimming whitespace and removing empties.
///
/// Returns `None` when the input is `None` or the trimmed value is empty.
pub fn normalize_text_option(value: Option<String>) -> Option<String> {
    let value = value?;
    let value = value.trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Check if a string starts with `http://` or `https://`.
pub fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// Validate a service base URL and strip trailing slashes.
pub fn normalize_base_url(raw: &str) -> Result<String, String> {
    let value = normalize_text_option(Some(raw.to_string()))
        .ok_or_else(|| "API base URL must not be empty".to_string())?;
    if !is_http_url(&value) {
        return Err(format!(
            "API base URL must include http:// or https://, got '{value}'"
        ));
    }
    Ok(value.trim_end_matches('/').to_string())
}

/// Truncate text to at most 180 characters for error messages.
pub fn compact_text(value: &str) -> String {
    value.trim().chars().take(180).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_text_option_rejects_blank() {
        assert_eq!(normalize_text_option(None), None);
        assert_eq!(normalize_text_option(Some(" \t ".to_string())), None);
        assert_eq!(
            normalize_text_option(Some(" beach ".to_string())),
            Some("beach".to_string())
        );
    }

    #[test]
    fn normalize_base_url_trims_trailing_slash() {
        assert_eq!(
            normalize_base_url(" https://diary.example.com/ ").unwrap(),
            "https://diary.example.com"
        );
        assert_eq!(
            normalize_base_url("http://10.0.2.2:8080").unwrap(),
            "http://10.0.2.2:8080"
        );
    }

    #[test]
    fn normalize_base_url_requires_scheme() {
        assert!(normalize_base_url("").is_err());
        assert!(normalize_base_url("diary.example.com").is_err());
        assert!(normalize_base_url("ftp://diary.example.com").is_err());
    }

    #[test]
    fn compact_text_limits_length() {
        let long = "x".repeat(400);
        assert_eq!(compact_text(&long).len(), 180);
        assert_eq!(compact_text("  short body \n"), "short body");
    }
}
