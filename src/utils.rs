//! Utility functions for path and URL handling

use crate::error::{Error, Result};

/// Characters replaced when sanitizing a namespace into a folder name
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Longest extension considered plausible when derived from a URL
const MAX_EXTENSION_LEN: usize = 5;

/// Sanitize a user-chosen namespace into a filesystem-safe folder name.
///
/// Path separators, shell-hostile characters, and control characters are
/// replaced with underscores; surrounding whitespace is trimmed. Names that
/// sanitize to nothing usable (empty, `.`, `..`) are rejected.
///
/// # Examples
///
/// ```
/// use stock_dl::utils::sanitize_namespace;
///
/// assert_eq!(sanitize_namespace("cats").unwrap(), "cats");
/// assert_eq!(sanitize_namespace("a/b:c").unwrap(), "a_b_c");
/// assert!(sanitize_namespace("  ").is_err());
/// ```
pub fn sanitize_namespace(raw: &str) -> Result<String> {
    let sanitized: String = raw
        .trim()
        .chars()
        .map(|c| {
            if FORBIDDEN.contains(&c) || c.is_control() {
                '_'
            } else {
                c
            }
        })
        .collect();

    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        return Err(Error::validation(format!(
            "namespace {:?} does not sanitize to a usable folder name",
            raw
        )));
    }

    Ok(sanitized)
}

/// Derive a file extension from a URL's path, ignoring any query string.
///
/// Returns `None` when the path's last segment has no plausible extension;
/// callers then persist the file without one, matching the upstream naming.
///
/// # Examples
///
/// ```
/// use stock_dl::utils::extension_from_url;
///
/// assert_eq!(
///     extension_from_url("https://example.com/photos/cat.JPG?w=300"),
///     Some("jpg".to_string())
/// );
/// assert_eq!(extension_from_url("https://example.com/photos/cat"), None);
/// ```
pub fn extension_from_url(url: &str) -> Option<String> {
    let path = match url::Url::parse(url) {
        // Url::path() never includes the query string or fragment
        Ok(parsed) => parsed.path().to_string(),
        // Relative or otherwise unparseable: strip query/fragment by hand
        Err(_) => {
            let end = url.find(['?', '#']).unwrap_or(url.len());
            url[..end].to_string()
        }
    };

    let last_segment = path.rsplit('/').next()?;
    let (_, ext) = last_segment.rsplit_once('.')?;

    if ext.is_empty()
        || ext.len() > MAX_EXTENSION_LEN
        || !ext.chars().all(|c| c.is_ascii_alphanumeric())
    {
        return None;
    }

    Some(ext.to_ascii_lowercase())
}
