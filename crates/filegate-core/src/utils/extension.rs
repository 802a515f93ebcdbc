/// Extension name normalization and validation
use crate::constants::MAX_EXTENSION_LENGTH;
use regex::Regex;
use std::sync::LazyLock;

static EXTENSION_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9]+$").unwrap());

/// Canonicalizes an extension token: strips every dot, lowercases, trims
///
/// # Examples
/// ```
/// use filegate_core::utils::extension::normalize_extension;
///
/// assert_eq!(normalize_extension(".EXE"), "exe");
/// assert_eq!(normalize_extension(" Tar.Gz "), "targz");
/// assert_eq!(normalize_extension("..."), "");
/// ```
pub fn normalize_extension(extension: &str) -> String {
    extension.replace('.', "").to_lowercase().trim().to_string()
}

/// Extracts the normalized final extension of a filename
///
/// Returns an empty string when the name is blank, has no dot, or ends in a dot.
pub fn last_extension(filename: &str) -> String {
    if filename.trim().is_empty() {
        return String::new();
    }

    match filename.rfind('.') {
        Some(idx) if idx + 1 < filename.len() => normalize_extension(&filename[idx + 1..]),
        _ => String::new(),
    }
}

/// Non-empty, at most 20 characters and ASCII alphanumeric after normalization
pub fn is_valid_extension_name(extension: &str) -> bool {
    if extension.trim().is_empty() {
        return false;
    }

    let normalized = normalize_extension(extension);
    normalized.len() <= MAX_EXTENSION_LENGTH && EXTENSION_NAME_PATTERN.is_match(&normalized)
}
