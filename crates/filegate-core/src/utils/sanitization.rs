//! Filename sanitization utilities

/// Reduces a client-supplied filename to a bare file name
///
/// Browsers on some platforms send full paths (`C:\Users\me\a.txt`); only
/// the last path component is kept. Control characters are dropped and
/// surrounding whitespace is trimmed. Dots are left untouched so the
/// validation gates still see every extension segment. Length is not
/// touched here; overlong names are refused once they have been validated.
pub fn sanitize_upload_filename(filename: &str) -> String {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = base.chars().filter(|c| !c.is_control()).collect();
    let trimmed = cleaned.trim();

    if trimmed == "." || trimmed == ".." {
        return String::new();
    }

    trimmed.to_string()
}

/// Whether `name` can safely address a single file inside the storage root
pub fn is_safe_stored_filename(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(|c| c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_directories() {
        assert_eq!(sanitize_upload_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_upload_filename(r"C:\Users\me\report.pdf"), "report.pdf");
        assert_eq!(sanitize_upload_filename("dir/sub/evil.exe.txt"), "evil.exe.txt");
    }

    #[test]
    fn test_strips_control_characters_and_whitespace() {
        assert_eq!(sanitize_upload_filename("  a\u{0000}b.txt \n"), "ab.txt");
        assert_eq!(sanitize_upload_filename("\t"), "");
    }

    #[test]
    fn test_dot_names_become_empty() {
        assert_eq!(sanitize_upload_filename(".."), "");
        assert_eq!(sanitize_upload_filename("a/."), "");
        assert_eq!(sanitize_upload_filename("dir/"), "");
    }

    #[test]
    fn test_long_names_are_kept_whole() {
        let long = format!("payload.exe.{}.txt", "b".repeat(300));
        let sanitized = sanitize_upload_filename(&format!("dir/{}", long));
        assert_eq!(sanitized, long);
        assert!(sanitized.starts_with("payload.exe."));
    }

    #[test]
    fn test_is_safe_stored_filename() {
        assert!(is_safe_stored_filename("a-1.txt"));
        assert!(!is_safe_stored_filename(""));
        assert!(!is_safe_stored_filename(".."));
        assert!(!is_safe_stored_filename("../a.txt"));
        assert!(!is_safe_stored_filename(r"..\a.txt"));
    }
}
