/// File type validation using magic bytes and filename inspection
use crate::constants::{
    EXECUTABLE_EXTENSIONS, MIN_SIGNATURE_BYTES, SIGNATURE_PREFIX_LEN, TEXT_PROBE_LEN,
};
use crate::models::SignatureVerdict;
use crate::services::policy::BlocklistPolicy;
use std::io::Read;

/// Executable signatures matched at offset 0
const EXECUTABLE_SIGNATURES: &[&[u8]] = &[
    &[0x4D, 0x5A],             // MZ (PE)
    &[0x7F, 0x45, 0x4C, 0x46], // ELF
    &[0xFE, 0xED, 0xFA, 0xCE], // Mach-O 32
    &[0xFE, 0xED, 0xFA, 0xCF], // Mach-O 64
    &[0x23, 0x21],             // #!
];

const PDF_SIGNATURE: &[u8] = &[0x25, 0x50, 0x44, 0x46]; // %PDF
const ZIP_SIGNATURE: &[u8] = &[0x50, 0x4B]; // PK
const JPEG_SIGNATURE: &[u8] = &[0xFF, 0xD8];
const PNG_SIGNATURE: &[u8] = &[0x89, 0x50, 0x4E, 0x47];
const GIF_SIGNATURE: &[u8] = &[0x47, 0x49, 0x46, 0x38]; // GIF8
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

// Token lists and their order decide verdicts for ambiguous text; keep them stable.
const JS_TOKENS: &[&str] = &[
    "function",
    "var ",
    "const ",
    "let ",
    "console.",
    "document.",
    "window.",
    "require(",
    "import ",
    "export ",
    "module.exports",
    "class ",
    "=>",
    "async ",
    "await ",
    "promise",
];

const BAT_TOKENS: &[&str] = &[
    "@echo", "echo ", "pause", "cls", "dir ", "copy ", "del ", "ren ", "md ", "rd ", "cd ",
    "set ", "if ", "for ", "goto ", "call ", "start ", "exit", "rem ", "::", "choice ", "find ",
    "findstr ", "sort ", "type ", "more ",
];

const CMD_TOKENS: &[&str] = &[
    "cmd",
    "command",
    "powershell",
    "wscript",
    "cscript",
    "reg ",
    "sc ",
    "net ",
    "tasklist",
    "taskkill",
    "ipconfig",
    "ping ",
    "tracert ",
    "nslookup",
    "telnet ",
    "ftp ",
    "at ",
    "schtasks",
];

/// Leading bytes of an upload, zero-padded to a fixed size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignaturePrefix {
    header: [u8; SIGNATURE_PREFIX_LEN],
    len: usize,
}

impl SignaturePrefix {
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let len = bytes.len().min(SIGNATURE_PREFIX_LEN);
        let mut header = [0u8; SIGNATURE_PREFIX_LEN];
        header[..len].copy_from_slice(&bytes[..len]);
        Self { header, len }
    }

    /// Number of bytes actually read
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn bytes(&self) -> &[u8] {
        &self.header[..self.len]
    }
}

/// Reads at most `SIGNATURE_PREFIX_LEN` bytes from the start of `reader`
///
/// The reader is consumed once; callers must not expect to re-read the prefix.
pub fn read_signature_prefix<R: Read>(reader: R) -> std::io::Result<SignaturePrefix> {
    let mut buf = Vec::with_capacity(SIGNATURE_PREFIX_LEN);
    reader
        .take(SIGNATURE_PREFIX_LEN as u64)
        .read_to_end(&mut buf)?;
    Ok(SignaturePrefix::from_bytes(&buf))
}

/// Classifies a file from its leading bytes
///
/// Returns `None` when fewer than two bytes were read. Signatures are matched
/// against the zero-padded header, so short reads never index out of range.
pub fn classify_signature(prefix: &SignaturePrefix) -> Option<SignatureVerdict> {
    if prefix.len < MIN_SIGNATURE_BYTES {
        return None;
    }

    let header = &prefix.header;

    if EXECUTABLE_SIGNATURES.iter().any(|sig| header.starts_with(sig)) {
        return Some(SignatureVerdict::Executable);
    }

    if let Some(script) = detect_script(prefix.bytes()) {
        return Some(script);
    }

    if header.starts_with(PDF_SIGNATURE) {
        return Some(SignatureVerdict::Pdf);
    }

    if header.starts_with(ZIP_SIGNATURE) {
        return Some(SignatureVerdict::ZipArchive);
    }

    if let Some(image) = detect_image(header) {
        return Some(image);
    }

    if is_plain_text(header, prefix.len) {
        return Some(SignatureVerdict::PlainText);
    }

    Some(SignatureVerdict::Unknown)
}

/// Substring heuristics over the decoded prefix; JS, then BAT, then CMD
fn detect_script(bytes: &[u8]) -> Option<SignatureVerdict> {
    let content = String::from_utf8_lossy(bytes).to_lowercase();
    let contains_any = |tokens: &[&str]| tokens.iter().any(|token| content.contains(token));

    if contains_any(JS_TOKENS) {
        Some(SignatureVerdict::ScriptJs)
    } else if contains_any(BAT_TOKENS) {
        Some(SignatureVerdict::ScriptBat)
    } else if contains_any(CMD_TOKENS) {
        Some(SignatureVerdict::ScriptCmd)
    } else {
        None
    }
}

fn detect_image(header: &[u8]) -> Option<SignatureVerdict> {
    if header.starts_with(JPEG_SIGNATURE) {
        return Some(SignatureVerdict::Jpeg);
    }

    if header.starts_with(PNG_SIGNATURE) {
        return Some(SignatureVerdict::Png);
    }

    // GIF87a / GIF89a
    if header.starts_with(GIF_SIGNATURE)
        && matches!(header[4], 0x37 | 0x39)
        && header[5] == 0x61
    {
        return Some(SignatureVerdict::Gif);
    }

    None
}

fn is_plain_text(header: &[u8], len: usize) -> bool {
    if header.starts_with(UTF8_BOM) {
        return true;
    }

    header[..len.min(TEXT_PROBE_LEN)]
        .iter()
        .all(|&b| (0x09..=0x0D).contains(&b) || b >= 0x20)
}

/// Decides which extension the blocklist should judge
///
/// A declared executable-class extension is trusted as-is. Otherwise a
/// dangerous content verdict replaces the declared extension; sniffing only
/// ever escalates, it never downgrades.
pub fn resolve_effective_extension<'a>(
    declared: &'a str,
    verdict: Option<SignatureVerdict>,
) -> &'a str {
    if EXECUTABLE_EXTENSIONS.contains(&declared) {
        return declared;
    }

    match verdict {
        Some(v) if v.is_dangerous() => v.extension().unwrap_or(declared),
        _ => declared,
    }
}

/// Checks whether a blocked extension hides before the final one
///
/// `report.exe.txt` is caught because the segment `exe` precedes the real
/// extension `txt`. The final extension itself is not scanned here. A name
/// without any dot is scanned as a single segment.
pub fn has_dangerous_extension_in_filename<P>(filename: &str, policy: &P) -> bool
where
    P: BlocklistPolicy + ?Sized,
{
    if filename.trim().is_empty() {
        return false;
    }

    let lower = filename.to_lowercase();
    let scanned = match lower.rfind('.') {
        Some(idx) => &lower[..idx],
        None => lower.as_str(),
    };

    scanned
        .split('.')
        .filter(|segment| !segment.is_empty())
        .any(|segment| policy.is_extension_blocked(segment))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::policy::BlocklistSnapshot;

    fn classify(bytes: &[u8]) -> Option<SignatureVerdict> {
        classify_signature(&SignaturePrefix::from_bytes(bytes))
    }

    fn policy_blocking(extensions: &[&str]) -> BlocklistSnapshot {
        BlocklistSnapshot::from_parts(
            extensions.iter().map(|e| (e.to_string(), true)),
            std::iter::empty::<String>(),
        )
    }

    #[test]
    fn test_executable_signatures() {
        assert_eq!(classify(&[0x4D, 0x5A, 0x90, 0x00]), Some(SignatureVerdict::Executable));
        assert_eq!(classify(&[0x4D, 0x5A]), Some(SignatureVerdict::Executable));
        assert_eq!(
            classify(&[0x7F, 0x45, 0x4C, 0x46, 0x02, 0x01]),
            Some(SignatureVerdict::Executable)
        );
        assert_eq!(
            classify(&[0xFE, 0xED, 0xFA, 0xCF, 0x0C, 0x00]),
            Some(SignatureVerdict::Executable)
        );
        assert_eq!(
            classify(&[0xFE, 0xED, 0xFA, 0xCE, 0x07, 0x00]),
            Some(SignatureVerdict::Executable)
        );
        assert_eq!(classify(b"#!/bin/sh\n"), Some(SignatureVerdict::Executable));
    }

    #[test]
    fn test_short_input_has_no_verdict() {
        assert_eq!(classify(&[]), None);
        assert_eq!(classify(&[0x4D]), None);
    }

    #[test]
    fn test_script_heuristics() {
        assert_eq!(
            classify(b"function main() { return 1; }"),
            Some(SignatureVerdict::ScriptJs)
        );
        assert_eq!(classify(b"CONSOLE.LOG('x')"), Some(SignatureVerdict::ScriptJs));
        assert_eq!(classify(b"@echo off\r\n"), Some(SignatureVerdict::ScriptBat));
        assert_eq!(classify(b"@ECHO OFF\r\n"), Some(SignatureVerdict::ScriptBat));
        assert_eq!(classify(b"powershell -nop"), Some(SignatureVerdict::ScriptCmd));
        assert_eq!(classify(b"ipconfig /all"), Some(SignatureVerdict::ScriptCmd));
    }

    #[test]
    fn test_script_category_order() {
        // Both JS and BAT tokens present: JS wins
        assert_eq!(
            classify(b"@echo off\nconst x = 1;"),
            Some(SignatureVerdict::ScriptJs)
        );
        // Both BAT and CMD tokens present: BAT wins
        assert_eq!(
            classify(b"pause\npowershell"),
            Some(SignatureVerdict::ScriptBat)
        );
    }

    #[test]
    fn test_executable_precedes_scripts() {
        let mut bytes = vec![0x4D, 0x5A];
        bytes.extend_from_slice(b" function ");
        assert_eq!(classify(&bytes), Some(SignatureVerdict::Executable));
    }

    #[test]
    fn test_document_archive_image_signatures() {
        assert_eq!(classify(&[0x25, 0x50, 0x44, 0x46]), Some(SignatureVerdict::Pdf));
        assert_eq!(
            classify(&[0x50, 0x4B, 0x03, 0x04, 0x14, 0x00]),
            Some(SignatureVerdict::ZipArchive)
        );
        assert_eq!(
            classify(&[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]),
            Some(SignatureVerdict::Jpeg)
        );
        assert_eq!(
            classify(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(SignatureVerdict::Png)
        );
        assert_eq!(classify(b"GIF89a\x01\x00"), Some(SignatureVerdict::Gif));
        assert_eq!(classify(b"GIF87a\x01\x00"), Some(SignatureVerdict::Gif));
    }

    #[test]
    fn test_gif_requires_version() {
        // GIF8 followed by an unknown version byte is not a GIF
        assert_eq!(
            classify(&[0x47, 0x49, 0x46, 0x38, 0x00, 0x00]),
            Some(SignatureVerdict::Unknown)
        );
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(classify(b"Hello world\n"), Some(SignatureVerdict::PlainText));
        assert_eq!(
            classify(&[0xEF, 0xBB, 0xBF, 0x00, 0x01]),
            Some(SignatureVerdict::PlainText)
        );
        // Control bytes inside the probe window disqualify text
        assert_eq!(
            classify(&[0x00, 0x01, 0x02, 0x03]),
            Some(SignatureVerdict::Unknown)
        );
        // Only the first 8 bytes are probed
        let mut bytes = b"Hello wo".to_vec();
        bytes.push(0x00);
        assert_eq!(classify(&bytes), Some(SignatureVerdict::PlainText));
    }

    #[test]
    fn test_read_signature_prefix_is_bounded() {
        let data = vec![b'a'; 1000];
        let prefix = read_signature_prefix(data.as_slice()).unwrap();
        assert_eq!(prefix.len(), SIGNATURE_PREFIX_LEN);

        let prefix = read_signature_prefix(&b"MZ"[..]).unwrap();
        assert_eq!(prefix.bytes(), b"MZ");

        let prefix = read_signature_prefix(std::io::empty()).unwrap();
        assert!(prefix.is_empty());
    }

    #[test]
    fn test_bypass_trusts_declared_executable() {
        for verdict in [
            None,
            Some(SignatureVerdict::Executable),
            Some(SignatureVerdict::ScriptJs),
            Some(SignatureVerdict::PlainText),
        ] {
            assert_eq!(resolve_effective_extension("exe", verdict), "exe");
        }
        assert_eq!(
            resolve_effective_extension("js", Some(SignatureVerdict::Executable)),
            "js"
        );
    }

    #[test]
    fn test_bypass_overrides_safe_declared_extension() {
        assert_eq!(
            resolve_effective_extension("txt", Some(SignatureVerdict::Executable)),
            "exe"
        );
        assert_eq!(
            resolve_effective_extension("pdf", Some(SignatureVerdict::ScriptBat)),
            "bat"
        );
        assert_eq!(
            resolve_effective_extension("png", Some(SignatureVerdict::ScriptCmd)),
            "cmd"
        );
        assert_eq!(
            resolve_effective_extension("txt", Some(SignatureVerdict::ScriptJs)),
            "js"
        );
    }

    #[test]
    fn test_bypass_keeps_declared_for_benign_content() {
        assert_eq!(
            resolve_effective_extension("txt", Some(SignatureVerdict::Pdf)),
            "txt"
        );
        assert_eq!(resolve_effective_extension("txt", None), "txt");
        assert_eq!(
            resolve_effective_extension("docx", Some(SignatureVerdict::ZipArchive)),
            "docx"
        );
    }

    #[test]
    fn test_obfuscated_extension_in_filename() {
        let policy = policy_blocking(&["exe"]);
        assert!(has_dangerous_extension_in_filename("report.exe.txt", &policy));
        assert!(has_dangerous_extension_in_filename("REPORT.EXE.txt", &policy));
        assert!(has_dangerous_extension_in_filename("a.b.exe.c.txt", &policy));
        assert!(!has_dangerous_extension_in_filename("report.txt", &policy));
        // The final extension is left to the blocklist gate
        assert!(!has_dangerous_extension_in_filename("report.exe", &policy));
    }

    #[test]
    fn test_obfuscation_scan_without_dot_checks_whole_name() {
        let policy = policy_blocking(&["exe"]);
        assert!(has_dangerous_extension_in_filename("exe", &policy));
        assert!(!has_dangerous_extension_in_filename("readme", &policy));
    }

    #[test]
    fn test_obfuscation_scan_ignores_blank_and_empty_segments() {
        let policy = policy_blocking(&["exe"]);
        assert!(!has_dangerous_extension_in_filename("", &policy));
        assert!(!has_dangerous_extension_in_filename("   ", &policy));
        assert!(!has_dangerous_extension_in_filename("..report..txt", &policy));
    }

    #[test]
    fn test_obfuscation_scan_respects_unblocked_entries() {
        let policy = BlocklistSnapshot::from_parts(
            [("exe".to_string(), false)],
            std::iter::empty::<String>(),
        );
        assert!(!has_dangerous_extension_in_filename("report.exe.txt", &policy));
    }
}
