/// Application constants
///
/// This module contains all hardcoded values used throughout the application.
/// Constants are organized by category for easy maintenance.
// ============================================================================
// Extension Catalog Constants
// ============================================================================
/// Maximum number of operator-defined custom extensions
pub const MAX_CUSTOM_EXTENSIONS: usize = 200;

/// Maximum length of a custom extension name (and of an uploaded file's extension)
pub const MAX_EXTENSION_LENGTH: usize = 20;

/// Maximum length of a fixed catalog extension name
pub const MAX_FIXED_EXTENSION_LENGTH: usize = 50;

/// Extensions that are trusted as declared; content sniffing never overrides them
pub const EXECUTABLE_EXTENSIONS: &[&str] = &["exe", "scr", "cpl", "com", "bat", "cmd", "js"];

/// Seed data for the fixed catalog: (extension, display name, description)
pub const DEFAULT_FIXED_EXTENSIONS: &[(&str, &str, &str)] = &[
    ("bat", "BAT (Batch File)", "Windows batch file"),
    ("cmd", "CMD (Command File)", "Windows command file"),
    ("com", "COM (Command File)", "DOS command file"),
    ("cpl", "CPL (Control Panel)", "Windows control panel item"),
    ("exe", "EXE (Executable)", "Windows executable"),
    ("scr", "SCR (Screen Saver)", "Windows screen saver"),
    ("js", "JS (JavaScript)", "JavaScript file"),
];

// ============================================================================
// Content Inspection Constants
// ============================================================================

/// Number of leading bytes read from an upload for signature detection
pub const SIGNATURE_PREFIX_LEN: usize = 64;

/// Minimum number of bytes needed before a signature is classified
pub const MIN_SIGNATURE_BYTES: usize = 2;

/// Number of leading bytes inspected by the plain-text heuristic
pub const TEXT_PROBE_LEN: usize = 8;

// ============================================================================
// Storage Constants
// ============================================================================

/// Maximum number of `name-N.ext` probes before giving up on a filename
pub const MAX_FILENAME_PROBES: usize = 100;

/// Default maximum upload size (10 MB)
pub const DEFAULT_MAX_UPLOAD_SIZE_BYTES: usize = 10 * 1024 * 1024;

/// Maximum filename length after sanitization
pub const MAX_FILENAME_LENGTH: usize = 255;

/// Default directory for stored uploads
pub const DEFAULT_UPLOAD_DIR: &str = "./uploads";

/// Default listen address for the API server
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

// ============================================================================
// Logging Constants
// ============================================================================

/// Maximum number of characters of a client-supplied name written to logs
pub const MAX_LOGGED_FILENAME_CHARS: usize = 128;
