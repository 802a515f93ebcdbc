/// Content signature verdicts
use serde::{Deserialize, Serialize};

/// Best-guess format of a file derived from its leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignatureVerdict {
    Executable,
    ScriptJs,
    ScriptBat,
    ScriptCmd,
    Pdf,
    ZipArchive,
    Jpeg,
    Png,
    Gif,
    PlainText,
    Unknown,
}

impl SignatureVerdict {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Executable => "executable",
            Self::ScriptJs => "script-js",
            Self::ScriptBat => "script-bat",
            Self::ScriptCmd => "script-cmd",
            Self::Pdf => "pdf",
            Self::ZipArchive => "zip-archive",
            Self::Jpeg => "jpeg",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::PlainText => "plain-text",
            Self::Unknown => "unknown",
        }
    }

    /// Extension conventionally associated with the detected format
    pub fn extension(&self) -> Option<&'static str> {
        match self {
            Self::Executable => Some("exe"),
            Self::ScriptJs => Some("js"),
            Self::ScriptBat => Some("bat"),
            Self::ScriptCmd => Some("cmd"),
            Self::Pdf => Some("pdf"),
            Self::ZipArchive => Some("zip"),
            Self::Jpeg => Some("jpg"),
            Self::Png => Some("png"),
            Self::Gif => Some("gif"),
            Self::PlainText => Some("txt"),
            Self::Unknown => None,
        }
    }

    /// Whether content of this kind can execute on the recipient's machine
    pub fn is_dangerous(&self) -> bool {
        matches!(
            self,
            Self::Executable | Self::ScriptJs | Self::ScriptBat | Self::ScriptCmd
        )
    }

    /// Human-readable description of the evidence behind the verdict
    pub fn description(&self) -> &'static str {
        match self {
            Self::Executable => "PE/ELF/Mach-O header or shebang (e.g. 4D 5A), executable",
            Self::ScriptJs => "JavaScript pattern, JavaScript file",
            Self::ScriptBat => "batch script pattern, Windows batch file",
            Self::ScriptCmd => "command script pattern, Windows command file",
            Self::Pdf => "PDF signature (25 50 44 46), PDF document",
            Self::ZipArchive => "ZIP signature (50 4B), archive",
            Self::Jpeg => "JPEG signature (FF D8), JPEG image",
            Self::Png => "PNG signature (89 50 4E 47), PNG image",
            Self::Gif => "GIF signature (47 49 46 38), GIF image",
            Self::PlainText => "plain text",
            Self::Unknown => "unknown format",
        }
    }
}

impl std::fmt::Display for SignatureVerdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
