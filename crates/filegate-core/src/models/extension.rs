/// Extension catalog models
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of the pre-seeded fixed catalog
///
/// Fixed entries are never deleted; an operator only toggles `is_blocked`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedExtension {
    pub id: i64,
    #[serde(rename = "extensionName")]
    pub extension_name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub description: String,
    #[serde(rename = "isBlocked")]
    pub is_blocked: bool,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Operator-defined extension; presence in the custom catalog means blocked
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomExtension {
    pub id: i64,
    #[serde(rename = "extensionName")]
    pub extension_name: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Seed record for the fixed catalog
#[derive(Debug, Clone)]
pub struct NewFixedExtension {
    pub extension_name: String,
    pub display_name: String,
    pub description: String,
    pub is_blocked: bool,
}

impl NewFixedExtension {
    /// Default seed list, all entries initially unblocked
    pub fn defaults() -> Vec<Self> {
        crate::constants::DEFAULT_FIXED_EXTENSIONS
            .iter()
            .map(|(ext, display, description)| Self {
                extension_name: ext.to_string(),
                display_name: display.to_string(),
                description: description.to_string(),
                is_blocked: false,
            })
            .collect()
    }
}

/// Request body for adding a custom extension
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtensionRequest {
    #[serde(rename = "extensionName")]
    pub extension_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_seed_is_unblocked() {
        let defaults = NewFixedExtension::defaults();
        assert_eq!(defaults.len(), 7);
        assert!(defaults.iter().all(|e| !e.is_blocked));
        let names: Vec<_> = defaults.iter().map(|e| e.extension_name.as_str()).collect();
        assert_eq!(names, ["bat", "cmd", "com", "cpl", "exe", "scr", "js"]);
    }

    #[test]
    fn test_extension_request_deserializes_camel_case() {
        let req: ExtensionRequest = serde_json::from_str(r#"{"extensionName":"sh"}"#).unwrap();
        assert_eq!(req.extension_name, "sh");
    }
}
