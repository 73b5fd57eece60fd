use std::fmt;

use serde::{Deserialize, Serialize};

/// Kinds of technical document Ghostwriter can draft.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    #[default]
    QuickStart,
    InstallGuide,
    SafetySheet,
    Faq,
}

impl DocumentType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DocumentType::QuickStart => "Quick Start",
            DocumentType::InstallGuide => "Install Guide",
            DocumentType::SafetySheet => "Safety Sheet",
            DocumentType::Faq => "FAQ",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Audience {
    #[default]
    EndUser,
    Technician,
    SupportStaff,
}

impl Audience {
    pub fn display_name(&self) -> &'static str {
        match self {
            Audience::EndUser => "End User",
            Audience::Technician => "Technician",
            Audience::SupportStaff => "Support Staff",
        }
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_type_wire_and_display_names() {
        let parsed: DocumentType = serde_json::from_str("\"install_guide\"").unwrap();
        assert_eq!(parsed, DocumentType::InstallGuide);
        assert_eq!(parsed.to_string(), "Install Guide");
        assert_eq!(DocumentType::Faq.to_string(), "FAQ");
    }

    #[test]
    fn test_audience_wire_and_display_names() {
        let parsed: Audience = serde_json::from_str("\"support_staff\"").unwrap();
        assert_eq!(parsed, Audience::SupportStaff);
        assert_eq!(parsed.to_string(), "Support Staff");
    }

    #[test]
    fn test_defaults_match_sidebar_defaults() {
        assert_eq!(DocumentType::default(), DocumentType::QuickStart);
        assert_eq!(Audience::default(), Audience::EndUser);
    }
}
