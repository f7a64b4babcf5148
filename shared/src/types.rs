//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Account roles on the platform
///
/// A principal carries exactly one role, fixed at account creation. The role
/// is embedded in session tokens and never changes afterwards; a role change
/// would require re-issuing a token.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Role {
    #[serde(rename = "FARMER")]
    Farmer,
    #[serde(rename = "ADMIN")]
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Farmer => "FARMER",
            Role::Admin => "ADMIN",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported languages
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    English,
    #[serde(rename = "hi")]
    Hindi,
    #[serde(rename = "mr")]
    Marathi,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Hindi => "hi",
            Language::Marathi => "mr",
        }
    }

    /// Parse a language code, falling back to English for unknown values
    pub fn from_code(code: &str) -> Self {
        match code {
            "hi" => Language::Hindi,
            "mr" => Language::Marathi,
            _ => Language::English,
        }
    }
}
