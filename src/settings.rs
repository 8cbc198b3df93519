// ⚙️ Project Settings - who the draft is for and where it will be sold
// Re-editable at any time; every change means a full recomputation of the draft.

use crate::error::ValidationError;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Loose `local@domain.tld` check used by the settings form and lead validation
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

// ============================================================================
// TARGET MARKET
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TargetMarket {
    /// European Union - kJ/kcal energy, salt in g
    #[default]
    EU,
    /// United States - kcal energy, sodium in mg
    US,
}

impl TargetMarket {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetMarket::EU => "EU",
            TargetMarket::US => "US",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TargetMarket::EU => "EU (European Union)",
            TargetMarket::US => "US (United States)",
        }
    }
}

impl fmt::Display for TargetMarket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TargetMarket {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EU" => Ok(TargetMarket::EU),
            "US" => Ok(TargetMarket::US),
            other => Err(format!("unknown market '{}', expected EU or US", other)),
        }
    }
}

// ============================================================================
// PROJECT SETTINGS
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectSettings {
    /// Where the exporter wants replies sent
    pub email: String,
    pub product_name: String,
    pub target_market: TargetMarket,
    /// Free text, e.g. "English", "Deutsch"
    pub target_language: String,
}

impl Default for ProjectSettings {
    fn default() -> Self {
        ProjectSettings {
            email: String::new(),
            product_name: String::new(),
            target_market: TargetMarket::EU,
            target_language: "English".to_string(),
        }
    }
}

impl ProjectSettings {
    /// Check every field, collecting all problems instead of stopping at the first
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        let email = self.email.trim();
        if email.is_empty() {
            errors.push(ValidationError::MissingField("email"));
        } else if !is_valid_email(email) {
            errors.push(ValidationError::InvalidEmail);
        }

        if self.product_name.trim().is_empty() {
            errors.push(ValidationError::MissingField("productName"));
        }

        if self.target_language.trim().is_empty() {
            errors.push(ValidationError::MissingField("targetLanguage"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
