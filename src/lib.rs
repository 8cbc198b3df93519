// Label Draft - Core Library
// Nutrition / ingredient label drafting for EU and US markets.
// Exposes the engine for the CLI, the API server, and tests.

pub mod error;
pub mod units;
pub mod allergens;
pub mod ingredients;
pub mod nutrition;
pub mod settings;
pub mod compliance;
pub mod label;
pub mod email;
pub mod wizard;
pub mod config;

#[cfg(feature = "server")]
pub mod mailer;
#[cfg(feature = "server")]
pub mod server;

// Re-export commonly used types
pub use error::ValidationError;
pub use units::{kcal_to_kj, round_half_up, sodium_to_salt};
pub use allergens::{detect, detect_all, AllergenTag};
pub use ingredients::{is_sorted_descending, validate_add, Ingredient, IngredientList};
pub use nutrition::{NutrientField, NutritionFacts};
pub use settings::{ProjectSettings, TargetMarket};
pub use compliance::{ChecklistItem, ComplianceBand};
pub use label::{draft_label, render_label_text, review_mailto_link, LabelDraft};
pub use email::{render_email_html, FieldErrors, LeadRequest, SubmittedLead};
pub use wizard::{Wizard, WizardError, WizardStep};
pub use config::ServerConfig;

#[cfg(feature = "server")]
pub use mailer::{Delivery, LeadMailer, MailError};

use serde::Deserialize;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Inputs for one label draft, as read from a project file or the draft API
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Project {
    pub settings: ProjectSettings,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    #[serde(default)]
    pub nutrition: NutritionFacts,
}

impl Project {
    /// Canonical ingredient order, then render and score
    pub fn draft(&self) -> LabelDraft {
        let ordered = IngredientList::from_unsorted(self.ingredients.clone());
        draft_label(&self.settings, ordered.as_slice(), &self.nutrition)
    }
}
