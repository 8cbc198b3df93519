// 🧭 Label Wizard - four-step session state machine
// Settings → Ingredients → Nutrition → Output
//
// Forward moves are gated by the validator of the step being left.
// Back moves are always allowed (no-op on the first step).

use crate::error::ValidationError;
use crate::ingredients::{validate_add, Ingredient, IngredientList};
use crate::label::{draft_label, LabelDraft};
use crate::nutrition::{NutrientField, NutritionFacts};
use crate::settings::ProjectSettings;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// STEPS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum WizardStep {
    #[default]
    Settings,
    Ingredients,
    Nutrition,
    Output,
}

impl WizardStep {
    pub const ALL: [WizardStep; 4] = [
        WizardStep::Settings,
        WizardStep::Ingredients,
        WizardStep::Nutrition,
        WizardStep::Output,
    ];

    /// 1-based position for step indicators
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::Settings => 1,
            WizardStep::Ingredients => 2,
            WizardStep::Nutrition => 3,
            WizardStep::Output => 4,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::Settings => "Project settings",
            WizardStep::Ingredients => "Ingredient analysis",
            WizardStep::Nutrition => "Nutrition facts",
            WizardStep::Output => "Label output",
        }
    }

    fn next(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Settings => Some(WizardStep::Ingredients),
            WizardStep::Ingredients => Some(WizardStep::Nutrition),
            WizardStep::Nutrition => Some(WizardStep::Output),
            WizardStep::Output => None,
        }
    }

    fn previous(&self) -> Option<WizardStep> {
        match self {
            WizardStep::Settings => None,
            WizardStep::Ingredients => Some(WizardStep::Settings),
            WizardStep::Nutrition => Some(WizardStep::Ingredients),
            WizardStep::Output => Some(WizardStep::Nutrition),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cannot leave {step:?}: {}", format_errors(.errors))]
    Blocked {
        step: WizardStep,
        errors: Vec<ValidationError>,
    },

    #[error("the wizard is already on the last step")]
    AlreadyComplete,
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// WIZARD
// ============================================================================

/// One user's drafting session. Nothing here outlives the session.
#[derive(Debug, Clone, Default)]
pub struct Wizard {
    step: WizardStep,
    settings: ProjectSettings,
    ingredients: IngredientList,
    nutrition: NutritionFacts,
}

impl Wizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn settings(&self) -> &ProjectSettings {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut ProjectSettings {
        &mut self.settings
    }

    pub fn ingredients(&self) -> &IngredientList {
        &self.ingredients
    }

    pub fn nutrition(&self) -> &NutritionFacts {
        &self.nutrition
    }

    /// Validate form input and insert it in weight order
    pub fn add_ingredient(&mut self, name: &str, percent_raw: &str) -> Result<Ingredient, ValidationError> {
        let item = validate_add(name, percent_raw)?;
        self.ingredients.insert(item.clone());
        Ok(item)
    }

    pub fn remove_ingredient(&mut self, index: usize) -> Result<Ingredient, ValidationError> {
        self.ingredients.remove(index)
    }

    pub fn set_nutrient(&mut self, field: NutrientField, raw: &str) {
        self.nutrition.set_from_text(field, raw);
    }

    /// Check the current step's gate without moving
    pub fn check_current(&self) -> Result<(), Vec<ValidationError>> {
        match self.step {
            WizardStep::Settings => self.settings.validate(),
            WizardStep::Ingredients => self.ingredients.validate_non_empty().map_err(|e| vec![e]),
            WizardStep::Nutrition | WizardStep::Output => Ok(()),
        }
    }

    /// Move forward if the current step validates
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        let next = self.step.next().ok_or(WizardError::AlreadyComplete)?;
        self.check_current().map_err(|errors| WizardError::Blocked {
            step: self.step,
            errors,
        })?;
        tracing::debug!(from = ?self.step, to = ?next, "wizard advanced");
        self.step = next;
        Ok(next)
    }

    /// Move back one step; stays put on the first step
    pub fn back(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// Start over with a blank session
    pub fn reset(&mut self) {
        *self = Wizard::default();
    }

    /// The label draft, available once the output step is reached
    pub fn draft(&self) -> Option<LabelDraft> {
        (self.step == WizardStep::Output).then(|| {
            draft_label(&self.settings, self.ingredients.as_slice(), &self.nutrition)
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_settings(wizard: &mut Wizard) {
        let settings = wizard.settings_mut();
        settings.email = "export@example.com".to_string();
        settings.product_name = "Rice Cake".to_string();
    }

    #[test]
    fn test_starts_on_settings() {
        let wizard = Wizard::new();
        assert_eq!(wizard.step(), WizardStep::Settings);
        assert_eq!(wizard.step().number(), 1);
        assert!(wizard.draft().is_none());
    }

    #[test]
    fn test_settings_gate_blocks_invalid_email() {
        let mut wizard = Wizard::new();
        filled_settings(&mut wizard);
        wizard.settings_mut().email = "bad".to_string();

        let err = wizard.advance().unwrap_err();
        assert_eq!(
            err,
            WizardError::Blocked {
                step: WizardStep::Settings,
                errors: vec![ValidationError::InvalidEmail],
            }
        );
        assert_eq!(wizard.step(), WizardStep::Settings);
    }

    #[test]
    fn test_ingredients_gate_requires_one_entry() {
        let mut wizard = Wizard::new();
        filled_settings(&mut wizard);
        assert_eq!(wizard.advance(), Ok(WizardStep::Ingredients));

        assert!(matches!(
            wizard.advance(),
            Err(WizardError::Blocked { step: WizardStep::Ingredients, .. })
        ));

        wizard.add_ingredient("rice", "60").unwrap();
        assert_eq!(wizard.advance(), Ok(WizardStep::Nutrition));
    }

    #[test]
    fn test_add_ingredient_validates_and_sorts() {
        let mut wizard = Wizard::new();
        assert_eq!(wizard.add_ingredient("", "5").unwrap_err(), ValidationError::EmptyName);
        assert_eq!(
            wizard.add_ingredient("Sugar", "150").unwrap_err(),
            ValidationError::OutOfRange
        );

        wizard.add_ingredient("water", "30").unwrap();
        let added = wizard.add_ingredient(" rice ", "60").unwrap();
        assert_eq!(added.name, "rice");
        assert_eq!(wizard.ingredients().as_slice()[0].name, "rice");

        assert!(wizard.remove_ingredient(9).is_err());
        assert_eq!(wizard.remove_ingredient(0).unwrap().name, "rice");
    }

    #[test]
    fn test_full_flow_to_output_and_back() {
        let mut wizard = Wizard::new();
        filled_settings(&mut wizard);
        wizard.advance().unwrap();
        wizard.add_ingredient("wheat flour", "10").unwrap();
        wizard.add_ingredient("rice", "60").unwrap();
        wizard.advance().unwrap();
        wizard.set_nutrient(NutrientField::Kcal, "200");
        wizard.set_nutrient(NutrientField::Sodium, "300");
        assert_eq!(wizard.advance(), Ok(WizardStep::Output));
        assert_eq!(wizard.advance(), Err(WizardError::AlreadyComplete));

        let draft = wizard.draft().unwrap();
        assert!(draft.label_text.contains("Salt: 0.75 g"));
        assert!(draft.label_text.contains("rice, **WHEAT FLOUR**"));

        assert_eq!(wizard.back(), WizardStep::Nutrition);
        assert!(wizard.draft().is_none());
        assert_eq!(wizard.back(), WizardStep::Ingredients);
        assert_eq!(wizard.back(), WizardStep::Settings);
        assert_eq!(wizard.back(), WizardStep::Settings);
    }

    #[test]
    fn test_reset_clears_session() {
        let mut wizard = Wizard::new();
        filled_settings(&mut wizard);
        wizard.advance().unwrap();
        wizard.add_ingredient("rice", "60").unwrap();
        wizard.set_nutrient(NutrientField::Fat, "3");

        wizard.reset();
        assert_eq!(wizard.step(), WizardStep::Settings);
        assert!(wizard.ingredients().is_empty());
        assert_eq!(*wizard.nutrition(), NutritionFacts::default());
        assert_eq!(*wizard.settings(), ProjectSettings::default());
    }

    #[test]
    fn test_blocked_error_message() {
        let err = WizardError::Blocked {
            step: WizardStep::Ingredients,
            errors: vec![ValidationError::NoIngredients],
        };
        assert_eq!(
            err.to_string(),
            "cannot leave Ingredients: at least one ingredient is required"
        );
    }
}
