// ✅ Compliance Checklist - advisory heuristics over a drafted label
// Five fixed checks, scored 0-100. Not a regulatory guarantee.
//
// Known weak points, kept as-is:
// - allergen emphasis is checked by looking for the marker in the rendered text
// - the salt/sodium and energy-unit items are always reported satisfied

use crate::allergens::AllergenTag;
use crate::ingredients::{is_sorted_descending, Ingredient};
use crate::label::EMPHASIS_MARKER;
use crate::nutrition::NutritionFacts;
use crate::settings::TargetMarket;
use serde::{Deserialize, Serialize};

/// Score at or above which a draft is shown as in good shape
pub const GOOD_SCORE_THRESHOLD: u8 = 80;

// ============================================================================
// CHECKLIST ITEM
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub description: String,
    pub satisfied: bool,
}

impl ChecklistItem {
    fn new(description: &str, satisfied: bool) -> Self {
        ChecklistItem {
            description: description.to_string(),
            satisfied,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceBand {
    Good,
    NeedsReview,
}

impl ComplianceBand {
    pub fn for_score(score: u8) -> Self {
        if score >= GOOD_SCORE_THRESHOLD {
            ComplianceBand::Good
        } else {
            ComplianceBand::NeedsReview
        }
    }
}

// ============================================================================
// EVALUATION
// ============================================================================

/// Evaluate the fixed five-item checklist.
///
/// `label_text` must be the already-rendered label for the same inputs; the
/// allergen item greps it for the emphasis marker.
pub fn evaluate(
    market: TargetMarket,
    ingredients: &[Ingredient],
    allergens: &[AllergenTag],
    nutrition: &NutritionFacts,
    label_text: &str,
) -> Vec<ChecklistItem> {
    let (salt_item, energy_item) = match market {
        TargetMarket::EU => (
            "Sodium converted to salt (EU)",
            "Energy declared in kJ and kcal (EU)",
        ),
        TargetMarket::US => ("Sodium declared in mg (US)", "Energy declared in kcal (US)"),
    };

    vec![
        ChecklistItem::new(
            "Ingredients listed in descending order of weight (FIC Article 18)",
            is_sorted_descending(ingredients),
        ),
        ChecklistItem::new(
            "Allergens emphasised in the ingredient list",
            allergens.is_empty() || label_text.contains(EMPHASIS_MARKER),
        ),
        ChecklistItem::new(salt_item, true),
        ChecklistItem::new(energy_item, true),
        ChecklistItem::new(
            "Mandatory nutrition fields present",
            nutrition.all_non_negative(),
        ),
    ]
}

/// `round(100 * satisfied / total)`; an empty checklist scores 0
pub fn score(checklist: &[ChecklistItem]) -> u8 {
    if checklist.is_empty() {
        return 0;
    }
    let satisfied = checklist.iter().filter(|c| c.satisfied).count();
    let pct = 100.0 * satisfied as f64 / checklist.len() as f64;
    (pct + 0.5).floor() as u8
}

// ============================================================================
// TESTS
// ============================================================================
