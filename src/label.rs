// 🏷️ Label Formatter - plain-text label draft
// Deterministic template; the nutrition block branches on the target market.
//
// EU: "Energy: X kcal / Y kJ" and salt in g (converted from sodium)
// US: "Calories: X kcal" and sodium in mg

use crate::allergens::{detect, detect_all, AllergenTag};
use crate::compliance::{self, ChecklistItem, ComplianceBand};
use crate::ingredients::Ingredient;
use crate::nutrition::NutritionFacts;
use crate::settings::{ProjectSettings, TargetMarket};
use crate::units::{kcal_to_kj, round_half_up, sodium_to_salt};
use serde::Serialize;
use std::fmt::Write as _;

/// Wraps allergen ingredient names in the label text
pub const EMPHASIS_MARKER: &str = "**";

// ============================================================================
// LABEL TEXT
// ============================================================================

/// Ingredient name as it appears on the label: allergens upper-cased and emphasised
pub fn display_ingredient_name(name: &str) -> String {
    if detect(name).is_some() {
        format!("{m}{}{m}", name.to_uppercase(), m = EMPHASIS_MARKER)
    } else {
        name.to_string()
    }
}

/// Render the label draft text.
///
/// Ingredients are listed in the order given; callers keep them sorted.
pub fn render_label_text(
    settings: &ProjectSettings,
    ingredients: &[Ingredient],
    nutrition: &NutritionFacts,
) -> String {
    let allergens = detect_all(ingredients);
    let ingredient_line = ingredients
        .iter()
        .map(|i| display_ingredient_name(&i.name))
        .collect::<Vec<_>>()
        .join(", ");

    let mut out = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(out, "=== {} ===", settings.product_name);
    let _ = writeln!(out, "Target Market: {}", settings.target_market);
    let _ = writeln!(out, "Language: {}", settings.target_language);
    out.push('\n');

    out.push_str("INGREDIENTS:\n");
    let _ = writeln!(out, "{}", ingredient_line);
    out.push('\n');

    if !allergens.is_empty() {
        let tags: Vec<&str> = allergens.iter().map(|a| a.as_str()).collect();
        let _ = writeln!(out, "ALLERGENS: Contains {}", tags.join(", "));
        out.push('\n');
    }

    out.push_str("NUTRITION INFORMATION (per 100g):\n");
    match settings.target_market {
        TargetMarket::EU => {
            let _ = writeln!(
                out,
                "Energy: {} kcal / {} kJ",
                nutrition.kcal,
                kcal_to_kj(nutrition.kcal)
            );
        }
        TargetMarket::US => {
            let _ = writeln!(out, "Calories: {} kcal", nutrition.kcal);
        }
    }
    let _ = writeln!(out, "Fat: {} g", nutrition.fat);
    let _ = writeln!(out, "  of which saturates: {} g", nutrition.saturates);
    let _ = writeln!(out, "Carbohydrate: {} g", nutrition.carbs);
    let _ = writeln!(out, "  of which sugars: {} g", nutrition.sugars);
    let _ = writeln!(out, "Fibre: {} g", nutrition.fibre);
    let _ = writeln!(out, "Protein: {} g", nutrition.protein);
    match settings.target_market {
        TargetMarket::EU => {
            let _ = writeln!(
                out,
                "Salt: {:.2} g",
                round_half_up(sodium_to_salt(nutrition.sodium), 2)
            );
        }
        TargetMarket::US => {
            let _ = writeln!(out, "Sodium: {} mg", nutrition.sodium);
        }
    }

    out
}

// ============================================================================
// LABEL DRAFT
// ============================================================================

/// Everything the output step shows for one set of inputs
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelDraft {
    pub label_text: String,
    pub allergens: Vec<AllergenTag>,
    pub checklist: Vec<ChecklistItem>,
    pub compliance_score: u8,
    pub band: ComplianceBand,
    /// Sum of ingredient percents, for the "over 100%" warning
    pub total_percent: f64,
}

/// Render the label and score it in one pass
pub fn draft_label(
    settings: &ProjectSettings,
    ingredients: &[Ingredient],
    nutrition: &NutritionFacts,
) -> LabelDraft {
    let label_text = render_label_text(settings, ingredients, nutrition);
    let allergens = detect_all(ingredients);
    let checklist = compliance::evaluate(
        settings.target_market,
        ingredients,
        &allergens,
        nutrition,
        &label_text,
    );
    let compliance_score = compliance::score(&checklist);

    tracing::debug!(
        product = %settings.product_name,
        market = %settings.target_market,
        score = compliance_score,
        "label drafted"
    );

    LabelDraft {
        label_text,
        allergens,
        checklist,
        compliance_score,
        band: ComplianceBand::for_score(compliance_score),
        total_percent: ingredients.iter().map(|i| i.percent).sum(),
    }
}

// ============================================================================
// EXPERT REVIEW LINK
// ============================================================================

/// `mailto:` link asking the operator for an expert review of this draft
pub fn review_mailto_link(
    operator_email: &str,
    settings: &ProjectSettings,
    label_text: &str,
    compliance_score: u8,
) -> String {
    let subject = format!("[Expert review request] {}", settings.product_name);
    let body = format!(
        "Hello, I would like an expert review of this label draft.\n\
         \n\
         [Project]\n\
         - Product: {}\n\
         - Target market: {}\n\
         - Language: {}\n\
         - Compliance score: {}%\n\
         \n\
         [Generated label]\n\
         {}\n\
         Thank you.",
        settings.product_name,
        settings.target_market,
        settings.target_language,
        compliance_score,
        label_text,
    );

    format!(
        "mailto:{}?subject={}&body={}",
        operator_email,
        urlencoding::encode(&subject),
        urlencoding::encode(&body)
    )
}

// ============================================================================
// TESTS
// ============================================================================
