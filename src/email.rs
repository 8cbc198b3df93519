// 📧 Lead Email - operator notification for a submitted label draft
// Lead payload, its validation, and the HTML body sent to the operator.
//
// All user-supplied text is HTML-escaped before interpolation.

use crate::ingredients::Ingredient;
use crate::nutrition::NutritionFacts;
use crate::settings::{is_valid_email, TargetMarket};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

// ============================================================================
// LEAD REQUEST
// ============================================================================

/// Body of a lead submission: settings, inputs and the rendered draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadRequest {
    pub email: String,
    pub product_name: String,
    pub target_market: TargetMarket,
    pub target_language: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(deserialize_with = "every_nutrient")]
    pub nutrition: NutritionFacts,
    pub label_output: String,
    pub compliance_score: f64,
}

/// A lead must declare all eight nutrients; a missing key is rejected
/// rather than read as zero.
fn every_nutrient<'de, D>(deserializer: D) -> Result<NutritionFacts, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    struct Declared {
        kcal: f64,
        sodium: f64,
        fat: f64,
        saturates: f64,
        carbs: f64,
        sugars: f64,
        protein: f64,
        fibre: f64,
    }

    let d = Declared::deserialize(deserializer)?;
    Ok(NutritionFacts {
        kcal: d.kcal,
        sodium: d.sodium,
        fat: d.fat,
        saturates: d.saturates,
        carbs: d.carbs,
        sugars: d.sugars,
        protein: d.protein,
        fibre: d.fibre,
    })
}

/// Validation failures grouped the way the web form displays them
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldErrors {
    /// Problems not tied to one field (e.g. malformed JSON)
    pub form_errors: Vec<String>,
    pub field_errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
    pub fn form(message: impl Into<String>) -> Self {
        FieldErrors {
            form_errors: vec![message.into()],
            field_errors: BTreeMap::new(),
        }
    }

    fn add(&mut self, field: &str, message: &str) {
        self.field_errors
            .entry(field.to_string())
            .or_default()
            .push(message.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.form_errors.is_empty() && self.field_errors.is_empty()
    }
}

impl LeadRequest {
    /// Check the whole payload, reporting every failing field
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::default();

        // checked as sent: it becomes the reply-to address verbatim
        if !is_valid_email(&self.email) {
            errors.add("email", "Please enter a valid email address");
        }
        if self.product_name.trim().is_empty() {
            errors.add("productName", "Please enter a product name");
        }
        if self.target_language.trim().is_empty() {
            errors.add("targetLanguage", "Please enter the sales language");
        }

        if self.ingredients.is_empty() {
            errors.add("ingredients", "Please add at least one ingredient");
        }
        for ingredient in &self.ingredients {
            if ingredient.name.trim().is_empty() {
                errors.add("ingredients", "Please enter an ingredient name");
            }
            if !(0.0..=100.0).contains(&ingredient.percent) {
                errors.add("ingredients", "Percent must be between 0 and 100");
            }
        }

        if !self.nutrition.all_non_negative() {
            errors.add("nutrition", "Nutrition values must be 0 or greater");
        }
        if !(0.0..=100.0).contains(&self.compliance_score) {
            errors.add("complianceScore", "Compliance score must be between 0 and 100");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

// ============================================================================
// SUBMITTED LEAD
// ============================================================================

/// A validated lead stamped with a reference id for follow-up
#[derive(Debug, Clone)]
pub struct SubmittedLead {
    pub reference: Uuid,
    pub received_at: DateTime<Utc>,
    pub lead: LeadRequest,
}

impl SubmittedLead {
    pub fn new(lead: LeadRequest) -> Self {
        SubmittedLead {
            reference: Uuid::new_v4(),
            received_at: Utc::now(),
            lead,
        }
    }
}

/// Subject line for the operator notification
pub fn email_subject(lead: &LeadRequest) -> String {
    format!("[Label lead] {} - {}", lead.product_name, lead.target_market)
}

// ============================================================================
// HTML BODY
// ============================================================================

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

const CELL_LABEL: &str =
    "padding: 8px; border: 1px solid #e2e8f0; background: #f8fafc;";
const CELL_VALUE: &str = "padding: 8px; border: 1px solid #e2e8f0;";

fn table_row(label: &str, value_html: &str) -> String {
    format!(
        "        <tr>\n          <td style=\"{}\"><strong>{}</strong></td>\n          <td style=\"{}\">{}</td>\n        </tr>\n",
        CELL_LABEL, label, CELL_VALUE, value_html
    )
}

/// Render the operator notification email.
///
/// Project table, ingredient list, nutrition table, the label text as
/// submitted, and a footer with the lead reference.
pub fn render_email_html(submitted: &SubmittedLead) -> String {
    let lead = &submitted.lead;
    let email = escape_html(&lead.email);

    let mut project = String::new();
    project.push_str(&table_row(
        "Email",
        &format!("<a href=\"mailto:{0}\">{0}</a>", email),
    ));
    project.push_str(&table_row("Product", &escape_html(&lead.product_name)));
    project.push_str(&table_row("Target market", lead.target_market.as_str()));
    project.push_str(&table_row("Language", &escape_html(&lead.target_language)));
    project.push_str(&table_row(
        "Compliance score",
        &format!("{}%", lead.compliance_score),
    ));

    let ingredient_items: String = lead
        .ingredients
        .iter()
        .map(|i| format!("<li>{}: {}%</li>", escape_html(&i.name), i.percent))
        .collect();

    let mut nutrition_rows = String::new();
    for (field, value) in lead.nutrition.values() {
        nutrition_rows.push_str(&table_row(
            field.label(),
            &format!("{} {}", value, field.unit()),
        ));
    }

    format!(
        r#"
    <div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
      <h1 style="color: #0F172A; border-bottom: 2px solid #1E3A5F; padding-bottom: 10px;">
        New labelling lead
      </h1>

      <h2 style="color: #1E3A5F;">Project</h2>
      <table style="width: 100%; border-collapse: collapse;">
{project}      </table>

      <h2 style="color: #1E3A5F; margin-top: 24px;">Ingredients</h2>
      <ul style="background: #f8fafc; padding: 16px 32px; border-radius: 8px;">
        {ingredients}
      </ul>

      <h2 style="color: #1E3A5F; margin-top: 24px;">Nutrition (per 100g)</h2>
      <table style="width: 100%; border-collapse: collapse;">
{nutrition}      </table>

      <h2 style="color: #1E3A5F; margin-top: 24px;">Generated label</h2>
      <pre style="background: #1e293b; color: #e2e8f0; padding: 16px; border-radius: 8px; overflow-x: auto; font-size: 12px; line-height: 1.6;">
{label}
      </pre>

      <hr style="margin: 24px 0; border: none; border-top: 1px solid #e2e8f0;" />
      <p style="color: #64748b; font-size: 12px;">
        Sent automatically by the label draft service.<br />
        Reference: {reference} &middot; received {received}<br />
        Contact: <a href="mailto:{email}">{email}</a>
      </p>
    </div>
  "#,
        project = project,
        ingredients = ingredient_items,
        nutrition = nutrition_rows,
        label = escape_html(&lead.label_output),
        reference = submitted.reference,
        received = submitted.received_at.format("%Y-%m-%d %H:%M UTC"),
        email = email,
    )
}

// ============================================================================
// TESTS
// ============================================================================
