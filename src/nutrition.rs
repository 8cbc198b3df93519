// 📊 Nutrition Facts - per 100g declaration values
// Eight independent fields; no cross-field check (they are not summed against 100g).

use serde::{Deserialize, Serialize};

// ============================================================================
// NUTRIENT FIELD
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NutrientField {
    Kcal,
    Sodium,
    Fat,
    Saturates,
    Carbs,
    Sugars,
    Protein,
    Fibre,
}

impl NutrientField {
    /// Storage / wire order
    pub const ALL: [NutrientField; 8] = [
        NutrientField::Kcal,
        NutrientField::Sodium,
        NutrientField::Fat,
        NutrientField::Saturates,
        NutrientField::Carbs,
        NutrientField::Sugars,
        NutrientField::Protein,
        NutrientField::Fibre,
    ];

    /// Order the entry form asks for them in
    pub const ENTRY_ORDER: [NutrientField; 8] = [
        NutrientField::Kcal,
        NutrientField::Fat,
        NutrientField::Saturates,
        NutrientField::Carbs,
        NutrientField::Sugars,
        NutrientField::Protein,
        NutrientField::Sodium,
        NutrientField::Fibre,
    ];

    /// JSON key
    pub fn key(&self) -> &'static str {
        match self {
            NutrientField::Kcal => "kcal",
            NutrientField::Sodium => "sodium",
            NutrientField::Fat => "fat",
            NutrientField::Saturates => "saturates",
            NutrientField::Carbs => "carbs",
            NutrientField::Sugars => "sugars",
            NutrientField::Protein => "protein",
            NutrientField::Fibre => "fibre",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            NutrientField::Kcal => "Energy",
            NutrientField::Sodium => "Sodium",
            NutrientField::Fat => "Fat",
            NutrientField::Saturates => "Saturated fat",
            NutrientField::Carbs => "Carbohydrate",
            NutrientField::Sugars => "Sugars",
            NutrientField::Protein => "Protein",
            NutrientField::Fibre => "Fibre",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            NutrientField::Kcal => "kcal",
            NutrientField::Sodium => "mg",
            _ => "g",
        }
    }

    /// Example value shown as a hint when prompting
    pub fn placeholder(&self) -> &'static str {
        match self {
            NutrientField::Kcal => "350",
            NutrientField::Sodium => "500",
            NutrientField::Fat => "15",
            NutrientField::Saturates => "5",
            NutrientField::Carbs => "45",
            NutrientField::Sugars => "10",
            NutrientField::Protein => "8",
            NutrientField::Fibre => "3",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        NutrientField::ALL.into_iter().find(|f| f.key() == key)
    }
}

// ============================================================================
// NUTRITION FACTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NutritionFacts {
    /// Energy (kcal)
    pub kcal: f64,
    /// Sodium (mg)
    pub sodium: f64,
    pub fat: f64,
    pub saturates: f64,
    pub carbs: f64,
    pub sugars: f64,
    pub protein: f64,
    pub fibre: f64,
}

impl NutritionFacts {
    pub fn get(&self, field: NutrientField) -> f64 {
        match field {
            NutrientField::Kcal => self.kcal,
            NutrientField::Sodium => self.sodium,
            NutrientField::Fat => self.fat,
            NutrientField::Saturates => self.saturates,
            NutrientField::Carbs => self.carbs,
            NutrientField::Sugars => self.sugars,
            NutrientField::Protein => self.protein,
            NutrientField::Fibre => self.fibre,
        }
    }

    pub fn set(&mut self, field: NutrientField, value: f64) {
        let slot = match field {
            NutrientField::Kcal => &mut self.kcal,
            NutrientField::Sodium => &mut self.sodium,
            NutrientField::Fat => &mut self.fat,
            NutrientField::Saturates => &mut self.saturates,
            NutrientField::Carbs => &mut self.carbs,
            NutrientField::Sugars => &mut self.sugars,
            NutrientField::Protein => &mut self.protein,
            NutrientField::Fibre => &mut self.fibre,
        };
        *slot = value;
    }

    /// Set a field from form text. Anything that is not a finite number becomes 0.
    pub fn set_from_text(&mut self, field: NutrientField, raw: &str) {
        self.set(field, parse_lenient(raw));
    }

    /// (field, value) pairs in storage order
    pub fn values(&self) -> impl Iterator<Item = (NutrientField, f64)> + '_ {
        NutrientField::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    /// Every field is >= 0 (NaN fails)
    pub fn all_non_negative(&self) -> bool {
        self.values().all(|(_, v)| v >= 0.0)
    }

    /// Fields that are negative or not a number
    pub fn invalid_fields(&self) -> Vec<NutrientField> {
        self.values()
            .filter(|(_, v)| v.is_nan() || *v < 0.0)
            .map(|(f, _)| f)
            .collect()
    }
}

/// Parse user-entered numeric text, falling back to 0 for anything unusable
pub fn parse_lenient(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

// ============================================================================
// TESTS
// ============================================================================
