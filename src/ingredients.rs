// 🥗 Ingredient List - validation and weight ordering
// Ingredients are always kept sorted by descending percent (FIC Article 18).
//
// Ties keep their insertion order: the sort is stable.
// Duplicates are allowed and never merged.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

// ============================================================================
// INGREDIENT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Name as entered (trimmed)
    pub name: String,

    /// Share of total weight, 0-100
    pub percent: f64,
}

impl Ingredient {
    pub fn new(name: impl Into<String>, percent: f64) -> Self {
        Ingredient {
            name: name.into(),
            percent,
        }
    }
}

/// Validate raw form input for a new ingredient.
///
/// The name must be non-blank; `percent_raw` must parse to a finite number in
/// `[0, 100]`. The returned ingredient carries the trimmed name.
pub fn validate_add(name: &str, percent_raw: &str) -> Result<Ingredient, ValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    let percent = percent_raw
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && (0.0..=100.0).contains(p))
        .ok_or(ValidationError::OutOfRange)?;
    // "-0" parses to -0.0; store the plain zero
    let percent = percent + 0.0;

    Ok(Ingredient::new(name, percent))
}

/// True when no entry has a larger percent than the one before it.
///
/// Computed from scratch, without trusting the list's own ordering.
pub fn is_sorted_descending(ingredients: &[Ingredient]) -> bool {
    ingredients
        .windows(2)
        .all(|pair| pair[0].percent >= pair[1].percent)
}

// ============================================================================
// INGREDIENT LIST
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IngredientList {
    items: Vec<Ingredient>,
}

impl IngredientList {
    pub fn new() -> Self {
        IngredientList { items: Vec::new() }
    }

    /// Build a list from arbitrary input, restoring the descending order
    pub fn from_unsorted(items: Vec<Ingredient>) -> Self {
        let mut list = IngredientList { items };
        list.sort();
        list
    }

    /// Append then re-sort the whole list (stable, descending by percent)
    pub fn insert(&mut self, item: Ingredient) {
        tracing::debug!(name = %item.name, percent = item.percent, "adding ingredient");
        self.items.push(item);
        self.sort();
    }

    /// Remove the entry at `index`
    pub fn remove(&mut self, index: usize) -> Result<Ingredient, ValidationError> {
        if index >= self.items.len() {
            return Err(ValidationError::IndexOutOfBounds(index));
        }
        Ok(self.items.remove(index))
    }

    /// Sum of all percents (may exceed 100; that is a warning, not an error)
    pub fn total_percent(&self) -> f64 {
        self.items.iter().map(|i| i.percent).sum()
    }

    pub fn exceeds_hundred(&self) -> bool {
        self.total_percent() > 100.0
    }

    /// Gate for leaving the ingredient-entry stage
    pub fn validate_non_empty(&self) -> Result<(), ValidationError> {
        if self.items.is_empty() {
            Err(ValidationError::NoIngredients)
        } else {
            Ok(())
        }
    }

    pub fn as_slice(&self) -> &[Ingredient] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Ingredient> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    fn sort(&mut self) {
        // total_cmp keeps the sort total even if a NaN sneaks in; adding 0.0
        // folds -0.0 into 0.0 so the two count as a tie
        self.items
            .sort_by(|a, b| (b.percent + 0.0).total_cmp(&(a.percent + 0.0)));
    }
}

impl From<IngredientList> for Vec<Ingredient> {
    fn from(list: IngredientList) -> Self {
        list.items
    }
}

impl<'a> IntoIterator for &'a IngredientList {
    type Item = &'a Ingredient;
    type IntoIter = std::slice::Iter<'a, Ingredient>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ============================================================================
// TESTS
// ============================================================================
