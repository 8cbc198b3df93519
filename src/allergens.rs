// 🥜 Allergen Detection - keyword table as data
// Maps ingredient names to the 14 EU allergen categories (Regulation 1169/2011 Annex II)
//
// Matching is case-insensitive substring containment, not word-boundary matching.
// The first category in declaration order wins for a given ingredient.

use crate::ingredients::Ingredient;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ALLERGEN TAG
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AllergenTag {
    Wheat,
    Soy,
    Fish,
    Egg,
    Milk,
    Nuts,
    Peanuts,
    Crustaceans,
    Celery,
    Mustard,
    Sesame,
    Sulphites,
    Lupin,
    Molluscs,
}

impl AllergenTag {
    /// All tags in table declaration order
    pub const ALL: [AllergenTag; 14] = [
        AllergenTag::Wheat,
        AllergenTag::Soy,
        AllergenTag::Fish,
        AllergenTag::Egg,
        AllergenTag::Milk,
        AllergenTag::Nuts,
        AllergenTag::Peanuts,
        AllergenTag::Crustaceans,
        AllergenTag::Celery,
        AllergenTag::Mustard,
        AllergenTag::Sesame,
        AllergenTag::Sulphites,
        AllergenTag::Lupin,
        AllergenTag::Molluscs,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AllergenTag::Wheat => "WHEAT",
            AllergenTag::Soy => "SOY",
            AllergenTag::Fish => "FISH",
            AllergenTag::Egg => "EGG",
            AllergenTag::Milk => "MILK",
            AllergenTag::Nuts => "NUTS",
            AllergenTag::Peanuts => "PEANUTS",
            AllergenTag::Crustaceans => "CRUSTACEANS",
            AllergenTag::Celery => "CELERY",
            AllergenTag::Mustard => "MUSTARD",
            AllergenTag::Sesame => "SESAME",
            AllergenTag::Sulphites => "SULPHITES",
            AllergenTag::Lupin => "LUPIN",
            AllergenTag::Molluscs => "MOLLUSCS",
        }
    }

    /// Keywords that flag this allergen (already lower-case)
    pub fn keywords(&self) -> &'static [&'static str] {
        ALLERGEN_KEYWORDS
            .iter()
            .find(|(tag, _)| tag == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }

    /// Does the already lower-cased name contain any of this tag's keywords?
    fn matches_lowercase(&self, lower_name: &str) -> bool {
        self.keywords().iter().any(|keyword| lower_name.contains(keyword))
    }
}

impl fmt::Display for AllergenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// KEYWORD TABLE
// ============================================================================

/// The one keyword table every detection path reads from.
/// Order matters: it decides which tag wins when a name matches several.
pub static ALLERGEN_KEYWORDS: [(AllergenTag, &[&str]); 14] = [
    (AllergenTag::Wheat, &["밀", "wheat", "밀가루", "flour", "글루텐", "gluten"]),
    (AllergenTag::Soy, &["대두", "콩", "soy", "soybean", "간장", "soy sauce"]),
    (AllergenTag::Fish, &["생선", "어류", "fish", "멸치", "참치", "anchovy", "tuna"]),
    (AllergenTag::Egg, &["계란", "달걀", "egg", "난백", "난황"]),
    (AllergenTag::Milk, &["우유", "유제품", "milk", "유청", "크림", "cream", "whey"]),
    (
        AllergenTag::Nuts,
        &["견과류", "호두", "아몬드", "캐슈넛", "nuts", "walnut", "almond", "cashew"],
    ),
    (AllergenTag::Peanuts, &["땅콩", "peanut"]),
    (
        AllergenTag::Crustaceans,
        &["갑각류", "새우", "게", "랍스터", "shrimp", "crab", "lobster", "crustacean"],
    ),
    (AllergenTag::Celery, &["셀러리", "celery"]),
    (AllergenTag::Mustard, &["겨자", "mustard"]),
    (AllergenTag::Sesame, &["참깨", "깨", "sesame"]),
    (AllergenTag::Sulphites, &["아황산", "아황산염", "sulphite", "sulfite", "so2"]),
    (AllergenTag::Lupin, &["루핀", "lupin"]),
    (
        AllergenTag::Molluscs,
        &["연체류", "조개", "굴", "오징어", "문어", "mollusc", "oyster", "squid", "octopus"],
    ),
];

// ============================================================================
// DETECTION
// ============================================================================

/// Detect the allergen category of a single ingredient name.
///
/// Returns the first tag (in table order) with a keyword contained in the
/// lower-cased name. Names with no keyword hit are never flagged, even when
/// they are allergens in reality.
pub fn detect(ingredient_name: &str) -> Option<AllergenTag> {
    let lower_name = ingredient_name.to_lowercase();
    ALLERGEN_KEYWORDS
        .iter()
        .map(|(tag, _)| *tag)
        .find(|tag| tag.matches_lowercase(&lower_name))
}

/// Distinct tags across all ingredients, in first-seen order.
pub fn detect_all(ingredients: &[Ingredient]) -> Vec<AllergenTag> {
    let mut found: Vec<AllergenTag> = Vec::new();
    for tag in ingredients.iter().filter_map(|i| detect(&i.name)) {
        if !found.contains(&tag) {
            found.push(tag);
        }
    }
    tracing::debug!(count = found.len(), "allergen scan complete");
    found
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredient(name: &str, percent: f64) -> Ingredient {
        Ingredient {
            name: name.to_string(),
            percent,
        }
    }

    #[test]
    fn test_detect_is_case_and_language_insensitive() {
        assert_eq!(detect("밀가루"), Some(AllergenTag::Wheat));
        assert_eq!(detect("wheat flour"), Some(AllergenTag::Wheat));
        assert_eq!(detect("Wheat Flour"), Some(AllergenTag::Wheat));
        assert_eq!(detect("GLUTEN"), Some(AllergenTag::Wheat));
    }

    #[test]
    fn test_detect_no_match() {
        assert_eq!(detect("water"), None);
        assert_eq!(detect("rice"), None);
        assert_eq!(detect(""), None);
    }

    #[test]
    fn test_detect_substring_not_word_boundary() {
        // "eggplant" contains "egg"
        assert_eq!(detect("eggplant"), Some(AllergenTag::Egg));
        assert_eq!(detect("skimmed milk powder"), Some(AllergenTag::Milk));
        assert_eq!(detect("SO2 preservative"), Some(AllergenTag::Sulphites));
    }

    #[test]
    fn test_detect_first_match_wins() {
        // "peanuts" contains "nuts" and NUTS precedes PEANUTS in the table
        assert_eq!(detect("roasted peanuts"), Some(AllergenTag::Nuts));
        assert_eq!(detect("peanut"), Some(AllergenTag::Peanuts));
        // soy sauce made with wheat reports WHEAT only
        assert_eq!(detect("soy sauce (wheat)"), Some(AllergenTag::Wheat));
    }

    #[test]
    fn test_detect_korean_keywords() {
        assert_eq!(detect("간장"), Some(AllergenTag::Soy));
        assert_eq!(detect("새우젓"), Some(AllergenTag::Crustaceans));
        assert_eq!(detect("참깨"), Some(AllergenTag::Sesame));
        assert_eq!(detect("굴소스"), Some(AllergenTag::Molluscs));
    }

    #[test]
    fn test_detect_all_distinct_first_seen() {
        let list = vec![
            ingredient("milk chocolate", 40.0),
            ingredient("wheat flour", 30.0),
            ingredient("cream", 20.0),
            ingredient("water", 10.0),
        ];
        assert_eq!(detect_all(&list), vec![AllergenTag::Milk, AllergenTag::Wheat]);
    }

    #[test]
    fn test_detect_all_empty() {
        assert!(detect_all(&[]).is_empty());
        assert!(detect_all(&[ingredient("water", 100.0)]).is_empty());
    }

    #[test]
    fn test_table_covers_every_tag_in_order() {
        let table_order: Vec<AllergenTag> = ALLERGEN_KEYWORDS.iter().map(|(t, _)| *t).collect();
        assert_eq!(table_order, AllergenTag::ALL.to_vec());
        for tag in AllergenTag::ALL {
            assert!(!tag.keywords().is_empty(), "{} has no keywords", tag);
            for keyword in tag.keywords() {
                assert_eq!(*keyword, keyword.to_lowercase());
            }
        }
    }

    #[test]
    fn test_tag_serde_form() {
        assert_eq!(serde_json::to_string(&AllergenTag::Crustaceans).unwrap(), "\"CRUSTACEANS\"");
        let tag: AllergenTag = serde_json::from_str("\"SULPHITES\"").unwrap();
        assert_eq!(tag, AllergenTag::Sulphites);
        assert_eq!(AllergenTag::Molluscs.to_string(), "MOLLUSCS");
    }
}
