// End-to-end checks over the public library API

use approx::assert_relative_eq;
use label_draft::compliance::GOOD_SCORE_THRESHOLD;
use label_draft::{
    detect_all, draft_label, is_sorted_descending, kcal_to_kj, sodium_to_salt, validate_add,
    AllergenTag, ComplianceBand, Ingredient, IngredientList, NutritionFacts, Project,
    ProjectSettings, TargetMarket, ValidationError,
};

fn rice_cake(market: TargetMarket) -> ProjectSettings {
    ProjectSettings {
        email: "export@example.com".to_string(),
        product_name: "Rice Cake".to_string(),
        target_market: market,
        target_language: "English".to_string(),
    }
}

fn inputs() -> Vec<Ingredient> {
    vec![
        Ingredient::new("wheat flour", 10.0),
        Ingredient::new("rice", 60.0),
        Ingredient::new("water", 30.0),
    ]
}

#[test]
fn test_insertion_order_does_not_matter() {
    let orders = [[0, 1, 2], [0, 2, 1], [1, 0, 2], [1, 2, 0], [2, 0, 1], [2, 1, 0]];
    let source = inputs();

    for order in orders {
        let mut list = IngredientList::new();
        for i in order {
            list.insert(source[i].clone());
        }
        let names: Vec<&str> = list.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["rice", "water", "wheat flour"]);
        assert!(is_sorted_descending(list.as_slice()));
    }
}

#[test]
fn test_eu_rice_cake_draft() {
    let list = IngredientList::from_unsorted(inputs());
    let nutrition = NutritionFacts {
        kcal: 200.0,
        sodium: 300.0,
        ..NutritionFacts::default()
    };

    assert_eq!(detect_all(list.as_slice()), vec![AllergenTag::Wheat]);

    let draft = draft_label(&rice_cake(TargetMarket::EU), list.as_slice(), &nutrition);
    assert!(draft.label_text.contains("kJ"));
    assert!(draft.label_text.contains("Salt: 0.75 g"));
    assert!(draft.label_text.contains("ALLERGENS: Contains WHEAT"));
    assert_eq!(draft.compliance_score, 100);
    assert!(draft.compliance_score >= GOOD_SCORE_THRESHOLD);
    assert_eq!(draft.band, ComplianceBand::Good);
}

#[test]
fn test_us_draft_keeps_sodium_in_mg() {
    let list = IngredientList::from_unsorted(inputs());
    let nutrition = NutritionFacts {
        kcal: 200.0,
        sodium: 300.0,
        ..NutritionFacts::default()
    };

    let draft = draft_label(&rice_cake(TargetMarket::US), list.as_slice(), &nutrition);
    assert!(draft.label_text.contains("Calories: 200 kcal"));
    assert!(draft.label_text.contains("Sodium: 300 mg"));
    assert!(!draft.label_text.contains("kJ"));
}

#[test]
fn test_project_file_is_sorted_before_drafting() {
    let project: Project = serde_json::from_str(
        r#"{
            "settings": { "email": "a@b.co", "productName": "Kimchi", "targetMarket": "US" },
            "ingredients": [
                { "name": "shrimp paste", "percent": 5 },
                { "name": "napa cabbage", "percent": 80 }
            ]
        }"#,
    )
    .unwrap();

    let draft = project.draft();
    assert!(draft.label_text.contains("napa cabbage, **SHRIMP PASTE**"));
    assert_eq!(draft.allergens, vec![AllergenTag::Crustaceans]);
    assert_relative_eq!(draft.total_percent, 85.0);
}

#[test]
fn test_form_validation() {
    assert_eq!(validate_add("", "5"), Err(ValidationError::EmptyName));
    assert_eq!(validate_add("Sugar", "150"), Err(ValidationError::OutOfRange));
    assert_eq!(validate_add("Sugar", "abc"), Err(ValidationError::OutOfRange));
    assert_eq!(validate_add("Sugar", "12.5"), Ok(Ingredient::new("Sugar", 12.5)));
}

#[test]
fn test_conversions() {
    assert_relative_eq!(sodium_to_salt(300.0), 0.75);
    assert_relative_eq!(kcal_to_kj(200.0), 837.0);
    assert_relative_eq!(kcal_to_kj(0.0), 0.0);
}
