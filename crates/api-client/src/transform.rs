//! Provider records to food candidates

use crate::endpoints::FdcFood;
use nutrisearch_search::{FoodCandidate, FoodCategory, Nutrients, UNKNOWN_FOOD};

/// Default serving when the provider gives none
const DEFAULT_SERVING_SIZE: f64 = 100.0;
const DEFAULT_SERVING_UNIT: &str = "g";

/// Nutrient type id to its field in [`Nutrients`]
fn slot(nutrients: &mut Nutrients, id: u32) -> Option<&mut f64> {
    let field = match id {
        1008 => &mut nutrients.calories,
        1003 => &mut nutrients.protein,
        1005 => &mut nutrients.carbs,
        1004 => &mut nutrients.fats,
        1079 => &mut nutrients.fiber,
        2000 => &mut nutrients.sugar,
        1093 => &mut nutrients.sodium,
        1258 => &mut nutrients.saturated_fat,
        1253 => &mut nutrients.cholesterol,
        1092 => &mut nutrients.potassium,
        1087 => &mut nutrients.calcium,
        1089 => &mut nutrients.iron,
        1162 => &mut nutrients.vitamin_c,
        _ => return None,
    };
    Some(field)
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Extract the mapped nutrients; unmapped ids are ignored
#[must_use]
pub fn extract_nutrients(food: &FdcFood) -> Nutrients {
    let mut nutrients = Nutrients::default();
    for entry in &food.food_nutrients {
        let (Some(id), Some(quantity)) = (entry.id(), entry.quantity()) else {
            continue;
        };
        if let Some(field) = slot(&mut nutrients, id) {
            *field = round1(quantity);
        }
    }
    nutrients
}

/// Build a candidate from a provider record
#[must_use]
pub fn to_candidate(food: &FdcFood) -> FoodCandidate {
    let name = non_blank(food.description.as_ref()).unwrap_or_else(|| UNKNOWN_FOOD.to_string());
    let ingredients = non_blank(food.ingredients.as_ref());
    let category = FoodCategory::classify(&name, ingredients.as_deref());

    let mut candidate = FoodCandidate::new(food.fdc_id.to_string(), name)
        .with_nutrients(extract_nutrients(food))
        .with_serving(
            food.serving_size
                .filter(|s| *s > 0.0)
                .unwrap_or(DEFAULT_SERVING_SIZE),
            non_blank(food.serving_size_unit.as_ref())
                .unwrap_or_else(|| DEFAULT_SERVING_UNIT.to_string()),
        )
        .with_data_type(food.data_type.as_deref().unwrap_or_default());

    candidate.brand = non_blank(food.brand_owner.as_ref()).or_else(|| non_blank(food.brand_name.as_ref()));
    candidate.category = category;
    candidate.ingredients = ingredients;
    candidate
}

/// Transform a page of provider records
#[must_use]
pub fn to_candidates(foods: &[FdcFood]) -> Vec<FoodCandidate> {
    foods.iter().map(to_candidate).collect()
}
