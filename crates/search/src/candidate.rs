//! Normalized food candidate model.

use crate::category::FoodCategory;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Name given to records the provider did not describe.
pub const UNKNOWN_FOOD: &str = "Unknown Food";

/// Provider classification of a record.
///
/// Serialized back to the provider's own spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DataType {
    /// Commercial product with a brand owner
    Branded,
    /// Foundation Foods
    Foundation,
    /// Survey (FNDDS)
    SurveyFndds,
    /// SR Legacy
    SrLegacy,
    /// Anything else the provider sends
    Other(String),
}

impl DataType {
    /// Provider spelling
    pub fn as_str(&self) -> &str {
        match self {
            Self::Branded => "Branded",
            Self::Foundation => "Foundation",
            Self::SurveyFndds => "Survey (FNDDS)",
            Self::SrLegacy => "SR Legacy",
            Self::Other(s) => s,
        }
    }
}

impl Default for DataType {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for DataType {
    fn from(value: &str) -> Self {
        match value {
            "Branded" => Self::Branded,
            "Foundation" => Self::Foundation,
            "Survey (FNDDS)" => Self::SurveyFndds,
            "SR Legacy" => Self::SrLegacy,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for DataType {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<DataType> for String {
    fn from(value: DataType) -> Self {
        match value {
            DataType::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-serving nutrient values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Nutrients {
    /// Energy (kcal)
    pub calories: f64,
    /// Protein (g)
    pub protein: f64,
    /// Carbohydrate by difference (g)
    pub carbs: f64,
    /// Total lipid (g)
    pub fats: f64,
    /// Dietary fiber (g)
    pub fiber: f64,
    /// Total sugars (g)
    pub sugar: f64,
    /// Sodium (mg)
    pub sodium: f64,
    /// Saturated fatty acids (g)
    pub saturated_fat: f64,
    /// Cholesterol (mg)
    pub cholesterol: f64,
    /// Potassium (mg)
    pub potassium: f64,
    /// Calcium (mg)
    pub calcium: f64,
    /// Iron (mg)
    pub iron: f64,
    /// Vitamin C (mg)
    pub vitamin_c: f64,
}

/// A food record at any stage of the search pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCandidate {
    /// Local identifier (`fdc_<id>`)
    pub id: String,
    /// Provider identifier
    pub external_id: String,
    /// Display name
    pub name: String,
    /// Brand owner or brand name
    #[serde(default)]
    pub brand: Option<String>,
    /// Nutrient values
    #[serde(flatten)]
    pub nutrients: Nutrients,
    /// Serving size amount
    pub serving_size: f64,
    /// Serving size unit
    pub serving_unit: String,
    /// Derived classification
    pub category: FoodCategory,
    /// Provider classification
    pub data_type: DataType,
    /// Ingredient statement, branded items only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

impl FoodCandidate {
    /// Create a candidate with default serving metadata and zeroed nutrients.
    pub fn new(external_id: impl Into<String>, name: impl Into<String>) -> Self {
        let external_id = external_id.into();
        Self {
            id: format!("fdc_{external_id}"),
            external_id,
            name: name.into(),
            brand: None,
            nutrients: Nutrients::default(),
            serving_size: 100.0,
            serving_unit: "g".to_string(),
            category: FoodCategory::Other,
            data_type: DataType::default(),
            ingredients: None,
        }
    }

    /// Set the brand
    #[must_use]
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Set the provider classification
    #[must_use]
    pub fn with_data_type(mut self, data_type: impl Into<DataType>) -> Self {
        self.data_type = data_type.into();
        self
    }

    /// Set calories and the three macronutrients
    #[must_use]
    pub fn with_macros(mut self, calories: f64, protein: f64, carbs: f64, fats: f64) -> Self {
        self.nutrients.calories = calories;
        self.nutrients.protein = protein;
        self.nutrients.carbs = carbs;
        self.nutrients.fats = fats;
        self
    }

    /// Set the full nutrient panel
    #[must_use]
    pub fn with_nutrients(mut self, nutrients: Nutrients) -> Self {
        self.nutrients = nutrients;
        self
    }

    /// Set the serving size
    #[must_use]
    pub fn with_serving(mut self, size: f64, unit: impl Into<String>) -> Self {
        self.serving_size = size;
        self.serving_unit = unit.into();
        self
    }

    /// Brand, if present and not blank
    pub fn brand_str(&self) -> Option<&str> {
        self.brand.as_deref().map(str::trim).filter(|b| !b.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_type_round_trip_spelling() {
        assert_eq!(DataType::from("Survey (FNDDS)"), DataType::SurveyFndds);
        assert_eq!(DataType::SurveyFndds.as_str(), "Survey (FNDDS)");
        assert_eq!(
            DataType::from("Experimental"),
            DataType::Other("Experimental".to_string())
        );
    }

    #[test]
    fn test_candidate_serializes_flat_camel_case() {
        let food = FoodCandidate::new("171477", "Chicken breast")
            .with_data_type("SR Legacy")
            .with_macros(165.0, 31.0, 0.1, 3.6);

        let json = serde_json::to_value(&food).unwrap();
        assert_eq!(json["externalId"], "171477");
        assert_eq!(json["id"], "fdc_171477");
        assert_eq!(json["calories"], 165.0);
        assert_eq!(json["dataType"], "SR Legacy");
        assert_eq!(json["servingUnit"], "g");
        assert!(json.get("ingredients").is_none());
    }

    #[test]
    fn test_brand_str_ignores_blank() {
        let food = FoodCandidate::new("1", "Oats").with_brand("   ");
        assert_eq!(food.brand_str(), None);
    }
}
