//! Keyword-based food classification.
//!
//! Keywords match whole words, so "oil" does not fire on "boiled" and
//! "egg" does not fire on "eggplant". A trailing `s` or `es` is accepted
//! for plurals.

use crate::normalize::normalized_words;
use serde::{Deserialize, Serialize};

/// Single-label food classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FoodCategory {
    /// Meat, fish, eggs, legume proteins
    Protein,
    /// Cereals, bread, rice, pasta
    Grain,
    /// Vegetables and legumes
    Vegetable,
    /// Fruit
    Fruit,
    /// Milk products
    Dairy,
    /// Nuts and seeds
    Nuts,
    /// Oils, avocado, olives
    HealthyFat,
    /// Powders, bars, pills
    Supplement,
    /// No keyword matched
    Other,
}

/// Checked in order; the first category with a matching keyword wins.
const KEYWORDS: &[(FoodCategory, &[&str])] = &[
    (
        FoodCategory::Supplement,
        &[
            "protein powder",
            "whey",
            "casein",
            "creatine",
            "supplement",
            "protein bar",
            "multivitamin",
            "bcaa",
            "collagen",
        ],
    ),
    (
        FoodCategory::Nuts,
        &[
            "almond",
            "peanut",
            "cashew",
            "walnut",
            "pecan",
            "pistachio",
            "hazelnut",
            "macadamia",
            "nut butter",
            "chia",
            "flax",
            "sunflower seed",
            "pumpkin seed",
        ],
    ),
    (
        FoodCategory::HealthyFat,
        &["avocado", "olive", "oil", "coconut", "ghee"],
    ),
    (
        FoodCategory::Dairy,
        &[
            "milk", "cheese", "yogurt", "yoghurt", "kefir", "cottage", "cream", "butter",
        ],
    ),
    (
        FoodCategory::Protein,
        &[
            "chicken", "beef", "turkey", "pork", "fish", "salmon", "tuna", "egg", "shrimp",
            "tofu", "tempeh", "steak", "ham", "lamb", "bacon", "sausage", "cod", "tilapia",
            "burger", "hamburger", "cheeseburger",
        ],
    ),
    (
        FoodCategory::Grain,
        &[
            "rice", "bread", "oat", "pasta", "wheat", "quinoa", "cereal", "barley", "tortilla",
            "cracker", "noodle", "bagel", "granola", "couscous",
        ],
    ),
    (
        FoodCategory::Fruit,
        &[
            "apple",
            "banana",
            "berry",
            "berries",
            "orange",
            "grape",
            "mango",
            "pineapple",
            "peach",
            "pear",
            "cherry",
            "cherries",
            "melon",
            "kiwi",
            "plum",
            "lemon",
        ],
    ),
    (
        FoodCategory::Vegetable,
        &[
            "broccoli", "spinach", "carrot", "lettuce", "kale", "tomato", "pepper", "onion",
            "potato", "bean", "lentil", "pea", "cucumber", "celery", "cabbage", "squash",
            "zucchini", "corn", "cauliflower", "asparagus", "eggplant",
        ],
    ),
];

impl FoodCategory {
    /// Classify a food from its name, falling back to its ingredient list.
    ///
    /// The name is tried first so that a single minor ingredient does not
    /// override what the product obviously is.
    pub fn classify(name: &str, ingredients: Option<&str>) -> Self {
        classify_text(name)
            .or_else(|| ingredients.and_then(classify_text))
            .unwrap_or(Self::Other)
    }

    /// Snake-case label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Protein => "protein",
            Self::Grain => "grain",
            Self::Vegetable => "vegetable",
            Self::Fruit => "fruit",
            Self::Dairy => "dairy",
            Self::Nuts => "nuts",
            Self::HealthyFat => "healthy_fat",
            Self::Supplement => "supplement",
            Self::Other => "other",
        }
    }
}

fn classify_text(text: &str) -> Option<FoodCategory> {
    let words = normalized_words(text);
    KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| contains_keyword(&words, k)))
        .map(|(category, _)| *category)
}

/// Whether `keyword` (one word or a phrase) appears as consecutive words.
fn contains_keyword(words: &[String], keyword: &str) -> bool {
    let phrase: Vec<&str> = keyword.split_whitespace().collect();
    if phrase.is_empty() || phrase.len() > words.len() {
        return false;
    }
    words.windows(phrase.len()).any(|window| {
        window
            .iter()
            .zip(&phrase)
            .all(|(word, expected)| word_matches(word, expected))
    })
}

fn word_matches(word: &str, keyword: &str) -> bool {
    word.strip_prefix(keyword)
        .is_some_and(|rest| matches!(rest, "" | "s" | "es"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_keywords() {
        assert_eq!(FoodCategory::classify("Chicken breast, roasted", None), FoodCategory::Protein);
        assert_eq!(FoodCategory::classify("Bananas, raw", None), FoodCategory::Fruit);
        assert_eq!(FoodCategory::classify("Greek Yogurt", None), FoodCategory::Dairy);
        assert_eq!(FoodCategory::classify("Brown rice, cooked", None), FoodCategory::Grain);
        assert_eq!(FoodCategory::classify("Broccoli florets", None), FoodCategory::Vegetable);
        assert_eq!(FoodCategory::classify("Extra virgin olive oil", None), FoodCategory::HealthyFat);
    }

    #[test]
    fn test_priority_order() {
        // "peanut" must not be read as a pea
        assert_eq!(FoodCategory::classify("Peanut butter", None), FoodCategory::Nuts);
        assert_eq!(
            FoodCategory::classify("Whey protein powder, vanilla", None),
            FoodCategory::Supplement
        );
    }

    #[test]
    fn test_keywords_match_whole_words() {
        assert_eq!(FoodCategory::classify("Potatoes, boiled", None), FoodCategory::Vegetable);
        assert_eq!(FoodCategory::classify("Broccoli, boiled", None), FoodCategory::Vegetable);
        assert_eq!(
            FoodCategory::classify("Egg, whole, hard-boiled", None),
            FoodCategory::Protein
        );
        assert_eq!(FoodCategory::classify("Eggplant, raw", None), FoodCategory::Vegetable);
        assert_eq!(FoodCategory::classify("Goat, roasted", None), FoodCategory::Other);
        assert_eq!(FoodCategory::classify("Hamburger, plain", None), FoodCategory::Protein);
        assert_eq!(FoodCategory::classify("Chocolate coated pretzels", None), FoodCategory::Other);
    }

    #[test]
    fn test_plurals_and_phrases() {
        assert_eq!(FoodCategory::classify("Oats, rolled", None), FoodCategory::Grain);
        assert_eq!(FoodCategory::classify("Tomatoes, red, ripe", None), FoodCategory::Vegetable);
        assert_eq!(
            FoodCategory::classify("Roasted sunflower seeds", None),
            FoodCategory::Nuts
        );
        // "protein" alone is not the "protein powder" phrase
        assert_eq!(FoodCategory::classify("High protein yogurt", None), FoodCategory::Dairy);
    }

    #[test]
    fn test_ingredients_fallback() {
        assert_eq!(
            FoodCategory::classify("Big Mac", Some("Beef patty, bun, pickles")),
            FoodCategory::Protein
        );
        assert_eq!(FoodCategory::classify("Mystery snack", None), FoodCategory::Other);
    }

    #[test]
    fn test_serialized_label() {
        let json = serde_json::to_string(&FoodCategory::HealthyFat).unwrap();
        assert_eq!(json, "\"healthy_fat\"");
        assert_eq!(FoodCategory::HealthyFat.as_str(), "healthy_fat");
    }
}
