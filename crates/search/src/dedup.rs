//! Near-duplicate collapsing.
//!
//! Candidates are grouped by a key built from their significant name words
//! and a brand prefix; only the best-described candidate of each group
//! survives. The heuristic accepts both missed merges (wording differs in
//! a key word) and spurious ones (unrelated foods sharing the key words).

use crate::candidate::{DataType, FoodCandidate};
use crate::normalize::significant_words;
use std::collections::HashMap;

/// Grouping thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DedupConfig {
    /// Sorted significant name words in the key
    pub key_words: usize,
    /// Lowercased brand characters in the key
    pub brand_prefix_len: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            key_words: 4,
            brand_prefix_len: 10,
        }
    }
}

/// Similarity group key of a candidate.
pub fn group_key(food: &FoodCandidate, config: &DedupConfig) -> String {
    let mut words = significant_words(&food.name);
    words.sort();
    words.truncate(config.key_words);

    let brand: String = food
        .brand
        .as_deref()
        .unwrap_or_default()
        .to_lowercase()
        .chars()
        .take(config.brand_prefix_len)
        .collect();

    format!("{}|{brand}", words.join(" "))
}

/// How well described a candidate is, used to pick a group's survivor.
pub fn group_score(food: &FoodCandidate) -> i32 {
    let mut score = 0;

    match food.data_type {
        DataType::Branded if food.brand_str().is_some() => score += 30,
        DataType::SurveyFndds => score += 25,
        DataType::Foundation => score += 20,
        _ => {}
    }

    let n = &food.nutrients;
    for value in [n.protein, n.carbs, n.fats] {
        if value > 0.0 {
            score += 5;
        }
    }
    if n.fiber > 0.0 {
        score += 3;
    }

    let name_len = food.name.chars().count();
    if name_len < 50 {
        score += 10;
    } else if name_len > 100 {
        score -= 5;
    }

    if (food.serving_size - 100.0).abs() < f64::EPSILON {
        score += 8;
    }

    score
}

/// Keep the highest-scoring candidate of every group.
///
/// Groups are emitted in order of first appearance; on a score tie the
/// earlier candidate wins. Running this on its own output changes nothing.
pub fn deduplicate(foods: Vec<FoodCandidate>, config: &DedupConfig) -> Vec<FoodCandidate> {
    let mut slots: Vec<(i32, FoodCandidate)> = Vec::with_capacity(foods.len());
    let mut index: HashMap<String, usize> = HashMap::with_capacity(foods.len());

    for food in foods {
        let key = group_key(&food, config);
        let score = group_score(&food);

        match index.get(&key) {
            Some(&slot) => {
                if score > slots[slot].0 {
                    slots[slot] = (score, food);
                }
            }
            None => {
                index.insert(key, slots.len());
                slots.push((score, food));
            }
        }
    }

    slots.into_iter().map(|(_, food)| food).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn food(id: &str, name: &str) -> FoodCandidate {
        FoodCandidate::new(id, name).with_macros(100.0, 1.0, 1.0, 1.0)
    }

    #[test]
    fn test_group_key_sorted_and_truncated() {
        let config = DedupConfig::default();
        let f = food("1", "Yogurt, greek, strawberry, nonfat, vanilla").with_brand("Chobani Incorporated");
        assert_eq!(group_key(&f, &config), "greek nonfat strawberry vanilla|chobani in");
    }

    #[test]
    fn test_banana_variants_collapse() {
        let foods = vec![food("1", "Banana, raw"), food("2", "Banana raw fresh")];
        let out = deduplicate(foods, &DedupConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].external_id, "1");
    }

    #[test]
    fn test_connectives_do_not_separate_dishes() {
        let config = DedupConfig::default();
        // Connectives and descriptors are dropped from the key, so these
        // merge on purpose; any other word keeps foods apart.
        let merged = vec![
            food("1", "Chicken with rice"),
            food("2", "Chicken rice"),
            food("3", "Rice and chicken"),
        ];
        assert_eq!(deduplicate(merged, &config).len(), 1);

        let apart = vec![food("1", "Chicken rice"), food("2", "Chicken fried rice")];
        assert_eq!(deduplicate(apart, &config).len(), 2);

        let apart = vec![food("1", "Milk, whole"), food("2", "Milk, nonfat")];
        assert_eq!(deduplicate(apart, &config).len(), 2);
    }

    #[test]
    fn test_different_brands_stay_apart() {
        let foods = vec![
            food("1", "Greek Yogurt").with_brand("Chobani"),
            food("2", "Greek Yogurt").with_brand("Fage"),
        ];
        assert_eq!(deduplicate(foods, &DedupConfig::default()).len(), 2);
    }

    #[test]
    fn test_best_described_variant_wins() {
        let sparse = food("1", "Oatmeal, cooked").with_serving(240.0, "g");
        let survey = food("2", "Oatmeal cooked").with_data_type("Survey (FNDDS)");
        let out = deduplicate(vec![sparse, survey], &DedupConfig::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].external_id, "2");
    }

    #[test]
    fn test_group_score_components() {
        let mut f = FoodCandidate::new("1", "Protein bar")
            .with_brand("Quest")
            .with_data_type("Branded")
            .with_macros(200.0, 20.0, 22.0, 8.0);
        f.nutrients.fiber = 14.0;
        // 30 brand + 15 macros + 3 fiber + 10 short name + 8 serving
        assert_eq!(group_score(&f), 66);

        let long = FoodCandidate::new("2", "x".repeat(101)).with_serving(30.0, "g");
        assert_eq!(group_score(&long), -5);
    }

    #[test]
    fn test_branded_without_brand_gets_no_bonus() {
        let f = FoodCandidate::new("1", "x".repeat(60))
            .with_data_type("Branded")
            .with_serving(28.0, "g");
        assert_eq!(group_score(&f), 0);
    }

    proptest! {
        #[test]
        fn prop_deduplicate_is_idempotent(
            rows in prop::collection::vec(
                (
                    prop::sample::select(vec!["Banana raw", "Banana, fresh", "Apple", "Apple pie",
                        "Chicken breast", "Breast chicken grilled", "Rice white", "White rice"]),
                    prop::option::of(prop::sample::select(vec!["Dole", "Tyson", "Uncle Ben's"])),
                    prop::sample::select(vec!["Branded", "Foundation", "Survey (FNDDS)", "SR Legacy"]),
                    0.0f64..10.0,
                ),
                0..30,
            )
        ) {
            let foods: Vec<FoodCandidate> = rows
                .iter()
                .enumerate()
                .map(|(i, (name, brand, dt, fiber))| {
                    let mut f = food(&i.to_string(), name).with_data_type(*dt);
                    f.brand = brand.map(String::from);
                    f.nutrients.fiber = *fiber;
                    f
                })
                .collect();

            let config = DedupConfig::default();
            let once = deduplicate(foods, &config);
            let twice = deduplicate(once.clone(), &config);
            prop_assert_eq!(once, twice);
        }
    }
}
