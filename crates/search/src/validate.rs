//! Nutritional completeness filter.
//!
//! This is a completeness heuristic, not a correctness check: sparse but
//! accurate records (diet soda, plain oil) are dropped on purpose because
//! only fully described foods are offered for logging.

use crate::candidate::{FoodCandidate, UNKNOWN_FOOD};

/// Upper bound on calories per serving.
pub const MAX_CALORIES: f64 = 900.0;

/// Whether a candidate is complete enough to show.
pub fn is_complete(food: &FoodCandidate) -> bool {
    let name = food.name.trim();
    if name.is_empty() || name == UNKNOWN_FOOD {
        return false;
    }

    let n = &food.nutrients;
    // NaN fails every comparison below
    n.calories > 0.0 && n.calories <= MAX_CALORIES && n.protein > 0.0 && n.carbs > 0.0 && n.fats > 0.0
}

/// Keep only complete candidates, preserving order.
pub fn retain_complete(foods: Vec<FoodCandidate>) -> Vec<FoodCandidate> {
    foods.into_iter().filter(is_complete).collect()
}
