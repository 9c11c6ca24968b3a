//! CLI command implementations

pub mod details;
pub mod search;
pub mod show_config;

use nutrisearch_search::FoodCandidate;
use owo_colors::OwoColorize;

/// Heavy rule used around section headers
const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Print a blue section header
pub fn header(title: &str) {
    println!();
    println!("{}", RULE.blue());
    println!("  {}", title.blue().bold());
    println!("{}", RULE.blue());
    println!();
}

/// One-line macro summary of a food
pub fn macro_line(food: &FoodCandidate) -> String {
    let n = &food.nutrients;
    format!(
        "{} kcal · P {:.1} g · C {:.1} g · F {:.1} g · per {} {}",
        n.calories, n.protein, n.carbs, n.fats, food.serving_size, food.serving_unit
    )
}
