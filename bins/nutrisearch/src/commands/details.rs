//! Details command

use super::{header, macro_line};
use crate::OutputFormat;
use anyhow::{Context, Result};
use nutrisearch_api_client::{ClientConfig, FoodSearchService};
use nutrisearch_core::error::exit_codes;
use nutrisearch_search::FoodCandidate;
use owo_colors::OwoColorize;

/// Look up one food and print its nutrient panel
pub async fn run(config: ClientConfig, fdc_id: &str, format: OutputFormat) -> Result<u8> {
    let service = FoodSearchService::new(config)?;
    let food = service
        .get_food_details(fdc_id)
        .await
        .with_context(|| format!("Failed to fetch food {fdc_id}"))?;
    service.close();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&food)?),
        OutputFormat::Text => print_text(&food),
    }

    Ok(exit_codes::SUCCESS)
}

fn print_text(food: &FoodCandidate) {
    header(&food.name);

    if let Some(brand) = food.brand_str() {
        println!("  Brand:      {brand}");
    }
    println!("  FDC id:     {}", food.external_id);
    println!("  Data type:  {}", food.data_type);
    println!("  Category:   {}", food.category.as_str());
    println!("  Summary:    {}", macro_line(food));
    println!();

    let n = &food.nutrients;
    let rows: [(&str, f64, &str); 13] = [
        ("Calories", n.calories, "kcal"),
        ("Protein", n.protein, "g"),
        ("Carbohydrate", n.carbs, "g"),
        ("Fat", n.fats, "g"),
        ("Saturated fat", n.saturated_fat, "g"),
        ("Fiber", n.fiber, "g"),
        ("Sugar", n.sugar, "g"),
        ("Sodium", n.sodium, "mg"),
        ("Cholesterol", n.cholesterol, "mg"),
        ("Potassium", n.potassium, "mg"),
        ("Calcium", n.calcium, "mg"),
        ("Iron", n.iron, "mg"),
        ("Vitamin C", n.vitamin_c, "mg"),
    ];

    for (label, value, unit) in rows {
        let line = format!("  {label:<16}{value:>8.1} {unit}");
        if value > 0.0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }

    if let Some(ref ingredients) = food.ingredients {
        println!();
        println!("  {} {}", "Ingredients:".bold(), ingredients);
    }
    println!();
}
