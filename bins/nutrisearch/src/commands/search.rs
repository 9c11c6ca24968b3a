//! Search command

use super::{header, macro_line};
use crate::OutputFormat;
use anyhow::Result;
use nutrisearch_api_client::{ClientConfig, FoodSearchService, SearchOutcome, SearchResponse};
use nutrisearch_core::error::exit_codes;
use nutrisearch_telemetry::metrics;
use owo_colors::OwoColorize;

/// Run one search and print the ranked page
pub async fn run(
    config: ClientConfig,
    query: &str,
    page_size: u32,
    page: u32,
    show_metrics: bool,
    format: OutputFormat,
) -> Result<u8> {
    let service = FoodSearchService::new(config)?;
    let response = service.search_foods(query, page_size, page).await;
    service.close();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&response)?),
        OutputFormat::Text => print_text(query, &response),
    }

    if show_metrics {
        eprintln!("{}", serde_json::to_string_pretty(&metrics().export_json())?);
    }

    Ok(if response.is_soft_failure() {
        exit_codes::FAILURE
    } else {
        exit_codes::SUCCESS
    })
}

fn print_text(query: &str, response: &SearchResponse) {
    header(&format!("Results for \"{}\"", query.trim()));

    match &response.outcome {
        SearchOutcome::Skipped => {
            println!("  {}", "Query too short: type at least 2 characters.".yellow());
            println!();
            return;
        }
        SearchOutcome::SoftFailure(failure) => {
            println!("  {} {}", "✗ Search unavailable:".red(), failure);
            println!();
            return;
        }
        SearchOutcome::Complete => {}
    }

    if response.foods.is_empty() {
        println!("  {}", "No matching foods.".dimmed());
        println!();
        return;
    }

    for (rank, food) in response.foods.iter().enumerate() {
        let brand = food
            .brand_str()
            .map(|b| format!(" · {b}"))
            .unwrap_or_default();
        println!("  {:>2}. {}{}", rank + 1, food.name.bold(), brand.dimmed());
        println!("      {}", macro_line(food));
        println!(
            "      {}",
            format!(
                "{} · {} · {}",
                food.external_id,
                food.data_type,
                food.category.as_str()
            )
            .dimmed()
        );
    }

    println!();
    let pages = response
        .total_pages
        .map_or_else(String::new, |p| format!(" of {p}"));
    println!(
        "  {}",
        format!(
            "Page {}{} · {} provider hits",
            response.current_page, pages, response.total_hits
        )
        .dimmed()
    );
    println!();
}
