//! Config command

use super::header;
use crate::OutputFormat;
use anyhow::Result;
use nutrisearch_api_client::{ClientConfig, TransportMode};
use nutrisearch_core::config::Config;
use nutrisearch_core::error::exit_codes;
use owo_colors::OwoColorize;

/// Print the effective configuration with secrets masked
pub fn run(loaded: &Config, client: &ClientConfig, format: OutputFormat) -> Result<u8> {
    let shown = client.redacted();

    if format == OutputFormat::Json {
        let output = serde_json::json!({
            "source": loaded.path.as_ref().map(|p| p.display().to_string()),
            "mode": shown.mode(),
            "client": shown,
            "logging": loaded.schema.logging,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(exit_codes::SUCCESS);
    }

    header("Effective configuration");

    let source = loaded
        .path
        .as_ref()
        .map_or_else(|| "built-in defaults".to_string(), |p| p.display().to_string());
    println!("  Source:          {}", source.dimmed());
    println!();

    match shown.mode() {
        TransportMode::Proxy => {
            println!("  Transport:       {}", "proxy".green());
            println!("  Proxy URL:       {}", shown.proxy_url());
            println!(
                "  Anon key:        {}",
                shown.anon_key.as_deref().unwrap_or("(not set)")
            );
        }
        TransportMode::Direct => {
            println!("  Transport:       {}", "direct".yellow());
            println!("  FDC base URL:    {}", shown.fdc_base_url);
            println!(
                "  FDC API key:     {}",
                shown.fdc_api_key.as_deref().unwrap_or("(not set)")
            );
        }
    }
    println!("  Timeout:         {}s", shown.timeout.as_secs());
    println!();

    let t = &shown.tuning;
    println!("  Cache TTL:       {}s", t.cache_ttl_secs);
    println!("  Min interval:    {}ms", t.min_request_interval_ms);
    println!("  Page size:       {}", t.default_page_size);
    println!(
        "  Dedup key:       {} words + {} brand chars",
        t.dedup_key_words, t.dedup_brand_prefix
    );
    println!();

    Ok(exit_codes::SUCCESS)
}
