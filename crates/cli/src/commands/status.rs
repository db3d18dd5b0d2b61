//! `promptree status` — Show configuration and provider health.

use promptree_config::AppConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;

    println!("promptree status");
    println!("================");
    println!("  Config dir:   {}", AppConfig::config_dir().display());
    println!("  Watch path:   {}", config.watch.path.display());
    println!("  Request file: {}", config.watch.request_artifact);
    println!("  Reply file:   {}", config.watch.reply_artifact);
    println!("  Provider:     {}", config.default_provider);
    println!("  Model:        {}", config.default_model);
    println!("  Temperature:  {}", config.default_temperature);
    println!(
        "  API key:      {}",
        if config.has_api_key() { "set" } else { "not set" }
    );

    let config_path = AppConfig::config_dir().join("config.toml");
    if !config_path.exists() {
        println!("\n  No config file — run `promptree init` first");
    }

    match promptree_providers::build_from_config(&config) {
        Ok(provider) => match provider.health_check().await {
            Ok(true) => println!("\n  Provider '{}' reachable", provider.name()),
            Ok(false) => println!("\n  Provider '{}' not healthy", provider.name()),
            Err(e) => println!("\n  Provider '{}' unreachable: {e}", provider.name()),
        },
        Err(e) => println!("\n  Provider not usable: {e}"),
    }

    Ok(())
}
