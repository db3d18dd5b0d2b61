//! `promptree init` — Write a default config file.

use promptree_config::AppConfig;
use std::fs;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = AppConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    fs::create_dir_all(&config_dir)?;
    fs::write(&config_path, AppConfig::default_toml())?;

    println!("Wrote default config to {}", config_path.display());
    println!("Set your API key there or via PROMPTREE_API_KEY.");
    Ok(())
}
