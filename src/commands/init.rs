use std::io::{self, Write};

use pag_tracker::config::{Config, DEFAULT_BASE_URL};
use pag_tracker::error::{Result, TrackerError};
use pag_tracker::ApiClient;

fn prompt(message: &str) -> Result<String> {
    print!("{message}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = prompt(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("PAG Tracker Configuration");
    println!("=========================\n");

    let base_url = prompt(&format!("API base URL [{DEFAULT_BASE_URL}]: "))?;
    let base_url = if base_url.is_empty() {
        DEFAULT_BASE_URL.to_string()
    } else {
        base_url
    };

    // Fail early on a URL the client would reject anyway
    ApiClient::builder(base_url.as_str()).build()?;

    let contents = render_config(&base_url);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| TrackerError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    std::fs::write(&config_path, contents).map_err(|e| TrackerError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("You can now use 'pagtrack' commands!");

    Ok(())
}

fn render_config(base_url: &str) -> String {
    let mut table = toml::Table::new();
    table.insert("base_url".to_string(), toml::Value::String(base_url.to_string()));
    table.to_string()
}
