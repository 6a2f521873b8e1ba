//! Weatherlog CLI
//!
//! Command-line client for a running Weatherlog API server:
//! - Add observations
//! - List and filter observations
//! - Fetch a single observation
//! - Check status

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use weatherlog::query::{parse_date, SortOrder};

#[derive(Parser)]
#[command(name = "weatherlog-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Client for the Weatherlog observation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://localhost:8080", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Add an observation
    Add {
        /// Observation date (YYYY-MM-DD)
        date: String,
        /// City name
        city: String,
        /// Extra fields in key=value format; values are parsed as JSON when possible
        #[arg(short = 'F', long = "field")]
        fields: Vec<String>,
    },

    /// List observations
    List {
        /// Only observations from this date (YYYY-MM-DD)
        #[arg(short, long)]
        date: Option<String>,
        /// Only observations from these cities (repeatable or comma-separated)
        #[arg(short, long)]
        city: Vec<String>,
        /// Sort by date: "date" (oldest first) or "-date" (newest first)
        #[arg(short, long, allow_hyphen_values = true, value_parser = parse_sort)]
        sort: Option<SortOrder>,
    },

    /// Fetch one observation by id
    Get {
        /// Record id
        id: u64,
    },

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Add { date, city, fields } => {
            let date = parse_date(&date)?;
            let mut body = parse_fields(&fields)?;
            body.insert("date".to_string(), serde_json::json!(date));
            body.insert("city".to_string(), serde_json::json!(city));

            let response = client
                .post(format!("{}/weather", cli.api_url))
                .json(&body)
                .send()
                .await?;

            let response = ensure_success(response).await;
            let record: serde_json::Value = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&record)?),
                _ => println!(
                    "Added record {}: {} on {}",
                    record["id"].as_u64().unwrap_or(0),
                    city,
                    date
                ),
            }
        }

        Commands::List { date, city, sort } => {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(date) = date {
                params.push(("date", parse_date(&date)?.to_string()));
            }
            for c in city {
                params.push(("city", c));
            }
            if let Some(sort) = sort {
                params.push(("sort", sort.to_string()));
            }

            let response = client
                .get(format!("{}/weather", cli.api_url))
                .query(&params)
                .send()
                .await?;

            let response = ensure_success(response).await;

            let records: Vec<serde_json::Value> = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&records)?),
                _ => print_table(&records),
            }
        }

        Commands::Get { id } => {
            let response = client
                .get(format!("{}/weather/{}", cli.api_url, id))
                .send()
                .await?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                eprintln!("No record with id {}", id);
                std::process::exit(1);
            }
            let response = ensure_success(response).await;

            let record: serde_json::Value = response.json().await?;
            match cli.format.as_str() {
                "json" => println!("{}", serde_json::to_string_pretty(&record)?),
                _ => print_table(std::slice::from_ref(&record)),
            }
        }

        Commands::Status => {
            let response = client.get(format!("{}/health", cli.api_url)).send().await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!(
                        "Weatherlog v{}",
                        health["version"].as_str().unwrap_or("unknown")
                    );
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    println!("Records: {}", health["records"].as_u64().unwrap_or(0));
                    println!("Cities: {}", health["cities"].as_u64().unwrap_or(0));

                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    eprintln!("API returned error: {}", resp.status());
                    std::process::exit(1);
                }
                Err(e) => {
                    eprintln!("Cannot connect to Weatherlog API at {}", cli.api_url);
                    eprintln!("Error: {}", e);
                    eprintln!();
                    eprintln!("Make sure the Weatherlog server is running:");
                    eprintln!("  cargo run --bin weatherlog");
                    std::process::exit(1);
                }
            }
        }

        Commands::Config { output } => {
            let config = weatherlog::config::generate_default_config();

            match output {
                Some(path) => {
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

/// Pass through a successful response; otherwise print the server's error and exit
async fn ensure_success(response: reqwest::Response) -> reqwest::Response {
    if response.status().is_success() {
        return response;
    }

    let status = response.status();
    let text = response.text().await.unwrap_or_default();
    eprintln!("Request failed ({}): {}", status, text);
    std::process::exit(1);
}

fn parse_sort(s: &str) -> Result<SortOrder, String> {
    s.parse::<SortOrder>().map_err(|e| e.to_string())
}

/// Parse `key=value` pairs into a JSON object
fn parse_fields(fields: &[String]) -> Result<serde_json::Map<String, serde_json::Value>, String> {
    let mut map = serde_json::Map::new();

    for field in fields {
        let (key, raw) = field
            .split_once('=')
            .ok_or_else(|| format!("Invalid field '{}': expected key=value", field))?;
        let key = key.trim();

        if matches!(key, "" | "id" | "date" | "city") {
            return Err(format!("Field name '{}' is not allowed", key));
        }

        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        map.insert(key.to_string(), value);
    }

    Ok(map)
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn print_table(records: &[serde_json::Value]) {
    if records.is_empty() {
        println!("No matching records");
        return;
    }

    println!("{:<8} {:<12} {:<20} {}", "ID", "Date", "City", "Fields");
    println!("{}", "-".repeat(72));

    for record in records {
        let extra: Vec<String> = record
            .as_object()
            .map(|obj| {
                obj.iter()
                    .filter(|(k, _)| !matches!(k.as_str(), "id" | "date" | "city"))
                    .map(|(k, v)| format!("{}={}", k, v))
                    .collect()
            })
            .unwrap_or_default();

        println!(
            "{:<8} {:<12} {:<20} {}",
            record["id"].as_u64().unwrap_or(0),
            record["date"].as_str().unwrap_or("-"),
            record["city"].as_str().unwrap_or("-"),
            extra.join(" ")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_fields() {
        let fields = vec![
            "lat=51.5".to_string(),
            "state=Greater London".to_string(),
            "temperatures=[17.3,16.8]".to_string(),
        ];
        let map = parse_fields(&fields).unwrap();

        assert_eq!(map["lat"], json!(51.5));
        assert_eq!(map["state"], json!("Greater London"));
        assert_eq!(map["temperatures"], json!([17.3, 16.8]));
    }

    #[test]
    fn test_parse_fields_rejects_reserved_and_malformed() {
        assert!(parse_fields(&["id=3".to_string()]).is_err());
        assert!(parse_fields(&["novalue".to_string()]).is_err());
    }

    #[test]
    fn test_parse_sort() {
        assert_eq!(parse_sort("-date").unwrap(), SortOrder::DateDescending);
        assert!(parse_sort("temperature").is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(3_700), "1h 1m");
        assert_eq!(format_duration(90_000), "1d 1h");
    }
}
