//! Obtain a JWT from the backend's auth endpoint and store it in the
//! configuration file's `[wordpress] token` field.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context};
use clap::Parser;
use serde_json::json;

#[derive(Parser, Debug)]
#[command(
    name = "fetch-token",
    version,
    about = "Fetch a JWT from the publishing backend and write it to the config"
)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let raw = fs::read_to_string(&args.config)
        .with_context(|| format!("cannot read config {}", args.config.display()))?;
    let mut doc: toml::Value = toml::from_str(&raw)
        .with_context(|| format!("cannot parse config {}", args.config.display()))?;

    let site = doc
        .get("wordpress")
        .and_then(|w| w.get("site"))
        .and_then(|s| s.as_str())
        .context("config has no wordpress.site")?
        .trim_end_matches('/')
        .to_string();

    let username = prompt("Username: ")?;
    let password = prompt("Password: ")?;

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()?;

    let response = client
        .post(format!("{site}/wp-json/jwt-auth/v1/token"))
        .json(&json!({ "username": username, "password": password }))
        .send()
        .await
        .with_context(|| format!("token request to {site} failed"))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("token request rejected with {status}: {body}");
    }

    let payload: serde_json::Value = response.json().await?;
    let token = payload
        .pointer("/data/token")
        .and_then(|t| t.as_str())
        .context("no data.token in auth response")?
        .to_string();

    let wordpress = doc
        .get_mut("wordpress")
        .and_then(|w| w.as_table_mut())
        .context("config [wordpress] section is not a table")?;
    wordpress.insert("token".to_string(), toml::Value::String(token.clone()));

    fs::write(&args.config, toml::to_string_pretty(&doc)?)
        .with_context(|| format!("cannot write config {}", args.config.display()))?;

    println!("{token}");
    println!("Token written to {}", args.config.display());
    Ok(())
}

fn prompt(label: &str) -> anyhow::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    let value = line.trim().to_string();
    if value.is_empty() {
        bail!("input must not be empty");
    }
    Ok(value)
}
