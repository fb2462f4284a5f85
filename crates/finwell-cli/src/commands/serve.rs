//! Server command implementation

use std::path::Path;

use anyhow::Result;
use finwell_core::{AIBackend, AIClient, Analyzer};

use super::load_config;

pub async fn cmd_serve(config_path: Option<&Path>, host: &str, port: u16) -> Result<()> {
    println!("🚀 Starting Finwell web server...");
    println!("   Listening: http://{}:{}", host, port);

    let config = load_config(config_path)?;
    let ai = AIClient::from_env();
    match &ai {
        Some(client) => println!("   🤖 AI backend: {} ({})", client.host(), client.model()),
        None => println!("   AI backend: not configured (recommendations disabled)"),
    }

    // Comma-separated list of allowed CORS origins
    let allowed_origins: Vec<String> = std::env::var("FINWELL_ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if !allowed_origins.is_empty() {
        println!("   🌐 Allowed origins: {}", allowed_origins.join(", "));
    }

    println!();
    println!("   Press Ctrl+C to stop");

    let server_config = finwell_server::ServerConfig { allowed_origins };
    finwell_server::serve_with_config(Analyzer::new(config), ai, host, port, server_config)
        .await?;

    Ok(())
}
