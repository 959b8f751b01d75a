//! # Shopper Entry Point
//!
//! Reads one JSON request per line on stdin and writes one JSON response
//! per line on stdout.
//!
//! ```text
//! stdin  ► {"command":"toggle_wishlist","args":{"productId":"2"}}
//! stdout ◄ {"ok":true,"result":{"data":{"wishlisted":true,"products":[..]}}}
//!
//! stdin  ► {"command":"add_to_cart","args":{"productId":"2","quantity":0}}
//! stdout ◄ {"ok":false,"error":{"code":"VALIDATION_ERROR","message":".."}}
//! ```
//!
//! Usage: `shopper [config.toml]`

use std::path::PathBuf;

use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{error, info};

use shopper::commands::dispatch_json;
use shopper::config::AppConfig;
use shopper::{bootstrap, init_tracing};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = AppConfig::load_or_default(config_path);

    init_tracing(&config.logging);
    info!("Starting shopper session");

    let session = match bootstrap(&config).await {
        Ok(session) => session,
        Err(e) => {
            error!("Startup failed: {}", e);
            return Err(e.into());
        }
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = match dispatch_json(&session, &line).await {
            Ok(result) => json!({ "ok": true, "result": result }),
            Err(e) => json!({ "ok": false, "error": e }),
        };

        stdout.write_all(response.to_string().as_bytes()).await?;
        stdout.write_all(b"\n").await?;
        stdout.flush().await?;
    }

    info!("stdin closed, shutting down");
    Ok(())
}
