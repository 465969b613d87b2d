use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use pe_assistant::{routes, Config, ContentAdapter, GeminiClient};

const BANNER: &str = "
\x1b[36m
 ┌─────────────────────────────────────────┐
 │        PE SESSION ASSISTANT v0.1        │
 │   session content · names · grades      │
 └─────────────────────────────────────────┘
\x1b[0m";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("{}", BANNER);
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");

    let config = Config::from_env()?;

    let gemini_status = if config.has_api_key() {
        "\x1b[32m✅ READY\x1b[0m"
    } else {
        "\x1b[31m❌ MISSING\x1b[0m"
    };

    println!(" 🔧 \x1b[1mSYSTEM CHECK\x1b[0m");
    println!("    ├─ 🧠 Gemini AI    : {}", gemini_status);
    println!("    ├─ 🤖 Model        : {}", config.model);
    println!("    └─ 🌐 Endpoint     : {}", config.base_url);

    let client = GeminiClient::from_config(&config);
    let adapter = ContentAdapter::with_model_id(Arc::new(client), config.model.clone());
    let app = routes::router(adapter);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");
    println!(" 🚀 \x1b[1;32mASSISTANT IS ONLINE!\x1b[0m");
    println!("    📡 Listening on   : \x1b[36mhttp://0.0.0.0:{}\x1b[0m", config.port);
    println!("\x1b[1;30m━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\x1b[0m");

    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}
