//! astro-brief: Astro-Brief Main Binary
//!
//! Usage:
//!   astro-brief                   - Start the web server
//!   astro-brief --config <path>   - Start with an explicit TOML config file
//!   astro-brief --help            - Show help

use std::path::PathBuf;

use astro_core::Config;
use astro_web::WebServer;
use tracing_subscriber::EnvFilter;

/// Run mode
#[derive(Debug, PartialEq, Eq)]
enum RunMode {
    /// Serve HTTP, optionally with an explicit config file
    Server { config_path: Option<PathBuf> },
    /// Show help
    Help,
    /// Show version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let config_path = match parse_args(&args)? {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("astro-brief {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        RunMode::Server { config_path } => config_path,
    };

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    // Load .env file
    dotenvy::dotenv().ok();

    let config = Config::load_from(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    tracing::info!("Starting astro-brief...");
    tracing::info!("Keys -> {}", config.key_status());
    tracing::info!("Models: {:?}", config.gemini.models);

    let server = WebServer::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to create server: {}", e))?;

    tracing::info!("Press Ctrl+C to exit");
    server.run(shutdown_signal()).await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for Ctrl+C: {}", e);
        return;
    }
    tracing::info!("Shutting down...");
}

/// Parse command line arguments (program name already stripped)
fn parse_args(args: &[String]) -> anyhow::Result<RunMode> {
    let mut config_path = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(RunMode::Help),
            "--version" | "-v" => return Ok(RunMode::Version),
            "--config" | "-c" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config requires a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => anyhow::bail!("Unknown argument: {} (see --help)", other),
        }
    }

    Ok(RunMode::Server { config_path })
}

/// Print help message
fn print_help() {
    println!("astro-brief - voice Q&A backend for the Astro-Brief site");
    println!();
    println!("Usage:");
    println!("  astro-brief                   Start the web server");
    println!("  astro-brief --config <path>   Use a TOML config file (default: ./astro-brief.toml)");
    println!("  astro-brief --help            Show this help message");
    println!("  astro-brief --version         Show version");
    println!();
    println!("Environment Variables:");
    println!("  GEMINI_API_KEY       Google Gemini API key");
    println!("  DEEPGRAM_API_KEY     Deepgram API key");
    println!("  MURF_API_KEY         Murf API key");
    println!("  GEMINI_MODELS        Comma-separated models, tried in order");
    println!("  HOST / PORT          Bind address (default: 127.0.0.1:5000)");
    println!("  TEMPLATES_DIR        Static pages directory (default: templates)");
    println!("  MAX_UPLOAD_BYTES     Request body limit (default: 26214400)");
    println!("  ALLOWED_ORIGINS      Comma-separated CORS origins (default: any)");
    println!("  RUST_LOG             Log filter (default: info)");
}
