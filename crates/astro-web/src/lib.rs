//! astro-web: HTTP server for Astro-Brief
//!
//! Serves the static site and the `/process_audio` endpoint, which turns a
//! recorded question (plus an optional image) into a spoken answer.
//! Built with axum for async HTTP handling.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use astro_core::Config;
//! use astro_web::WebServer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load()?;
//!     let server = WebServer::new(&config)?;
//!     server.run(async { tokio::signal::ctrl_c().await.ok(); }).await?;
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod handlers;
pub mod pages;
pub mod pipeline;
pub mod routes;
pub mod server;

pub use error::{Result, WebError};
pub use pipeline::{AstroPipeline, BriefResponse, Responder, Synthesizer, Transcriber};
pub use server::{AppState, WebServer, build_router};
