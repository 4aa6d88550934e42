//! Threads of Tradition - HTTP server
//!
//! Serves the JSON API over the catalog and progress store from
//! `threads-core`, plus the static frontend.
//!
//! # Architecture
//!
//! - **API**: Route table, body parsing, id checks
//! - **Assets**: Page aliases and static file serving
//! - **Config**: Environment-driven settings
//! - **Server**: Listener, tracing layer, graceful shutdown
//!
//! # Example
//!
//! ```no_run
//! use threads_server::{ServerConfig, ThreadsServer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServerConfig::from_env()?;
//!     ThreadsServer::new(config)?.run().await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod assets;
pub mod config;
pub mod error;
pub mod server;

pub use api::{build_router, AppState, MAX_BODY_BYTES};
pub use assets::{resolve_alias, Assets};
pub use config::ServerConfig;
pub use error::{Error, Result};
pub use server::ThreadsServer;
