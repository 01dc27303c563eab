//! Tablero webhook gateway HTTP API.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod handlers;
pub mod server;
pub mod signature;

pub use config::Config;
pub use server::{create_router, start_server, AppState};
