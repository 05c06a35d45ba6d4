#![warn(clippy::unwrap_used)]

pub mod ads_rest;
pub mod error;
pub mod feed_rest;
pub mod library_rest;
pub mod payments_rest;
pub mod rest;
pub mod router;
pub mod server;
pub mod state;
pub mod studio_rest;

pub use router::build_router;
pub use server::ApiServer;
pub use state::AppState;
