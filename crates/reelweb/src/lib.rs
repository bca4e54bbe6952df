//! reelweb - HTTP surface and CLI for reelgrab
//!
//! Resolution logic lives in `reelcore`; this crate only maps it onto the
//! `POST /api/extract-reel` endpoint and the `reelgrab` command line.

pub mod cli;
pub mod error;
pub mod server;

pub use error::ApiError;
pub use server::{create_router, start_server, AppState, ExtractResponse};
