//! Common utilities and shared types for the lost & found service.
//!
//! This crate provides foundational components used across all crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **Storage**: Photo storage backends for found-item pictures
//!
//! # Example
//!
//! ```no_run
//! use lostfound_common::{AppResult, Config};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     println!("Listening on port {}", config.server.port);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod storage;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use storage::{LocalPhotoStore, NoOpPhotoStore, PhotoStore, StoredPhoto, photo_key};
