//! Common utilities and shared types for the school site backend.
//!
//! This crate provides foundational components used across all sekolah crates:
//!
//! - **Configuration**: Application settings via [`Config`]
//! - **Error handling**: Unified error types via [`AppError`] and [`AppResult`]
//! - **ID Generation**: ULID-based unique identifiers via [`IdGenerator`]
//! - **Storage**: Media storage backends for uploaded images
//! - **Validation**: Field checks shared by the server and the client library
//!
//! # Example
//!
//! ```no_run
//! use sekolah_common::{Config, IdGenerator, AppResult};
//!
//! fn example() -> AppResult<()> {
//!     let config = Config::load()?;
//!     let id_gen = IdGenerator::new();
//!     let id = id_gen.generate();
//!     println!("Generated ID: {} for {}", id, config.server.host);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod id;
pub mod storage;
pub mod validation;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use id::IdGenerator;
pub use storage::{
    InlineImage, LocalStorage, MAX_IMAGE_BYTES, StorageBackend, UploadedFile, generate_storage_key,
};
