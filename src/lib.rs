pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::cli::LocalStorage;
pub use config::toml_config::LibraryConfig;
pub use core::cipher::{CipherMode, PayloadCipher};
pub use core::codec::SnapshotCodec;
pub use core::repository::LibraryRepository;
pub use domain::model::{Book, CirculationError, Library, Member};
pub use utils::error::{LibraryError, Result};
