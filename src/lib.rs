pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::StoreConfig};
pub use core::{id::MonotonicIdGenerator, store::PlaceStore};
pub use domain::model::{Coordinate, PlaceDraft, PlaceRecord};
pub use domain::ports::{CorruptFilePolicy, PlaceRepository};
pub use utils::error::{PlaceError, Result};
