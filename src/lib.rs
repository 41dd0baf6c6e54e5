pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::http::HttpConfigStore;
pub use config::{toml_config::TomlConfig, CliConfig};
pub use core::cache::CollectionCache;
pub use core::editor::OrderedCollectionEditor;
pub use domain::model::{Item, PersistOutcome, ReorderRequest};
pub use domain::ports::{ConfigStore, StoreConfig};
pub use utils::error::{AdminError, Result};
