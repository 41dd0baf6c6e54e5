pub mod cache;
pub mod editor;
pub mod reorder;

pub use crate::domain::model::{Item, OrderWrite, PersistOutcome, ReorderRequest, WriteResult};
pub use crate::domain::ports::{ConfigStore, StoreConfig};
pub use crate::utils::error::Result;
