//! Persistence module split across logical submodules.

mod coffee;
mod connection;
mod error;

pub use connection::CatalogStore;
pub use error::{Result, StoreError};
