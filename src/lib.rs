//! Core library surface for the Coffee Catalog TUI application.
//!
//! The binary only wires these pieces together; tests and other tooling can
//! drive the store and the catalog controllers without a terminal.
pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod models;
pub mod ui;

/// Persistence layer: the store handle and its error type.
pub use db::{CatalogStore, StoreError};

/// Controllers behind the grid and the add/edit dialog.
pub use catalog::{
    BrowserError, CatalogBrowser, EditorError, EditorMode, EditorOutcome, RecordEditor,
    ValidationError,
};

/// The domain types passed between layers.
pub use models::{Coffee, CoffeeDraft, COFFEE_TYPES, ROAST_LEVELS};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};
