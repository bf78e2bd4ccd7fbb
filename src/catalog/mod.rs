//! Behaviour behind the two screens: the catalog grid and the add/edit
//! dialog. Nothing in here touches the terminal.

mod browser;
mod editor;
mod form;

pub use browser::{row_cells, BrowserError, CatalogBrowser, COLUMN_HEADERS};
pub use editor::{EditorError, EditorMode, EditorOutcome, RecordEditor, ValidationError};
pub use form::{CoffeeForm, FormField, Selector};
