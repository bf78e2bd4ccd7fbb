use log::info;
use thiserror::Error;

use super::editor::{EditorOutcome, RecordEditor};
use crate::db::{CatalogStore, StoreError};
use crate::models::Coffee;

/// Column headers of the catalog grid, matching [`row_cells`].
pub const COLUMN_HEADERS: [&str; 7] = [
    "ID",
    "Name",
    "Roast Level",
    "Type",
    "Taste Description",
    "Price",
    "Package Volume",
];

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("Select a record to edit")]
    NoSelection,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Read-only projection of the `coffee` table plus the current selection.
/// Rows are replaced wholesale on every [`load`](CatalogBrowser::load).
#[derive(Debug, Default)]
pub struct CatalogBrowser {
    rows: Vec<Coffee>,
    selected: Option<usize>,
}

impl CatalogBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reload every row from the store. The selection follows the previously
    /// selected record when it still exists.
    pub fn load(&mut self, store: &CatalogStore) -> Result<(), StoreError> {
        let focus_id = self.selected_record().map(|coffee| coffee.id);
        self.rows = store.fetch_all()?;
        self.selected = focus_id.and_then(|id| self.position_of(id));
        Ok(())
    }

    pub fn rows(&self) -> &[Coffee] {
        &self.rows
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_record(&self) -> Option<&Coffee> {
        self.selected.and_then(|idx| self.rows.get(idx))
    }

    /// Select the row at `index`; out-of-range indices clear the selection.
    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|idx| *idx < self.rows.len());
    }

    /// Move the selection by `offset` rows, clamping at both ends. With nothing
    /// selected, any movement selects the first row.
    pub fn move_selection(&mut self, offset: isize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let last = self.rows.len() as isize - 1;
        self.selected = Some(match self.selected {
            Some(current) => (current as isize + offset).clamp(0, last) as usize,
            None => 0,
        });
    }

    pub fn select_first(&mut self) {
        self.select(Some(0));
    }

    pub fn select_last(&mut self) {
        self.select(self.rows.len().checked_sub(1));
    }

    /// Open a blank editor for a new record.
    pub fn add(&self) -> RecordEditor {
        info!("opening editor for a new coffee");
        RecordEditor::create()
    }

    /// Open the editor for the selected record.
    pub fn edit(&self, store: &CatalogStore) -> Result<RecordEditor, BrowserError> {
        let id = self
            .selected_record()
            .map(|coffee| coffee.id)
            .ok_or(BrowserError::NoSelection)?;
        info!("opening editor for coffee {id}");
        Ok(RecordEditor::open(store, Some(id))?)
    }

    /// React to a closed editor: an accepted save triggers a full reload and
    /// selects the saved row. Returns whether the grid was refreshed.
    pub fn finish_editor(
        &mut self,
        store: &CatalogStore,
        outcome: EditorOutcome,
    ) -> Result<bool, StoreError> {
        match outcome {
            EditorOutcome::Accepted(id) => {
                self.load(store)?;
                if let Some(idx) = self.position_of(id) {
                    self.selected = Some(idx);
                }
                Ok(true)
            }
            EditorOutcome::Open | EditorOutcome::Rejected => Ok(false),
        }
    }

    fn position_of(&self, id: i64) -> Option<usize> {
        self.rows.iter().position(|coffee| coffee.id == id)
    }
}

/// Render one record as the seven grid cells, in [`COLUMN_HEADERS`] order.
pub fn row_cells(coffee: &Coffee) -> [String; 7] {
    [
        coffee.id.to_string(),
        coffee.name.clone(),
        coffee.roast_level.clone(),
        coffee.kind.clone(),
        coffee.taste_description.clone(),
        coffee.price.to_string(),
        coffee.package_volume.to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CoffeeDraft;

    fn seeded(names: &[&str]) -> (CatalogStore, Vec<i64>) {
        let store = CatalogStore::open_in_memory().unwrap();
        let ids = names
            .iter()
            .map(|name| {
                store
                    .insert(&CoffeeDraft {
                        name: name.to_string(),
                        roast_level: "Medium".to_string(),
                        kind: "Beans".to_string(),
                        taste_description: String::new(),
                        price: 9.0,
                        package_volume: 250.0,
                    })
                    .unwrap()
            })
            .collect();
        (store, ids)
    }

    #[test]
    fn load_starts_without_selection() {
        let (store, ids) = seeded(&["Guatemala", "Peru"]);
        let mut browser = CatalogBrowser::new();

        browser.load(&store).unwrap();

        let loaded: Vec<i64> = browser.rows().iter().map(|c| c.id).collect();
        assert_eq!(loaded, ids);
        assert_eq!(browser.selected(), None);
    }

    #[test]
    fn edit_without_selection_reports_no_selection() {
        let (store, _) = seeded(&["Guatemala"]);
        let mut browser = CatalogBrowser::new();
        browser.load(&store).unwrap();

        let err = browser.edit(&store).err().unwrap();

        assert!(matches!(err, BrowserError::NoSelection));
        assert_eq!(err.to_string(), "Select a record to edit");
    }

    #[test]
    fn edit_opens_selected_record() {
        let (store, ids) = seeded(&["Guatemala", "Peru"]);
        let mut browser = CatalogBrowser::new();
        browser.load(&store).unwrap();
        browser.select(Some(1));

        let editor = browser.edit(&store).unwrap();

        assert_eq!(editor.form().name, "Peru");
        assert_eq!(
            editor.mode(),
            crate::catalog::EditorMode::Edit { id: ids[1] }
        );
    }

    #[test]
    fn movement_selects_first_then_clamps() {
        let (store, _) = seeded(&["A", "B", "C"]);
        let mut browser = CatalogBrowser::new();
        browser.load(&store).unwrap();

        browser.move_selection(1);
        assert_eq!(browser.selected(), Some(0));
        browser.move_selection(10);
        assert_eq!(browser.selected(), Some(2));
        browser.move_selection(-10);
        assert_eq!(browser.selected(), Some(0));
        browser.select_last();
        assert_eq!(browser.selected(), Some(2));
        browser.select(Some(3));
        assert_eq!(browser.selected(), None);
    }

    #[test]
    fn accepted_create_refreshes_and_selects_new_row() {
        let (store, _) = seeded(&["A", "B"]);
        let mut browser = CatalogBrowser::new();
        browser.load(&store).unwrap();

        let mut editor = browser.add();
        {
            let form = editor.form_mut();
            form.name = "C".to_string();
            form.price = "1".to_string();
            form.volume = "2".to_string();
        }
        let id = editor.save(&store).unwrap();
        let refreshed = browser.finish_editor(&store, editor.outcome()).unwrap();

        assert!(refreshed);
        assert_eq!(browser.rows().len(), 3);
        assert_eq!(browser.selected_record().map(|c| c.id), Some(id));
    }

    #[test]
    fn rejected_editor_leaves_grid_alone() {
        let (store, _) = seeded(&["A"]);
        let mut browser = CatalogBrowser::new();
        browser.load(&store).unwrap();

        let refreshed = browser
            .finish_editor(&store, EditorOutcome::Rejected)
            .unwrap();

        assert!(!refreshed);
        assert_eq!(browser.rows().len(), 1);
    }

    #[test]
    fn row_cells_follow_header_order() {
        let coffee = Coffee {
            id: 3,
            name: "Arabica".to_string(),
            roast_level: "Medium".to_string(),
            kind: "Beans".to_string(),
            taste_description: "Nutty".to_string(),
            price: 499.0,
            package_volume: 200.5,
        };

        assert_eq!(
            row_cells(&coffee),
            ["3", "Arabica", "Medium", "Beans", "Nutty", "499", "200.5"].map(String::from)
        );
    }
}
