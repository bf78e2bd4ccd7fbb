//! Domain models that mirror the `coffee` table. These stay plain data holders
//! so the store adapter and the editor can pass them around freely.

/// Roast levels offered by the editor's selector, in display order.
pub const ROAST_LEVELS: &[&str] = &["Light", "Medium", "Medium-Dark", "Dark"];

/// Package types offered by the editor's selector, in display order.
pub const COFFEE_TYPES: &[&str] = &["Beans", "Ground"];

/// Editable fields of a catalog row. Used for inserts (the store assigns the
/// id) and for updates keyed by an existing id.
#[derive(Debug, Clone, PartialEq)]
pub struct CoffeeDraft {
    pub name: String,
    pub roast_level: String,
    /// Stored in the `type` column.
    pub kind: String,
    pub taste_description: String,
    pub price: f64,
    pub package_volume: f64,
}

/// A persisted catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct Coffee {
    /// Primary key assigned by the store. Never changes after insert.
    pub id: i64,
    pub name: String,
    pub roast_level: String,
    pub kind: String,
    pub taste_description: String,
    pub price: f64,
    pub package_volume: f64,
}

impl Coffee {
    /// Pair a draft with the id the store assigned to it.
    pub fn from_draft(id: i64, draft: CoffeeDraft) -> Self {
        Self {
            id,
            name: draft.name,
            roast_level: draft.roast_level,
            kind: draft.kind,
            taste_description: draft.taste_description,
            price: draft.price,
            package_volume: draft.package_volume,
        }
    }

    /// Strip the id, leaving only the editable fields.
    pub fn to_draft(&self) -> CoffeeDraft {
        CoffeeDraft {
            name: self.name.clone(),
            roast_level: self.roast_level.clone(),
            kind: self.kind.clone(),
            taste_description: self.taste_description.clone(),
            price: self.price,
            package_volume: self.package_volume,
        }
    }
}
