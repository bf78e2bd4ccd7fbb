//! Add/edit dialog behaviour. The editor owns the raw [`CoffeeForm`] and knows
//! how to load it, validate it, and hand the result to the store. Rendering
//! lives in the UI layer and only reads from here.

use log::{info, warn};
use thiserror::Error;

use super::form::CoffeeForm;
use crate::db::{CatalogStore, StoreError};
use crate::models::CoffeeDraft;

/// Whether the editor creates a new row or rewrites an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Create,
    Edit { id: i64 },
}

/// Result of the dialog as seen by whoever opened it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorOutcome {
    Open,
    /// Saved successfully; carries the id of the written row.
    Accepted(i64),
    Rejected,
}

/// A single failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name is required")]
    NameRequired,
    #[error("Invalid price format")]
    InvalidPrice,
    #[error("Invalid volume format")]
    InvalidVolume,
}

/// Why a save did not go through.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("{}", join_messages(.0))]
    Invalid(Vec<ValidationError>),
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub struct RecordEditor {
    mode: EditorMode,
    form: CoffeeForm,
    error: Option<String>,
    outcome: EditorOutcome,
}

impl RecordEditor {
    /// Blank editor in create mode.
    pub fn create() -> Self {
        Self::with_form(EditorMode::Create, CoffeeForm::default())
    }

    /// Open the editor for `id`, or in create mode when `id` is `None`. A
    /// missing record leaves the form blank but keeps edit mode.
    pub fn open(store: &CatalogStore, id: Option<i64>) -> Result<Self, StoreError> {
        let Some(id) = id else {
            return Ok(Self::create());
        };

        let form = match store.fetch_one(id)? {
            Some(coffee) => {
                let form = CoffeeForm::from_coffee(&coffee);
                if form.roast_level.current() != coffee.roast_level
                    || form.kind.current() != coffee.kind
                {
                    warn!(
                        "coffee {id} has unlisted roast/type ({}/{}); selector reset",
                        coffee.roast_level, coffee.kind
                    );
                }
                form
            }
            None => {
                warn!("coffee {id} not found; editing a blank form");
                CoffeeForm::default()
            }
        };

        Ok(Self::with_form(EditorMode::Edit { id }, form))
    }

    fn with_form(mode: EditorMode, form: CoffeeForm) -> Self {
        Self {
            mode,
            form,
            error: None,
            outcome: EditorOutcome::Open,
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn title(&self) -> String {
        match self.mode {
            EditorMode::Create => "Add Coffee".to_string(),
            EditorMode::Edit { id } => format!("Edit Coffee #{id}"),
        }
    }

    pub fn form(&self) -> &CoffeeForm {
        &self.form
    }

    /// Mutable access for focus changes; content edits go through [`edit`].
    ///
    /// [`edit`]: RecordEditor::edit
    pub fn form_mut(&mut self) -> &mut CoffeeForm {
        &mut self.form
    }

    /// Apply a content edit. A change clears the last reported error.
    pub fn edit(&mut self, change: impl FnOnce(&mut CoffeeForm) -> bool) -> bool {
        let changed = change(&mut self.form);
        if changed {
            self.error = None;
        }
        changed
    }

    /// Message currently shown to the user, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn outcome(&self) -> EditorOutcome {
        self.outcome
    }

    pub fn is_open(&self) -> bool {
        self.outcome == EditorOutcome::Open
    }

    /// Run every field check and collect all failures.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if self.form.name.trim().is_empty() {
            errors.push(ValidationError::NameRequired);
        }
        if parse_number(&self.form.price).is_none() {
            errors.push(ValidationError::InvalidPrice);
        }
        if parse_number(&self.form.volume).is_none() {
            errors.push(ValidationError::InvalidVolume);
        }
        errors
    }

    /// Validate and convert the form into a row ready for the store.
    pub fn draft(&self) -> Result<CoffeeDraft, Vec<ValidationError>> {
        let errors = self.validate();
        match (parse_number(&self.form.price), parse_number(&self.form.volume)) {
            (Some(price), Some(package_volume)) if errors.is_empty() => Ok(CoffeeDraft {
                name: self.form.name.trim().to_string(),
                roast_level: self.form.roast_level.current().to_string(),
                kind: self.form.kind.current().to_string(),
                taste_description: self.form.taste.trim().to_string(),
                price,
                package_volume,
            }),
            _ => Err(errors),
        }
    }

    /// Validate and persist. Failures keep the dialog open with the entered
    /// values untouched; success marks it accepted.
    pub fn save(&mut self, store: &CatalogStore) -> Result<i64, EditorError> {
        let draft = match self.draft() {
            Ok(draft) => draft,
            Err(errors) => {
                let err = EditorError::Invalid(errors);
                self.error = Some(err.to_string());
                return Err(err);
            }
        };

        let written = match self.mode {
            EditorMode::Create => store.insert(&draft),
            EditorMode::Edit { id } => store.update(id, &draft).map(|()| id),
        };

        match written {
            Ok(id) => {
                info!("editor saved coffee {id}");
                self.error = None;
                self.outcome = EditorOutcome::Accepted(id);
                Ok(id)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Close without saving.
    pub fn cancel(&mut self) {
        self.outcome = EditorOutcome::Rejected;
    }
}

/// Parse a price or volume. Surrounding whitespace is allowed; infinities and
/// NaN are not.
fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
