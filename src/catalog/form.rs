use crate::models::{Coffee, COFFEE_TYPES, ROAST_LEVELS};

/// Fields of the coffee form, in focus order.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum FormField {
    #[default]
    Name,
    RoastLevel,
    Kind,
    Taste,
    Price,
    Volume,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Name,
        FormField::RoastLevel,
        FormField::Kind,
        FormField::Taste,
        FormField::Price,
        FormField::Volume,
    ];

    /// Label shown in front of the field.
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::RoastLevel => "Roast Level",
            FormField::Kind => "Type",
            FormField::Taste => "Taste",
            FormField::Price => "Price",
            FormField::Volume => "Volume",
        }
    }

    /// Hint rendered while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "<required>",
            FormField::Taste => "<optional>",
            FormField::Price => "e.g. 999.99",
            FormField::Volume => "e.g. 250.0",
            FormField::RoastLevel | FormField::Kind => "",
        }
    }

    pub fn is_selector(self) -> bool {
        matches!(self, FormField::RoastLevel | FormField::Kind)
    }

    fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A choice among a fixed list of options, like a combo box.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Selector {
    options: &'static [&'static str],
    index: usize,
}

impl Selector {
    pub fn new(options: &'static [&'static str]) -> Self {
        Self { options, index: 0 }
    }

    pub fn options(&self) -> &'static [&'static str] {
        self.options
    }

    /// Currently selected option (empty only for an empty option list).
    pub fn current(&self) -> &'static str {
        self.options.get(self.index).copied().unwrap_or("")
    }

    /// Select `value` if it is one of the options. Returns `false` and keeps
    /// the current choice otherwise.
    pub fn select(&mut self, value: &str) -> bool {
        match self.options.iter().position(|option| *option == value) {
            Some(idx) => {
                self.index = idx;
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + 1) % self.options.len();
        }
    }

    pub fn previous(&mut self) {
        if !self.options.is_empty() {
            self.index = (self.index + self.options.len() - 1) % self.options.len();
        }
    }
}

/// Raw field state of the add/edit dialog. Numbers stay as text until the
/// editor validates them so the user can type freely.
#[derive(Clone, Debug, PartialEq)]
pub struct CoffeeForm {
    pub name: String,
    pub roast_level: Selector,
    pub kind: Selector,
    pub taste: String,
    pub price: String,
    pub volume: String,
    pub active: FormField,
}

impl Default for CoffeeForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            roast_level: Selector::new(ROAST_LEVELS),
            kind: Selector::new(COFFEE_TYPES),
            taste: String::new(),
            price: String::new(),
            volume: String::new(),
            active: FormField::Name,
        }
    }
}

impl CoffeeForm {
    /// Pre-fill every field from a stored record. Selector values outside the
    /// known options leave that selector on its first entry.
    pub fn from_coffee(coffee: &Coffee) -> Self {
        let mut form = Self {
            name: coffee.name.clone(),
            taste: coffee.taste_description.clone(),
            price: coffee.price.to_string(),
            volume: coffee.package_volume.to_string(),
            ..Self::default()
        };
        form.roast_level.select(&coffee.roast_level);
        form.kind.select(&coffee.kind);
        form
    }

    pub fn focus(&mut self, field: FormField) {
        self.active = field;
    }

    pub fn next_field(&mut self) {
        self.active = self.active.next();
    }

    pub fn previous_field(&mut self) {
        self.active = self.active.previous();
    }

    /// Append a character to the active text field. Selectors ignore typing.
    pub fn push_char(&mut self, ch: char) -> bool {
        if ch.is_control() {
            return false;
        }
        match self.text_mut(self.active) {
            Some(value) => {
                value.push(ch);
                true
            }
            None => false,
        }
    }

    /// Break the line in the taste description; other fields are single-line.
    pub fn newline(&mut self) -> bool {
        if self.active == FormField::Taste {
            self.taste.push('\n');
            true
        } else {
            false
        }
    }

    /// Remove the last character from the active text field.
    pub fn backspace(&mut self) -> bool {
        match self.text_mut(self.active) {
            Some(value) => value.pop().is_some(),
            None => false,
        }
    }

    /// Step the active selector forwards or backwards.
    pub fn cycle_selector(&mut self, forward: bool) -> bool {
        let selector = match self.active {
            FormField::RoastLevel => &mut self.roast_level,
            FormField::Kind => &mut self.kind,
            _ => return false,
        };
        if forward {
            selector.next();
        } else {
            selector.previous();
        }
        true
    }

    /// Current text of any field, selectors included.
    pub fn value(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::RoastLevel => self.roast_level.current(),
            FormField::Kind => self.kind.current(),
            FormField::Taste => &self.taste,
            FormField::Price => &self.price,
            FormField::Volume => &self.volume,
        }
    }

    fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::Taste => Some(&mut self.taste),
            FormField::Price => Some(&mut self.price),
            FormField::Volume => Some(&mut self.volume),
            FormField::RoastLevel | FormField::Kind => None,
        }
    }
}
