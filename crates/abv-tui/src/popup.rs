use abv_core::Drink;

/// Modal shown over the main screen while a new barcode is being described.
#[derive(Debug, Clone)]
pub enum Popup {
    /// Free-text beer name entry.
    Search { query: String },
    /// Waiting for the catalog to answer.
    Searching { query: String },
    /// Catalog matches to pick from.
    Results { drinks: Vec<Drink>, selected: usize },
}

impl Popup {
    pub fn search() -> Self {
        Self::Search {
            query: String::new(),
        }
    }

    pub fn move_selection(&mut self, delta: isize) {
        if let Self::Results { drinks, selected } = self {
            if drinks.is_empty() {
                return;
            }
            let max = drinks.len() - 1;
            *selected = selected.saturating_add_signed(delta).min(max);
        }
    }

    pub fn selected_drink(&self) -> Option<&Drink> {
        match self {
            Self::Results { drinks, selected } => drinks.get(*selected),
            _ => None,
        }
    }
}

/// One line of the result list, `"Brand:: Name"`.
pub fn result_label(drink: &Drink) -> String {
    format!("{}:: {}", drink.brand, drink.name)
}
