use std::collections::HashMap;

use crate::models::Drink;

/// Maps formal brewery names to the short nicknames shown on the stock list.
#[derive(Debug, Clone, Default)]
pub struct NicknameMap {
    names: HashMap<String, String>,
}

impl NicknameMap {
    pub fn new(names: HashMap<String, String>) -> Self {
        Self { names }
    }

    /// Nickname for `brand`, or the brand itself when none is configured.
    pub fn short_brand<'a>(&'a self, brand: &'a str) -> &'a str {
        self.names.get(brand).map(String::as_str).unwrap_or(brand)
    }

    /// Fill the derived short fields of a freshly looked-up drink.
    pub fn apply(&self, drink: &mut Drink) {
        drink.short_brand = self.short_brand(&drink.brand).to_string();
        drink.short_style = crate::scan::shorten_style(&drink.style).to_string();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
