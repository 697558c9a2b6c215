use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::Drink;
use crate::error::AbvError;

/// A drink together with a summed quantity (in stock, stocked or served).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockedDrink {
    #[serde(flatten)]
    pub drink: Drink,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
}

/// Columns the inventory may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Brand,
    Name,
    Abv,
    Ibu,
    Style,
    ShortStyle,
    ShortBrand,
    Country,
    Quantity,
    Date,
}

impl SortField {
    /// SQL expression used in `ORDER BY`. Only ever built from this
    /// closed set, never from caller-supplied text.
    pub fn column(self) -> &'static str {
        match self {
            Self::Brand => "d.brand",
            Self::Name => "d.name",
            Self::Abv => "d.abv",
            Self::Ibu => "d.ibu",
            Self::Style => "d.type",
            Self::ShortStyle => "d.shorttype",
            Self::ShortBrand => "d.shortbrand",
            Self::Country => "d.country",
            Self::Quantity => "quantity",
            Self::Date => "d.date",
        }
    }
}

impl FromStr for SortField {
    type Err = AbvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "brand" => Ok(Self::Brand),
            "name" => Ok(Self::Name),
            "abv" => Ok(Self::Abv),
            "ibu" => Ok(Self::Ibu),
            "type" | "style" => Ok(Self::Style),
            "shorttype" => Ok(Self::ShortStyle),
            "shortbrand" => Ok(Self::ShortBrand),
            "country" => Ok(Self::Country),
            "quantity" => Ok(Self::Quantity),
            "date" => Ok(Self::Date),
            other => Err(AbvError::InvalidSortField(other.to_string())),
        }
    }
}

/// Parse a list of field names, rejecting the whole list on the first
/// unknown entry.
pub fn parse_sort_fields<S: AsRef<str>>(fields: &[S]) -> Result<Vec<SortField>, AbvError> {
    fields.iter().map(|f| f.as_ref().parse()).collect()
}
