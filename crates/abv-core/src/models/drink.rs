use serde::{Deserialize, Serialize};

/// Stored information about an available beverage.
///
/// Field names serialize in PascalCase because the front-end templates
/// read them that way (`{{Brand}}`, `{{Logo}}`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Drink {
    /// Natural key. At most one drink exists per barcode.
    pub barcode: String,
    pub brand: String,
    pub name: String,
    pub abv: f64,
    pub ibu: i64,
    #[serde(rename = "Type")]
    pub style: String,
    /// Label image URL as reported by the catalog.
    #[serde(default)]
    pub logo: String,
    #[serde(default)]
    pub country: String,
    #[serde(rename = "Shorttype", default)]
    pub short_style: String,
    #[serde(rename = "Shortbrand", default)]
    pub short_brand: String,
    /// Unix seconds at which the drink was first stored.
    #[serde(default)]
    pub date: i64,
}

impl Drink {
    pub fn new(barcode: impl Into<String>, brand: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            barcode: barcode.into(),
            brand: brand.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = style.into();
        self.short_style = crate::scan::shorten_style(&self.style).to_string();
        self
    }

    /// Label file name under the local image cache, if the drink has a logo.
    pub fn logo_file_name(&self) -> Option<&str> {
        if self.logo.is_empty() {
            return None;
        }
        self.logo.rsplit('/').next().filter(|s| !s.is_empty())
    }
}
