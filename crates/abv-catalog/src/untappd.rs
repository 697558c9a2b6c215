use abv_core::config::UntappdConfig;
use abv_core::Drink;
use reqwest::StatusCode;
use serde::Deserialize;

use crate::error::{CatalogError, Result};

const USER_AGENT: &str = concat!("abv/", env!("CARGO_PKG_VERSION"));

/// Whitespace of the Latin-1 range stripped from catalog strings.
const LATIN1_WS: &[char] = &[' ', '\x0C', '\t', '\n', '\r', '\x0B', '\u{85}', '\u{A0}'];

pub fn trim_ws(s: &str) -> String {
    s.trim_matches(LATIN1_WS).to_string()
}

// ─── Response shape (only the consumed fields) ─────────────

#[derive(Debug, Deserialize)]
struct SearchResponse {
    meta: Meta,
    #[serde(default)]
    response: Option<SearchBody>,
}

#[derive(Debug, Deserialize)]
struct Meta {
    code: u16,
    #[serde(default)]
    error_detail: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    beers: BeerList,
}

#[derive(Debug, Deserialize)]
struct BeerList {
    #[serde(default)]
    items: Vec<BeerItem>,
}

#[derive(Debug, Deserialize)]
struct BeerItem {
    beer: Beer,
    brewery: Brewery,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Beer {
    beer_name: String,
    beer_abv: f64,
    beer_ibu: f64,
    beer_style: String,
    beer_label: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Brewery {
    brewery_name: String,
    brewery_label: String,
    country_name: String,
}

impl BeerItem {
    fn into_drink(self) -> Drink {
        let logo = if self.brewery.brewery_label.trim().is_empty() {
            &self.beer.beer_label
        } else {
            &self.brewery.brewery_label
        };
        Drink {
            name: trim_ws(&self.beer.beer_name),
            brand: trim_ws(&self.brewery.brewery_name),
            abv: self.beer.beer_abv,
            ibu: self.beer.beer_ibu as i64,
            style: trim_ws(&self.beer.beer_style),
            logo: trim_ws(logo),
            country: trim_ws(&self.brewery.country_name),
            ..Default::default()
        }
    }
}

// ─── Client ────────────────────────────────────────────────

pub struct UntappdClient {
    client: reqwest::Client,
    base_url: String,
    client_id: String,
    client_secret: String,
}

impl UntappdClient {
    pub fn new(config: &UntappdConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        })
    }

    fn credentials(&self) -> Result<(&str, &str)> {
        if self.client_id.is_empty() {
            return Err(CatalogError::MissingCredentials("UntappdID"));
        }
        if self.client_secret.is_empty() {
            return Err(CatalogError::MissingCredentials("UntappdSecret"));
        }
        Ok((&self.client_id, &self.client_secret))
    }

    /// Search beers by free-text name. Barcode and derived short fields of
    /// the returned drinks are left empty.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Drink>> {
        let (id, secret) = self.credentials()?;
        let url = format!(
            "{}/v4/search/beer?client_id={}&client_secret={}&q={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(secret),
            urlencoding::encode(name)
        );
        tracing::debug!(query = name, "searching Untappd");

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        let parsed: SearchResponse = match serde_json::from_str(&text) {
            Ok(parsed) => parsed,
            Err(_) if !status.is_success() => {
                return Err(CatalogError::Api(status.as_u16(), status_text(status.as_u16())));
            }
            Err(e) => return Err(CatalogError::Parse(e.to_string())),
        };

        if parsed.meta.code != 200 {
            let detail = parsed
                .meta
                .error_detail
                .unwrap_or_else(|| status_text(parsed.meta.code));
            return Err(CatalogError::Api(parsed.meta.code, detail));
        }

        let items = parsed.response.map(|r| r.beers.items).unwrap_or_default();
        let drinks: Vec<Drink> = items.into_iter().map(BeerItem::into_drink).collect();
        tracing::info!(query = name, results = drinks.len(), "Untappd search finished");
        Ok(drinks)
    }
}

fn status_text(code: u16) -> String {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("Unknown")
        .to_string()
}
