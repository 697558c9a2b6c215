use axum::extract::{Path, State};
use axum::{routing::get, Json, Router};

use abv_core::{parse_sort_fields, StockedDrink};

use crate::error::{ApiError, ApiResult};
use crate::state::ApiState;

/// Query key carrying one sort column per occurrence.
const SORT_KEY: &str = "sortBy";

/// GET /inventory
async fn list_inventory(State(state): State<ApiState>) -> ApiResult<Json<Vec<StockedDrink>>> {
    let drinks = state.store.inventory()?;
    cache_labels(&state, &drinks);
    Ok(Json(drinks))
}

/// GET /inventory/quantity
async fn total_quantity(State(state): State<ApiState>) -> ApiResult<Json<i64>> {
    Ok(Json(state.store.inventory_total_quantity()?))
}

/// GET /inventory/variety
async fn total_variety(State(state): State<ApiState>) -> ApiResult<Json<i64>> {
    Ok(Json(state.store.inventory_total_variety()?))
}

/// GET /inventory/sorted/{fields}
///
/// `fields` is itself a query string, e.g. `sortBy=brand&sortBy=name`.
async fn sorted_inventory(
    State(state): State<ApiState>,
    Path(fields): Path<String>,
) -> ApiResult<Json<Vec<StockedDrink>>> {
    let names = sort_names(&fields)?;
    let order = parse_sort_fields(names.as_slice())?;
    let drinks = state.store.inventory_sorted(&order)?;
    cache_labels(&state, &drinks);
    Ok(Json(drinks))
}

/// Pull every `sortBy` value out of a query string, in order.
pub fn sort_names(query: &str) -> ApiResult<Vec<String>> {
    let pairs: Vec<(String, String)> =
        serde_urlencoded::from_str(query).map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(pairs
        .into_iter()
        .filter(|(key, _)| key == SORT_KEY)
        .map(|(_, value)| value)
        .collect())
}

/// Fetch label images in the background. Failures are only logged.
fn cache_labels(state: &ApiState, drinks: &[StockedDrink]) {
    let Some(images) = &state.images else {
        return;
    };

    for stocked in drinks {
        let drink = &stocked.drink;
        if drink.logo.is_empty() {
            continue;
        }
        let images = images.clone();
        let url = drink.logo.clone();
        let label = format!("{} {}", drink.brand, drink.name);
        tokio::spawn(async move {
            if let Err(e) = images.fetch(&url).await {
                tracing::warn!(drink = %label, error = %e, "failed to cache label image");
            }
        });
    }
}

pub fn router() -> Router<ApiState> {
    Router::new()
        .route("/inventory", get(list_inventory))
        .route("/inventory/quantity", get(total_quantity))
        .route("/inventory/variety", get(total_variety))
        .route("/inventory/sorted/{fields}", get(sorted_inventory))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_names_keeps_order_and_ignores_other_keys() {
        let names = sort_names("sortBy=brand&page=2&sortBy=name").unwrap();
        assert_eq!(names, vec!["brand", "name"]);
    }

    #[test]
    fn test_sort_names_empty_query() {
        assert!(sort_names("").unwrap().is_empty());
    }
}
