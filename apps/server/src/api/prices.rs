use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use price_proxy_core::{project_all, project_one, PriceLookup};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{NoPricesResponse, PriceMap, PriceResponse, PriceUnavailableResponse, PricesResponse},
};

const NO_PRICE_DATA: &str = "No valid price data available";

/// All tracked prices. 503 until at least one asset has a price.
async fn get_prices(State(state): State<Arc<AppState>>) -> Response {
    let projection = project_all(&state.registry, &state.cache.snapshot());
    let has_any_price = projection.has_any_price();
    let prices: PriceMap = projection
        .prices
        .into_iter()
        .map(|(id, view)| (id, view.into()))
        .collect();

    if !has_any_price {
        let body = NoPricesResponse {
            error: NO_PRICE_DATA.to_string(),
            prices,
        };
        return (StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response();
    }

    Json(PricesResponse {
        prices,
        partial: projection.partial,
        timestamp: Utc::now(),
    })
    .into_response()
}

/// One asset, by symbol (case-insensitive) or asset id.
async fn get_price(
    State(state): State<Arc<AppState>>,
    Path(key): Path<String>,
) -> ApiResult<Response> {
    match project_one(&state.registry, |id| state.cache.get(id), &key) {
        PriceLookup::NotFound => Err(ApiError::NotFound),
        PriceLookup::Unavailable {
            error,
            last_updated,
            ..
        } => {
            let body = PriceUnavailableResponse {
                error,
                last_updated,
            };
            Ok((StatusCode::SERVICE_UNAVAILABLE, Json(body)).into_response())
        }
        PriceLookup::Available {
            asset,
            price,
            market_cap,
            last_updated,
        } => Ok(Json(PriceResponse {
            id: asset.api_id,
            symbol: asset.symbol,
            price,
            market_cap,
            last_updated,
        })
        .into_response()),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/prices", get(get_prices))
        .route("/price/{key}", get(get_price))
}
