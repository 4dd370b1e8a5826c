use axum::extract::{Path, Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::{debug, error, info};

use crate::errors::AppError;
use crate::models::{ItemType, Portfolio, Position};
use crate::services::portfolio_service;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(fetch_portfolios))
        .route("/:id", get(get_portfolio))
        .route("/:id/positions/:item_type/:symbol", get(get_position))
}

#[derive(Debug, Default, Deserialize)]
pub struct YearQuery {
    year: Option<String>,
}

impl YearQuery {
    // Anything that is not a year falls back to the current one.
    fn year(&self) -> i32 {
        match self.year.as_deref().map(str::parse::<i32>) {
            Some(Ok(year)) => year,
            Some(Err(e)) => {
                debug!("Error on convert year: {}", e);
                portfolio_service::current_year()
            }
            None => portfolio_service::current_year(),
        }
    }
}

pub async fn fetch_portfolios(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Vec<Portfolio>>, AppError> {
    let year = query.year();
    info!("GET /portfolios - Computing all portfolios for {}", year);
    let portfolios =
        portfolio_service::compute_all(state.store.as_ref(), state.market_data.as_ref(), year)
            .await
            .map_err(|e| {
                error!("Failed to compute portfolios: {}", e);
                e
            })?;
    Ok(Json(portfolios))
}

pub async fn get_portfolio(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Portfolio>, AppError> {
    let year = query.year();
    info!("GET /portfolios/{} - Computing portfolio for {}", id, year);
    let portfolio =
        portfolio_service::compute(state.store.as_ref(), state.market_data.as_ref(), &id, year)
            .await
            .map_err(|e| {
                error!("Failed to compute portfolio {}: {}", id, e);
                e
            })?;
    Ok(Json(portfolio))
}

pub async fn get_position(
    State(state): State<AppState>,
    Path((id, item_type, symbol)): Path<(String, String, String)>,
    Query(query): Query<YearQuery>,
) -> Result<Json<Position>, AppError> {
    let year = query.year();
    info!("GET /portfolios/{}/positions/{}/{} - Computing position for {}", id, item_type, symbol, year);
    let item_type: ItemType = item_type.parse().map_err(AppError::Validation)?;
    let position = portfolio_service::compute_position(
        state.store.as_ref(),
        state.market_data.as_ref(),
        &id,
        item_type,
        &symbol,
        year,
    )
    .await
    .map_err(|e| {
        error!("Failed to compute position {}/{} in {}: {}", item_type, symbol, id, e);
        e
    })?;
    Ok(Json(position))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_query_parses_or_falls_back() {
        let explicit = YearQuery { year: Some("2019".into()) };
        assert_eq!(explicit.year(), 2019);

        let garbage = YearQuery { year: Some("last".into()) };
        assert_eq!(garbage.year(), portfolio_service::current_year());

        assert_eq!(YearQuery::default().year(), portfolio_service::current_year());
    }
}
