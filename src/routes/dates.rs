use axum::{extract::State, Json};

use crate::{error::OfferResult, models::date::CareDate, services::dates::DateService, AppState};

/// GET /dates — every date, earliest first
pub async fn list_dates(State(state): State<AppState>) -> OfferResult<Json<Vec<CareDate>>> {
    DateService::list(&*state.store).await.map(Json)
}
