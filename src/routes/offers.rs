use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::{OfferError, OfferResult},
    models::offer::{parse_positive_id, ClaimOfferRequest, CreateOfferRequest, Offer},
    routes::input::InputParams,
    services::{claim::ClaimService, metrics::record_claim, offers::OfferService},
    AppState,
};

#[derive(Debug, Deserialize)]
pub struct OffersQuery {
    pub date_id: Option<String>,
}

/// GET /offers?date_id=N
pub async fn list_offers(
    State(state): State<AppState>,
    query: Result<Query<OffersQuery>, QueryRejection>,
) -> OfferResult<Json<Vec<Offer>>> {
    let date_id = query
        .ok()
        .and_then(|Query(q)| q.date_id)
        .as_deref()
        .and_then(parse_positive_id)
        .ok_or_else(|| OfferError::invalid("Missing or invalid date_id"))?;

    OfferService::list(&*state.store, date_id).await.map(Json)
}

/// POST /offers — form or JSON with date_id, child_name, group
pub async fn create_offer(
    State(state): State<AppState>,
    params: InputParams,
) -> OfferResult<(StatusCode, Json<Offer>)> {
    let req = CreateOfferRequest::parse(
        params.get("date_id"),
        params.get("child_name"),
        params.get("group"),
    )?;

    OfferService::create(&*state.store, &req)
        .await
        .map(|offer| (StatusCode::CREATED, Json(offer)))
}

/// POST /offers/{id}/take — form or JSON with taker_name
pub async fn take_offer(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    params: InputParams,
) -> OfferResult<Json<Offer>> {
    // Only a run of digits names an offer; `abc` or `-1` is an unknown path.
    if !is_digits(&raw_id) {
        return Err(OfferError::NotFound("Not Found".into()));
    }
    let parsed = parse_positive_id(&raw_id)
        .ok_or_else(|| OfferError::invalid("Invalid offer id"))
        .and_then(|id| Ok((id, ClaimOfferRequest::parse(params.get("taker_name"))?)));
    let (offer_id, req) = match parsed {
        Ok(parsed) => parsed,
        Err(e) => {
            record_claim("invalid");
            return Err(e);
        }
    };

    ClaimService::claim(&*state.store, offer_id, &req).await.map(Json)
}

fn is_digits(segment: &str) -> bool {
    !segment.is_empty() && segment.bytes().all(|b| b.is_ascii_digit())
}
