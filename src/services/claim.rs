//! One-shot claim of an offer.
//!
//! The decision is made by a single conditional write in the store
//! (`set taker where untaken`). Nothing read before or after that write is
//! used to decide who won: a prior read would race, and the follow-up read
//! only builds the response.

use crate::{
    error::{OfferError, OfferResult},
    models::offer::{ClaimOfferRequest, Offer},
    services::metrics::record_claim,
    store::OfferStore,
};

pub const UNAVAILABLE: &str = "Offer already taken or does not exist";

pub struct ClaimService;

impl ClaimService {
    /// Claim `offer_id` for `req.taker_name`.
    ///
    /// Exactly one of any number of concurrent callers gets `Ok`; the rest get
    /// `Conflict`. A missing offer is also `Conflict`. Never retried.
    pub async fn claim(
        store: &dyn OfferStore,
        offer_id: i64,
        req: &ClaimOfferRequest,
    ) -> OfferResult<Offer> {
        let outcome = Self::try_claim(store, offer_id, req).await;
        record_claim(match &outcome {
            Ok(_) => "won",
            Err(OfferError::Conflict(_)) => "conflict",
            Err(OfferError::InvalidArgument(_)) => "invalid",
            Err(_) => "error",
        });
        outcome
    }

    async fn try_claim(
        store: &dyn OfferStore,
        offer_id: i64,
        req: &ClaimOfferRequest,
    ) -> OfferResult<Offer> {
        if offer_id <= 0 {
            return Err(OfferError::invalid("Invalid offer id"));
        }
        let taker_name = req.taker_name.trim();
        if taker_name.is_empty() {
            return Err(OfferError::invalid("taker_name required"));
        }

        match store.mark_taken(offer_id, taker_name).await? {
            0 => {
                tracing::info!(offer_id, "claim lost: offer unavailable");
                Err(OfferError::Conflict(UNAVAILABLE.into()))
            }
            1 => {
                let offer = store.find_offer(offer_id).await?.ok_or_else(|| {
                    OfferError::Internal(format!("offer {offer_id} vanished after being claimed"))
                })?;
                offer.check_invariant()?;
                tracing::info!(offer_id, date_id = offer.date_id, "offer claimed");
                Ok(offer)
            }
            n => {
                tracing::error!(offer_id, affected = n, "claim updated more than one row");
                Err(OfferError::Internal(format!(
                    "claim on offer {offer_id} affected {n} rows"
                )))
            }
        }
    }
}
