//! Storage seam for dates and offers.
//!
//! Every write that matters for correctness is a single call into the store:
//! the store, not the caller, is responsible for making it indivisible.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::models::{
    date::{CareDate, NewCareDate},
    offer::{CreateOfferRequest, Offer},
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait OfferStore: Send + Sync {
    /// Cheap round-trip used by the health check.
    async fn ping(&self) -> anyhow::Result<()>;

    /// All dates, ordered by calendar date ascending.
    async fn list_dates(&self) -> anyhow::Result<Vec<CareDate>>;

    /// Insert a date, or return the existing row for the same calendar day.
    /// A provided label replaces the stored one.
    async fn insert_date(&self, date: &NewCareDate) -> anyhow::Result<CareDate>;

    /// Offers for one date, ordered by `created_at` then insertion order.
    async fn list_offers(&self, date_id: i64) -> anyhow::Result<Vec<Offer>>;

    /// Insert an untaken offer. Returns `None` when `date_id` does not exist;
    /// the existence check and the insert are one operation.
    async fn insert_offer(&self, req: &CreateOfferRequest) -> anyhow::Result<Option<Offer>>;

    /// Conditional write: set the taker and `taken_at = now` on `offer_id`
    /// only if it is still untaken. Returns the number of rows changed.
    async fn mark_taken(&self, offer_id: i64, taker_name: &str) -> anyhow::Result<u64>;

    async fn find_offer(&self, offer_id: i64) -> anyhow::Result<Option<Offer>>;
}
