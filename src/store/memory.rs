use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::OfferStore;
use crate::models::{
    date::{CareDate, NewCareDate},
    offer::{CreateOfferRequest, Offer},
};

/// In-process store for development and tests.
///
/// The single lock stands in for the database's row-level atomicity: each
/// trait method is one critical section, and the lock is never held across
/// an `.await`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    dates: Vec<CareDate>,
    // Kept in insertion order.
    offers: Vec<Offer>,
    next_date_id: i64,
    next_offer_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl Inner {
    /// Creation stamp that never goes backwards, even if the wall clock does.
    fn next_created_at(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let stamp = self.last_created_at.map_or(now, |last| last.max(now));
        self.last_created_at = Some(stamp);
        stamp
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Test helper: store a prebuilt offer verbatim, with its own timestamps.
    /// Fails if the id is taken or the date is unknown.
    #[cfg(test)]
    pub(crate) fn import_offer(&self, offer: Offer) -> anyhow::Result<()> {
        let mut inner = self.lock()?;
        if !inner.dates.iter().any(|d| d.id == offer.date_id) {
            anyhow::bail!("unknown date_id {}", offer.date_id);
        }
        if inner.offers.iter().any(|o| o.id == offer.id) {
            anyhow::bail!("duplicate offer id {}", offer.id);
        }
        inner.next_offer_id = inner.next_offer_id.max(offer.id);
        inner.offers.push(offer);
        Ok(())
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Inner>> {
        self.inner
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store lock poisoned"))
    }
}

#[async_trait]
impl OfferStore for MemoryStore {
    async fn ping(&self) -> anyhow::Result<()> {
        self.lock().map(|_| ())
    }

    async fn list_dates(&self) -> anyhow::Result<Vec<CareDate>> {
        let mut dates = self.lock()?.dates.clone();
        dates.sort_by_key(|d| d.date);
        Ok(dates)
    }

    async fn insert_date(&self, date: &NewCareDate) -> anyhow::Result<CareDate> {
        let mut inner = self.lock()?;
        if let Some(existing) = inner.dates.iter_mut().find(|d| d.date == date.date) {
            if date.label.is_some() {
                existing.label = date.label.clone();
            }
            return Ok(existing.clone());
        }
        inner.next_date_id += 1;
        let row = CareDate {
            id: inner.next_date_id,
            date: date.date,
            label: date.label.clone(),
        };
        inner.dates.push(row.clone());
        Ok(row)
    }

    async fn list_offers(&self, date_id: i64) -> anyhow::Result<Vec<Offer>> {
        let mut offers: Vec<Offer> = self
            .lock()?
            .offers
            .iter()
            .filter(|o| o.date_id == date_id)
            .cloned()
            .collect();
        // Stable sort keeps insertion order for equal timestamps.
        offers.sort_by_key(|o| o.created_at);
        Ok(offers)
    }

    async fn insert_offer(&self, req: &CreateOfferRequest) -> anyhow::Result<Option<Offer>> {
        let mut inner = self.lock()?;
        if !inner.dates.iter().any(|d| d.id == req.date_id) {
            return Ok(None);
        }
        inner.next_offer_id += 1;
        let created_at = inner.next_created_at(Utc::now());
        let offer = Offer {
            id: inner.next_offer_id,
            date_id: req.date_id,
            child_name: req.child_name.clone(),
            group: req.group,
            taken_by_name: None,
            created_at,
            taken_at: None,
        };
        inner.offers.push(offer.clone());
        Ok(Some(offer))
    }

    async fn mark_taken(&self, offer_id: i64, taker_name: &str) -> anyhow::Result<u64> {
        let mut inner = self.lock()?;
        let now = Utc::now();
        let mut affected = 0;
        for offer in inner
            .offers
            .iter_mut()
            .filter(|o| o.id == offer_id && o.taken_by_name.is_none())
        {
            offer.taken_by_name = Some(taker_name.to_string());
            offer.taken_at = Some(now);
            affected += 1;
        }
        Ok(affected)
    }

    async fn find_offer(&self, offer_id: i64) -> anyhow::Result<Option<Offer>> {
        Ok(self.lock()?.offers.iter().find(|o| o.id == offer_id).cloned())
    }
}
