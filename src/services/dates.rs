use crate::{
    error::OfferResult,
    models::date::{CareDate, NewCareDate},
    store::OfferStore,
};

pub struct DateService;

impl DateService {
    pub async fn list(store: &dyn OfferStore) -> OfferResult<Vec<CareDate>> {
        Ok(store.list_dates().await?)
    }

    pub async fn add(store: &dyn OfferStore, date: &NewCareDate) -> OfferResult<CareDate> {
        let row = store.insert_date(date).await?;
        tracing::info!(date_id = row.id, date = %row.date, "date available");
        Ok(row)
    }

    /// Insert every `SEED_DATES` entry; used by the in-memory backend.
    pub async fn seed(store: &dyn OfferStore, dates: &[NewCareDate]) -> OfferResult<()> {
        for date in dates {
            Self::add(store, date).await?;
        }
        Ok(())
    }
}
