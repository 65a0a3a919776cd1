use crate::{
    error::{OfferError, OfferResult},
    models::offer::{non_blank, CreateOfferRequest, Offer},
    services::metrics::OFFERS_CREATED_COUNTER,
    store::OfferStore,
};

pub struct OfferService;

impl OfferService {
    /// Offers for a date in creation order. Pure read.
    pub async fn list(store: &dyn OfferStore, date_id: i64) -> OfferResult<Vec<Offer>> {
        if date_id <= 0 {
            return Err(OfferError::invalid("Missing or invalid date_id"));
        }
        let offers = store.list_offers(date_id).await?;
        for offer in &offers {
            offer.check_invariant()?;
        }
        Ok(offers)
    }

    /// Post a new, untaken offer for an existing date.
    pub async fn create(store: &dyn OfferStore, req: &CreateOfferRequest) -> OfferResult<Offer> {
        let child_name = non_blank(&req.child_name).ok_or_else(|| {
            OfferError::invalid("Invalid payload: date_id, child_name, group required")
        })?;
        if req.date_id <= 0 {
            return Err(OfferError::invalid(
                "Invalid payload: date_id, child_name, group required",
            ));
        }
        let req = CreateOfferRequest { child_name, ..req.clone() };

        let offer = store
            .insert_offer(&req)
            .await?
            .ok_or_else(|| OfferError::NotFound("Unknown date_id".into()))?;
        offer.check_invariant()?;
        if offer.is_taken() {
            return Err(OfferError::Internal(format!(
                "offer {} was created already taken",
                offer.id
            )));
        }

        OFFERS_CREATED_COUNTER.inc();
        tracing::info!(
            offer_id = offer.id,
            date_id = offer.date_id,
            group = %offer.group,
            "offer posted"
        );
        Ok(offer)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, Utc};

    use super::*;
    use crate::{
        models::{date::NewCareDate, offer::Group},
        store::MemoryStore,
    };

    async fn setup() -> (MemoryStore, i64) {
        let store = MemoryStore::new();
        let date = store
            .insert_date(&NewCareDate {
                date: NaiveDate::from_ymd_opt(2025, 9, 10).unwrap(),
                label: None,
            })
            .await
            .unwrap();
        (store, date.id)
    }

    fn req(date_id: i64, name: &str, group: &str) -> OfferResult<CreateOfferRequest> {
        CreateOfferRequest::parse(Some(&date_id.to_string()), Some(name), Some(group))
    }

    #[tokio::test]
    async fn create_validation_outcomes() {
        let (store, date_id) = setup().await;

        let unknown = OfferService::create(&store, &req(999_999, "Mia", "A").unwrap()).await;
        assert!(matches!(unknown, Err(OfferError::NotFound(_))));

        assert!(matches!(req(date_id, "", "A"), Err(OfferError::InvalidArgument(_))));
        assert!(matches!(req(date_id, "Mia", "Z"), Err(OfferError::InvalidArgument(_))));

        let created = OfferService::create(&store, &req(date_id, "Mia", "a").unwrap())
            .await
            .unwrap();
        assert_eq!(created.group, Group::A);
        assert_eq!(created.taken_by_name, None);
        assert_eq!(created.taken_at, None);
    }

    #[tokio::test]
    async fn create_rejects_blank_name_built_directly() {
        let (store, date_id) = setup().await;
        let raw = CreateOfferRequest { date_id, child_name: "   ".into(), group: Group::B };
        assert!(matches!(
            OfferService::create(&store, &raw).await,
            Err(OfferError::InvalidArgument(_))
        ));
        assert!(store.list_offers(date_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_trims_child_name() {
        let (store, date_id) = setup().await;
        let raw = CreateOfferRequest { date_id, child_name: "  Mia ".into(), group: Group::D };
        let offer = OfferService::create(&store, &raw).await.unwrap();
        assert_eq!(offer.child_name, "Mia");
    }

    #[tokio::test]
    async fn list_rejects_non_positive_date() {
        let (store, _) = setup().await;
        assert!(matches!(
            OfferService::list(&store, 0).await,
            Err(OfferError::InvalidArgument(_))
        ));
    }

    #[tokio::test]
    async fn list_is_idempotent() {
        let (store, date_id) = setup().await;
        for name in ["Mia", "Ben", "Ida"] {
            OfferService::create(&store, &req(date_id, name, "C").unwrap()).await.unwrap();
        }
        let first = OfferService::list(&store, date_id).await.unwrap();
        let second = OfferService::list(&store, date_id).await.unwrap();
        assert_eq!(first.len(), 3);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn list_orders_by_created_at_not_id() {
        let (store, date_id) = setup().await;
        let t1 = Utc::now() - Duration::minutes(30);
        // Ids deliberately assigned against creation order.
        for (id, name, at) in [
            (30, "third", t1 + Duration::minutes(2)),
            (10, "second", t1 + Duration::minutes(1)),
            (20, "first", t1),
        ] {
            store
                .import_offer(Offer {
                    id,
                    date_id,
                    child_name: name.into(),
                    group: Group::A,
                    taken_by_name: None,
                    created_at: at,
                    taken_at: None,
                })
                .unwrap();
        }
        let names: Vec<_> = OfferService::list(&store, date_id)
            .await
            .unwrap()
            .into_iter()
            .map(|o| o.child_name)
            .collect();
        assert_eq!(names, ["first", "second", "third"]);
    }

    #[tokio::test]
    async fn list_surfaces_broken_rows_as_internal() {
        let (store, date_id) = setup().await;
        store
            .import_offer(Offer {
                id: 1,
                date_id,
                child_name: "Mia".into(),
                group: Group::A,
                taken_by_name: Some("Lea".into()),
                created_at: Utc::now(),
                taken_at: None,
            })
            .unwrap();
        assert!(matches!(
            OfferService::list(&store, date_id).await,
            Err(OfferError::Internal(_))
        ));
    }
}
