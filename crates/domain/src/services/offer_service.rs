use crate::entities::Offer;
use crate::errors::StoreError;
use crate::repositories::OfferRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Discount codes: checkout validation plus admin management.
pub struct OfferService {
    offer_repository: Arc<dyn OfferRepository>,
}

impl OfferService {
    pub fn new(offer_repository: Arc<dyn OfferRepository>) -> Self {
        Self { offer_repository }
    }

    /// Checkout promo lookup. Unknown codes are NotFound; expired codes
    /// are rejected but not deleted.
    pub async fn validate_code(&self, code: &str) -> Result<Offer, StoreError> {
        let offer = match self.offer_repository.find_by_code(code).await? {
            Some(offer) => offer,
            None => return Err(StoreError::OfferNotFound),
        };
        if offer.is_expired() {
            return Err(StoreError::ValidationError("Offer has expired".to_string()));
        }
        Ok(offer)
    }

    pub async fn create_offer(
        &self,
        code: String,
        discount_percentage: f64,
        expiration_date: DateTime<Utc>,
        description: String,
    ) -> Result<Offer, StoreError> {
        let offer = Offer::new(code, discount_percentage, expiration_date, description);
        offer.validate()?;
        if self
            .offer_repository
            .find_by_code(&offer.code)
            .await?
            .is_some()
        {
            return Err(StoreError::ValidationError(
                "Offer code already exists".to_string(),
            ));
        }
        self.offer_repository.save(&offer).await
    }

    pub async fn list_offers(&self) -> Result<Vec<Offer>, StoreError> {
        self.offer_repository.find_all().await
    }

    pub async fn delete_offer(&self, id: Uuid) -> Result<(), StoreError> {
        if self.offer_repository.find_by_id(id).await?.is_none() {
            return Err(StoreError::OfferNotFound);
        }
        self.offer_repository.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::InMemoryOffers;
    use chrono::Duration;

    fn service() -> OfferService {
        OfferService::new(Arc::new(InMemoryOffers::default()))
    }

    #[tokio::test]
    async fn valid_code_round_trips() {
        let service = service();
        service
            .create_offer(
                "WELCOME10".to_string(),
                10.0,
                Utc::now() + Duration::days(30),
                "Welcome offer".to_string(),
            )
            .await
            .unwrap();

        let offer = service.validate_code("WELCOME10").await.unwrap();
        assert_eq!(offer.discount_percentage, 10.0);
    }

    #[tokio::test]
    async fn unknown_code_is_not_found() {
        let service = service();
        assert!(matches!(
            service.validate_code("NOPE").await,
            Err(StoreError::OfferNotFound)
        ));
    }

    #[tokio::test]
    async fn expired_code_is_rejected() {
        let service = service();
        service
            .create_offer(
                "OLD".to_string(),
                15.0,
                Utc::now() - Duration::days(1),
                String::new(),
            )
            .await
            .unwrap();

        let err = service.validate_code("OLD").await.unwrap_err();
        assert_eq!(err.to_string(), "Offer has expired");
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let service = service();
        service
            .create_offer(
                "WELCOME10".to_string(),
                10.0,
                Utc::now() + Duration::days(30),
                String::new(),
            )
            .await
            .unwrap();

        let err = service
            .create_offer(
                "WELCOME10".to_string(),
                20.0,
                Utc::now() + Duration::days(30),
                String::new(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Offer code already exists");
    }

    #[tokio::test]
    async fn out_of_range_discount_is_rejected() {
        let service = service();
        let err = service
            .create_offer(
                "BIG".to_string(),
                120.0,
                Utc::now() + Duration::days(30),
                String::new(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ValidationError(_)));
    }
}
