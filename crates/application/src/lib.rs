use config::Config;
use domain::*;
use infrastructure::*;
use std::sync::Arc;

mod seed;

/// Storefront application - wires every domain service to its adapters
pub struct StoreApp {
    pub catalog_service: CatalogService,
    pub identity_service: IdentityService,
    pub order_service: OrderService,
    pub payment_service: PaymentService,
    pub newsletter_service: NewsletterService,
    pub message_service: MessageService,
    pub offer_service: OfferService,
    pub chat_forwarder: Arc<dyn ChatForwarder>,
    // Repository handles kept for the boot-time seeder.
    book_repository: Arc<dyn BookRepository>,
    user_repository: Arc<dyn UserRepository>,
    offer_repository: Arc<dyn OfferRepository>,
    category_repository: Arc<dyn CategoryRepository>,
}

impl StoreApp {
    pub async fn new(config: &Config) -> Result<Self, StoreError> {
        // Infrastructure layer - database setup
        let database = Database::connect(&config.database_url).await?;
        let pool = database.get_pool();

        // Create repository implementations
        let book_repository: Arc<dyn BookRepository> =
            Arc::new(SqliteBookRepository::new(pool.clone()));
        let user_repository: Arc<dyn UserRepository> =
            Arc::new(SqliteUserRepository::new(pool.clone()));
        let order_repository: Arc<dyn OrderRepository> =
            Arc::new(SqliteOrderRepository::new(pool.clone()));
        let offer_repository: Arc<dyn OfferRepository> =
            Arc::new(SqliteOfferRepository::new(pool.clone()));
        let subscriber_repository: Arc<dyn SubscriberRepository> =
            Arc::new(SqliteSubscriberRepository::new(pool.clone()));
        let message_repository: Arc<dyn MessageRepository> =
            Arc::new(SqliteMessageRepository::new(pool.clone()));
        let category_repository: Arc<dyn CategoryRepository> =
            Arc::new(SqliteCategoryRepository::new(pool));

        // Outbound bridges
        let mailer: Arc<dyn Mailer> = Arc::new(HttpMailer::new(
            config.mail_base_url.clone(),
            config.mail_api_key.clone(),
            config.mail_from.clone(),
        ));
        let gateway: Arc<dyn PaymentGateway> = Arc::new(RazorpayGateway::new(
            config.gateway_base_url.clone(),
            config.gateway_key_id.clone(),
            config.gateway_key_secret.clone(),
        ));
        let chat_forwarder: Arc<dyn ChatForwarder> =
            Arc::new(WebhookChatForwarder::new(config.chat_webhook_url.clone()));

        let signer = TokenSigner::new(config.token_secret.clone(), config.token_ttl_days);

        // Domain services
        let catalog_service =
            CatalogService::new(book_repository.clone(), category_repository.clone());

        let identity_service = IdentityService::new(
            user_repository.clone(),
            book_repository.clone(),
            mailer.clone(),
            signer,
        );

        let order_service = OrderService::new(
            order_repository.clone(),
            book_repository.clone(),
            user_repository.clone(),
            offer_repository.clone(),
            mailer.clone(),
        );

        let payment_service = PaymentService::new(
            order_repository,
            gateway,
            config.gateway_key_id.clone(),
            config.gateway_key_secret.clone(),
        );

        let newsletter_service = NewsletterService::new(subscriber_repository, mailer);
        let message_service = MessageService::new(message_repository);
        let offer_service = OfferService::new(offer_repository.clone());

        Ok(Self {
            catalog_service,
            identity_service,
            order_service,
            payment_service,
            newsletter_service,
            message_service,
            offer_service,
            chat_forwarder,
            book_repository,
            user_repository,
            offer_repository,
            category_repository,
        })
    }

    /// Loads the demo catalog, accounts, and promo codes into an empty
    /// store. A store that already has books is left untouched, so this
    /// is safe to call on every boot.
    pub async fn seed_if_empty(&self) -> Result<(), StoreError> {
        seed::run(self).await
    }
}
