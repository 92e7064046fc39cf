pub mod catalog_service;
pub mod identity_service;
pub mod message_service;
pub mod newsletter_service;
pub mod offer_service;
pub mod order_service;
pub mod payment_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog_service::{BookUpdate, CatalogService};
pub use identity_service::{
    AddressUpdate, AdminUserUpdate, AuthenticatedUser, IdentityService, ProfileUpdate,
};
pub use message_service::MessageService;
pub use newsletter_service::NewsletterService;
pub use offer_service::OfferService;
pub use order_service::{DraftItem, OrderDraft, OrderService, SalesStats};
pub use payment_service::{PaymentService, PaymentSession, VerifyRequest};
