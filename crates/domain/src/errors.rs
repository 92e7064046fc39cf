use thiserror::Error;

/// Domain error taxonomy. Display strings double as the user-facing
/// `message` field in API error bodies, so they stay in storefront
/// vocabulary rather than internal jargon.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Book not found")]
    BookNotFound,

    #[error("Book not found: {0}")]
    OrderItemNotFound(String),

    #[error("Order not found")]
    OrderNotFound,

    #[error("User not found")]
    UserNotFound,

    #[error("Offer not found")]
    OfferNotFound,

    #[error("Message not found")]
    MessageNotFound,

    #[error("Category not found")]
    CategoryNotFound,

    #[error("Not enough stock for {0}")]
    InsufficientStock(String),

    #[error("Cannot cancel order that is {0}")]
    InvalidStateTransition(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("{0}")]
    GatewayError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("{0}")]
    Internal(String),
}
