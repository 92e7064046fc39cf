pub mod book_repository;
pub mod category_repository;
pub mod message_repository;
pub mod offer_repository;
pub mod order_repository;
pub mod subscriber_repository;
pub mod user_repository;

pub use book_repository::{BookFilter, BookRepository};
pub use category_repository::CategoryRepository;
pub use message_repository::MessageRepository;
pub use offer_repository::OfferRepository;
pub use order_repository::{OrderRepository, StockDecrement};
pub use subscriber_repository::SubscriberRepository;
pub use user_repository::UserRepository;
