pub mod sqlite_book_repository;
pub mod sqlite_category_repository;
pub mod sqlite_message_repository;
pub mod sqlite_offer_repository;
pub mod sqlite_order_repository;
pub mod sqlite_subscriber_repository;
pub mod sqlite_user_repository;

pub use sqlite_book_repository::SqliteBookRepository;
pub use sqlite_category_repository::SqliteCategoryRepository;
pub use sqlite_message_repository::SqliteMessageRepository;
pub use sqlite_offer_repository::SqliteOfferRepository;
pub use sqlite_order_repository::SqliteOrderRepository;
pub use sqlite_subscriber_repository::SqliteSubscriberRepository;
pub use sqlite_user_repository::SqliteUserRepository;
