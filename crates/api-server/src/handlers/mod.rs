pub mod books;
pub mod categories;
pub mod chat;
pub mod messages;
pub mod newsletter;
pub mod offers;
pub mod orders;
pub mod payments;
pub mod users;
