pub mod book;
pub mod category;
pub mod message;
pub mod offer;
pub mod order;
pub mod subscriber;
pub mod user;

pub use book::*;
pub use category::*;
pub use message::*;
pub use offer::*;
pub use order::*;
pub use subscriber::*;
pub use user::*;
