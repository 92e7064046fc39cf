pub mod database;
pub mod gateways;
pub mod repositories;

pub use database::Database;
pub use gateways::*;
pub use repositories::*;
