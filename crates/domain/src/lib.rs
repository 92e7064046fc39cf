pub mod bridges;
pub mod entities;
pub mod errors;
pub mod repositories;
pub mod services;
pub mod templates;
pub mod tokens;

pub use bridges::*;
pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use services::*;
pub use tokens::*;
