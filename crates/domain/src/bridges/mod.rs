pub mod chat;
pub mod mailer;
pub mod payment;

pub use chat::ChatForwarder;
pub use mailer::{send_detached, Email, Mailer};
pub use payment::{GatewayOrder, PaymentGateway};
