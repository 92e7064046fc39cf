pub mod chat;
pub mod mailer;
pub mod razorpay;

pub use chat::WebhookChatForwarder;
pub use mailer::HttpMailer;
pub use razorpay::RazorpayGateway;
