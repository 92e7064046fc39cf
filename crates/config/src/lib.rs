use std::env;

/// Process-wide configuration, read from the environment exactly once at
/// startup and injected into every component from there. Nothing else in
/// the workspace touches `env::var`.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_host: String,
    pub api_port: u16,
    /// SQLite connection string, e.g. `sqlite://bookhaven.db` or `sqlite::memory:`.
    pub database_url: String,
    /// Secret used to sign session bearer tokens.
    pub token_secret: String,
    pub token_ttl_days: i64,
    pub gateway_key_id: String,
    pub gateway_key_secret: String,
    /// Payment gateway API root, overridable so tests can point at a stub.
    pub gateway_base_url: String,
    /// Transactional mail provider key; when absent, mail degrades to a logged mock.
    pub mail_api_key: Option<String>,
    pub mail_base_url: String,
    pub mail_from: String,
    /// Support-chat automation webhook endpoint.
    pub chat_webhook_url: String,
    pub cors_origins: Vec<String>,
    /// Insert the sample catalog and demo accounts into an empty store.
    pub seed_on_start: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        // Load .env if present; absence is fine in production.
        dotenv::dotenv().ok();

        let config = Config {
            api_host: env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),

            api_port: env::var("API_PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse()
                .map_err(|e| format!("Invalid API_PORT: {}", e))?,

            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://bookhaven.db".to_string()),

            token_secret: env::var("TOKEN_SECRET")
                .unwrap_or_else(|_| "bookhaven-dev-secret".to_string()),

            token_ttl_days: env::var("TOKEN_TTL_DAYS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .map_err(|e| format!("Invalid TOKEN_TTL_DAYS: {}", e))?,

            gateway_key_id: env::var("RAZORPAY_KEY_ID").unwrap_or_else(|_| "rzp_test_key".to_string()),

            gateway_key_secret: env::var("RAZORPAY_KEY_SECRET")
                .unwrap_or_else(|_| "rzp_test_secret".to_string()),

            gateway_base_url: env::var("RAZORPAY_BASE_URL")
                .unwrap_or_else(|_| "https://api.razorpay.com/v1".to_string()),

            mail_api_key: env::var("RESEND_API_KEY").ok(),

            mail_base_url: env::var("MAIL_BASE_URL")
                .unwrap_or_else(|_| "https://api.resend.com".to_string()),

            mail_from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "BookHaven <onboarding@resend.dev>".to_string()),

            chat_webhook_url: env::var("CHAT_WEBHOOK_URL")
                .unwrap_or_else(|_| "https://sengon8n.app.n8n.cloud/webhook/ai-book".to_string()),

            cors_origins: env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8080,http://localhost:3000".to_string())
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),

            seed_on_start: env::var("SEED_ON_START")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|e| format!("Invalid SEED_ON_START: {}", e))?,
        };

        Ok(config)
    }

    pub fn api_address(&self) -> String {
        format!("{}:{}", self.api_host, self.api_port)
    }
}
