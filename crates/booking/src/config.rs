/// Booking service configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct BookingConfig {
    /// How many times a booking commit re-reads the course after losing
    /// the version race before giving up (default: `5`).
    pub max_commit_retries: u32,
    /// Currency for created payment orders (default: `INR`).
    pub currency: String,
    /// Merchant secret for receipt signature verification.
    pub payment_secret: String,
}

impl BookingConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default            |
    /// |--------------------------|--------------------|
    /// | `BOOKING_COMMIT_RETRIES` | `5`                |
    /// | `PAYMENT_CURRENCY`       | `INR`              |
    /// | `PAYMENT_SECRET`         | `local-dev-secret` |
    pub fn from_env() -> Self {
        // Allow a missing `.env` file without failing.
        let _ = dotenvy::dotenv();

        let max_commit_retries: u32 = std::env::var("BOOKING_COMMIT_RETRIES")
            .unwrap_or_else(|_| "5".into())
            .parse()
            .expect("BOOKING_COMMIT_RETRIES must be a valid u32");

        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "INR".into());

        let payment_secret =
            std::env::var("PAYMENT_SECRET").unwrap_or_else(|_| "local-dev-secret".into());

        Self {
            max_commit_retries,
            currency,
            payment_secret,
        }
    }
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            max_commit_retries: 5,
            currency: "INR".to_string(),
            payment_secret: "local-dev-secret".to_string(),
        }
    }
}
