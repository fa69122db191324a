use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub chat_id: String,
    pub stage: String,
}

impl AppConfig {
    /// Loads the configuration from environment variables.
    ///
    /// On failure the error string names the missing variable; the handler
    /// surfaces it verbatim as the `details` field of a `CONFIGURATION_ERROR`
    /// response.
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            bot_token: env::var("BOT_TOKEN")
                .map_err(|_| "BOT_TOKEN tidak ditemukan".to_string())?,
            chat_id: env::var("OWNER_ID")
                .map_err(|_| "OWNER_ID tidak ditemukan".to_string())?,
            stage: env::var("STAGE").unwrap_or_else(|_| "production".to_string()),
        })
    }

    /// Raw upstream error text is only exposed outside production.
    #[must_use]
    pub fn expose_error_details(&self) -> bool {
        self.stage != "production"
    }
}
