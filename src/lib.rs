/// Kizhoo Relay - forwards contact-form submissions (name, message, optional
/// photos) to a fixed Telegram chat via the Bot API.
///
/// The crate implements a single Lambda-style handler:
/// 1. The API handler validates the inbound submission and dispatches one or
///    more Telegram calls (`sendMessage` / `sendPhoto`)
/// 2. Upstream failures are classified into a fixed error taxonomy and
///    returned as structured JSON responses
///
/// # Architecture
///
/// The system uses:
/// - AWS Lambda for serverless execution
/// - reqwest for the Telegram Bot API calls
/// - Tokio for async runtime
///
/// # Example
///
/// ```no_run
/// use kizhoo_relay::core::config::AppConfig;
/// use kizhoo_relay::telegram::{Notifier, TelegramBot};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     // Set up structured logging
///     kizhoo_relay::setup_logging();
///
///     // Create a dummy AppConfig for the example
///     let config = AppConfig {
///         bot_token: "dummy_token".to_string(),
///         chat_id: "123456".to_string(),
///         stage: "development".to_string(),
///     };
///
///     let bot = TelegramBot::new(&config);
///     bot.send_text("Halo dari Kizhoo Relay").await?;
///
///     Ok(())
/// }
/// ```
// Module declarations
pub mod api;
pub mod core;
pub mod errors;
pub mod telegram;

/// Configure structured logging with JSON format for AWS Lambda environments.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable for
/// `CloudWatch` Logs integration. It should be called at the start of each Lambda
/// handler.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your Lambda handler
/// kizhoo_relay::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
