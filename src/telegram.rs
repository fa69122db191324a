//! Telegram Bot API client: one text-send and one photo-send operation.
//!
//! Docs: <https://core.telegram.org/bots/api>

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use once_cell::sync::Lazy;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::{error, info};

use crate::core::config::AppConfig;
use crate::errors::RelayError;

/// Minimum plausible length of the encoded image payload. A cheap sanity
/// floor, not a full image validation.
const MIN_BASE64_LEN: usize = 100;

// Static HTTP client
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| {
            // This should not happen with default configuration, but provides a fallback
            Client::new()
        })
});

/// Outbound notification operations the dispatcher is written against.
///
/// `TelegramBot` is the production implementation; tests substitute a
/// scripted fake to exercise the dispatch and fallback logic offline.
#[async_trait]
pub trait Notifier {
    /// Sends a plain text notification with Markdown formatting enabled.
    async fn send_text(&self, text: &str) -> Result<Value, RelayError>;

    /// Sends one data-URI-encoded photo with the given caption.
    async fn send_photo(&self, photo: &str, caption: &str) -> Result<Value, RelayError>;
}

/// Telegram Bot API client bound to one bot credential and one target chat.
pub struct TelegramBot {
    base_url: String,
    chat_id: String,
}

impl TelegramBot {
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        Self {
            base_url: format!("https://api.telegram.org/bot{}", config.bot_token),
            chat_id: config.chat_id.clone(),
        }
    }

    /// Extracts and decodes the base64 payload of a data URI.
    ///
    /// # Errors
    ///
    /// Fails without any network I/O when the `;base64,` marker is missing,
    /// the encoded payload is implausibly short, or it does not decode.
    pub fn decode_photo(photo: &str) -> Result<Vec<u8>, RelayError> {
        let encoded = photo
            .split_once(";base64,")
            .map(|(_, data)| data)
            .ok_or(RelayError::InvalidPhotoFormat)?;

        if encoded.len() < MIN_BASE64_LEN {
            return Err(RelayError::PhotoTooSmall);
        }

        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| RelayError::InvalidPhotoFormat)
    }
}

#[async_trait]
impl Notifier for TelegramBot {
    async fn send_text(&self, text: &str) -> Result<Value, RelayError> {
        info!("Sending text notification to Telegram");

        let url = format!("{}/sendMessage", self.base_url);
        let response = HTTP_CLIENT
            .post(&url)
            .json(&json!({
                "chat_id": self.chat_id,
                "text": text,
                "parse_mode": "Markdown",
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Telegram sendMessage failed");
            return Err(RelayError::Api {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }

    async fn send_photo(&self, photo: &str, caption: &str) -> Result<Value, RelayError> {
        info!("Sending photo notification to Telegram");

        let bytes = Self::decode_photo(photo)?;
        let filename = format!("photo_{}.jpg", Utc::now().timestamp_millis());

        let form = Form::new()
            .text("chat_id", self.chat_id.clone())
            .text("caption", caption.to_string())
            .text("parse_mode", "Markdown")
            .part("photo", Part::bytes(bytes).file_name(filename));

        let url = format!("{}/sendPhoto", self.base_url);
        let response = HTTP_CLIENT.post(&url).multipart(form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), body = %body, "Telegram sendPhoto failed");
            return Err(RelayError::PhotoApi {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response.json().await?)
    }
}
