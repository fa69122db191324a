//! API Lambda handler - validates contact submissions and relays them to Telegram.
//!
//! This module handles:
//! - Method gating (OPTIONS preflight, POST-only)
//! - Input validation (`username` before `message`, both trimmed non-empty)
//! - Dispatch to the Telegram senders, with text fallback and photo pacing
//! - Classification of dispatch failures into the fixed error taxonomy

use lambda_runtime::{Error, LambdaEvent};
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, warn};

use super::{helpers, parsing};
use crate::core::config::AppConfig;
use crate::core::models::{Contact, ContactRequest, caption_timestamp};
use crate::errors::{RelayError, classify};
use crate::telegram::{Notifier, TelegramBot};

pub use self::function_handler as handler;

/// Pause between successive secondary photo sends, keeping the bot under the
/// Telegram rate limit. No pause before the first or after the last.
const PHOTO_SEND_DELAY: Duration = Duration::from_millis(300);

/// Lambda handler for the relay entrypoint.
///
/// # Errors
///
/// Infallible in practice: every failure mode is converted into a structured
/// JSON response rather than a handler error.
#[tracing::instrument(level = "info", skip(event))]
pub async fn function_handler(event: LambdaEvent<Value>) -> Result<Value, Error> {
    Ok(process_request(&event.payload, AppConfig::from_env()).await)
}

/// Processes one platform event into exactly one response value.
///
/// The config-load result is passed in rather than read ad hoc so tests can
/// substitute both the configuration and its absence.
pub async fn process_request(payload: &Value, config: Result<AppConfig, String>) -> Value {
    // ========================================================================
    // Method gate
    // ========================================================================

    let method = parsing::get_method(payload).unwrap_or("");

    if method == "OPTIONS" {
        return helpers::ok_preflight();
    }

    if method != "POST" {
        return helpers::err_method_not_allowed();
    }

    let content_type = payload
        .get("headers")
        .and_then(|h| parsing::get_header_value(h, "content-type"))
        .unwrap_or("");
    info!(method, content_type, "Relay API invoked");

    // ========================================================================
    // Input validation
    // ========================================================================

    // An unreadable body behaves like an empty submission and fails on the
    // first required field.
    let request: ContactRequest = parsing::get_body(payload)
        .and_then(|body| serde_json::from_str(body).ok())
        .unwrap_or_default();

    let contact = match request.validate() {
        Ok(contact) => contact,
        Err(field) => {
            info!(field, "Validation failed");
            return helpers::err_validation(field);
        }
    };

    // ========================================================================
    // Configuration check
    // ========================================================================

    let config = match config {
        Ok(config) => config,
        Err(details) => {
            error!(details = %details, "Environment variables tidak ditemukan");
            return helpers::err_configuration(&details);
        }
    };

    // ========================================================================
    // Dispatch to Telegram
    // ========================================================================

    let bot = TelegramBot::new(&config);

    match dispatch(&bot, &contact).await {
        Ok(()) => {
            info!(sender = %contact.username, "Pesan terkirim");
            helpers::ok_sent(&contact.username)
        }
        Err(e) => {
            error!(error = %e, "Dispatch failed");
            let classified = classify(&e);
            let details = config.expose_error_details().then(|| e.to_string());
            helpers::err_classified(&classified, details.as_deref())
        }
    }
}

/// Sends the notification calls for one validated submission.
///
/// With photos: the first photo carries the full caption, and its failure
/// triggers exactly one plain-text fallback. Every remaining photo is an
/// independent attempt whose failure is logged and skipped; a pause is
/// inserted between successive secondary sends. Without photos: a single
/// text notification.
///
/// # Errors
///
/// Fails only when the single text notification (or the text fallback for a
/// failed first photo) cannot be delivered.
pub async fn dispatch<N: Notifier>(notifier: &N, contact: &Contact) -> Result<(), RelayError> {
    let sent_at = caption_timestamp();

    if contact.photos.is_empty() {
        notifier
            .send_text(&contact.text_notification(&sent_at))
            .await?;
        return Ok(());
    }

    info!(count = contact.photos.len(), "Mengirim foto dengan pesan");

    let caption = contact.full_caption(&sent_at);
    match notifier.send_photo(&contact.photos[0], &caption).await {
        Ok(_) => info!("Foto pertama terkirim"),
        Err(e) => {
            warn!(error = %e, "Gagal mengirim foto pertama, fallback ke teks");
            notifier.send_text(&caption).await?;
        }
    }

    for (index, photo) in contact.photos.iter().enumerate().skip(1) {
        if index > 1 {
            tokio::time::sleep(PHOTO_SEND_DELAY).await;
        }

        match notifier.send_photo(photo, &contact.photo_caption(index)).await {
            Ok(_) => info!(photo = index + 1, "Foto terkirim"),
            Err(e) => {
                // Lanjut ke foto berikutnya meski ada error
                warn!(photo = index + 1, error = %e, "Foto gagal");
            }
        }
    }

    Ok(())
}
