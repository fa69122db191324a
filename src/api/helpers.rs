//! Response builders for the relay handler.
//!
//! Every response is a platform-shaped `{statusCode, headers, body}` value
//! whose stringified body carries the relay's JSON envelope. CORS headers
//! are attached to all responses, preflight included.

use chrono::{SecondsFormat, Utc};
use serde_json::{Value, json};

use crate::errors::Classified;

const ALLOW_METHODS: &str = "GET,OPTIONS,PATCH,DELETE,POST,PUT";
const ALLOW_HEADERS: &str = "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, \
     Content-Length, Content-MD5, Content-Type, Date, X-Api-Version";

fn cors_headers() -> Value {
    json!({
        "Access-Control-Allow-Credentials": "true",
        "Access-Control-Allow-Origin": "*",
        "Access-Control-Allow-Methods": ALLOW_METHODS,
        "Access-Control-Allow-Headers": ALLOW_HEADERS,
        "Content-Type": "application/json",
    })
}

fn respond(status_code: u16, body: &Value) -> Value {
    json!({
        "statusCode": status_code,
        "headers": cors_headers(),
        "body": body.to_string(),
    })
}

fn iso_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Returns an empty 200 response for the OPTIONS preflight.
#[must_use]
pub fn ok_preflight() -> Value {
    json!({
        "statusCode": 200,
        "headers": cors_headers(),
        "body": "",
    })
}

/// Returns the 200 success envelope confirming delivery.
#[must_use]
pub fn ok_sent(sender: &str) -> Value {
    respond(
        200,
        &json!({
            "success": true,
            "message": "Pesan berhasil dikirim ke Telegram!",
            "timestamp": iso_timestamp(),
            "sender": sender,
        }),
    )
}

/// Returns the 405 response for any method other than POST/OPTIONS.
#[must_use]
pub fn err_method_not_allowed() -> Value {
    respond(
        405,
        &json!({
            "success": false,
            "error": "METHOD_NOT_ALLOWED",
            "message": "Hanya metode POST yang diizinkan",
        }),
    )
}

/// Returns the 400 validation response naming the failing field.
#[must_use]
pub fn err_validation(field: &str) -> Value {
    let message = if field == "username" {
        "Nama tidak boleh kosong"
    } else {
        "Pesan tidak boleh kosong"
    };

    respond(
        400,
        &json!({
            "success": false,
            "error": "VALIDASI_ERROR",
            "field": field,
            "message": message,
        }),
    )
}

/// Returns the 500 response for a missing bot credential or chat id.
#[must_use]
pub fn err_configuration(details: &str) -> Value {
    respond(
        500,
        &json!({
            "success": false,
            "error": "CONFIGURATION_ERROR",
            "message": "Server tidak dikonfigurasi dengan benar",
            "details": details,
            "solution": "Silakan hubungi administrator untuk mengatur environment variables",
        }),
    )
}

/// Returns the response for a classified dispatch failure. `details` carries
/// the raw error text and is only present outside production.
#[must_use]
pub fn err_classified(classified: &Classified, details: Option<&str>) -> Value {
    let mut body = json!({
        "success": false,
        "error": classified.code,
        "message": classified.message,
        "solution": classified.solution,
        "timestamp": iso_timestamp(),
    });

    if let Some(raw) = details {
        body["details"] = json!(raw);
    }

    respond(classified.status, &body)
}
