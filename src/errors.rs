use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Telegram API Error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Telegram Photo API Error {status}: {body}")]
    PhotoApi { status: u16, body: String },

    #[error("Format base64 tidak valid")]
    InvalidPhotoFormat,

    #[error("Data base64 terlalu pendek")]
    PhotoTooSmall,

    #[error("Failed to send HTTP request: {0}")]
    Http(String),

    #[error("{0}")]
    Other(String),
}

impl From<reqwest::Error> for RelayError {
    fn from(error: reqwest::Error) -> Self {
        RelayError::Http(error.to_string())
    }
}

impl From<anyhow::Error> for RelayError {
    fn from(error: anyhow::Error) -> Self {
        RelayError::Other(error.to_string())
    }
}

/// A classified relay failure: taxonomy code, HTTP status and the
/// user-facing message/remediation pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classified {
    pub code: &'static str,
    pub status: u16,
    pub message: &'static str,
    pub solution: &'static str,
}

/// Maps a dispatch failure onto the fixed error taxonomy by inspecting the
/// error's display text. Best-effort: upstream phrasing is not guaranteed
/// stable, but our own sender errors embed the HTTP status so the common
/// cases match deterministically.
#[must_use]
pub fn classify(error: &RelayError) -> Classified {
    let text = error.to_string();

    if text.contains("Failed to send HTTP request")
        || text.contains("fetch failed")
        || text.contains("NetworkError")
    {
        Classified {
            code: "NETWORK_ERROR",
            status: 500,
            message: "Tidak dapat terhubung ke Telegram API.",
            solution: "Periksa koneksi internet atau coba lagi nanti.",
        }
    } else if text.contains("401") || text.contains("Unauthorized") {
        Classified {
            code: "BOT_TOKEN_INVALID",
            status: 401,
            message: "Token Bot Telegram tidak valid!",
            solution: "Periksa BOT_TOKEN di environment variables.",
        }
    } else if text.contains("403") || text.contains("Forbidden") {
        Classified {
            code: "BOT_BLOCKED",
            status: 403,
            message: "Bot diblokir atau tidak memiliki akses!",
            solution: "Pastikan bot sudah di-start dan tidak diblokir oleh pengguna.",
        }
    } else if text.contains("400") && text.contains("chat not found") {
        Classified {
            code: "CHAT_ID_INVALID",
            status: 400,
            message: "ID Chat tidak valid!",
            solution: "Periksa OWNER_ID di environment variables. Pastikan ID benar.",
        }
    } else if text.contains("400") {
        Classified {
            code: "BAD_REQUEST",
            status: 400,
            message: "Permintaan tidak valid ke Telegram API.",
            solution: "Format data mungkin salah. Hubungi developer.",
        }
    } else {
        Classified {
            code: "UNKNOWN_ERROR",
            status: 500,
            message: "Gagal mengirim pesan. Silakan coba lagi.",
            solution: "Coba beberapa menit lagi atau hubungi administrator.",
        }
    }
}
