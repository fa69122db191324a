use chrono::Utc;
use chrono_tz::Asia::Jakarta;
use serde::Deserialize;

/// Raw contact-form submission as received in the request body.
///
/// Fields stay optional so validation can name the first one that is
/// missing or blank instead of failing wholesale at deserialization.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ContactRequest {
    pub username: Option<String>,
    pub message: Option<String>,
    pub photos: Option<Vec<String>>,
}

/// A validated submission: trimmed, non-empty sender name and message plus
/// zero or more data-URI-encoded photos.
#[derive(Debug, Clone)]
pub struct Contact {
    pub username: String,
    pub message: String,
    pub photos: Vec<String>,
}

impl ContactRequest {
    /// Validates the submission, trimming whitespace from both text fields.
    ///
    /// # Errors
    ///
    /// Returns the name of the first failing field (`username` is checked
    /// before `message`).
    pub fn validate(self) -> Result<Contact, &'static str> {
        let username = self
            .username
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("username")?
            .to_string();

        let message = self
            .message
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or("message")?
            .to_string();

        Ok(Contact {
            username,
            message,
            photos: self.photos.unwrap_or_default(),
        })
    }
}

impl Contact {
    /// Full notification caption: sender, message and send time.
    #[must_use]
    pub fn full_caption(&self, sent_at: &str) -> String {
        format!(
            "📨 **PESAN BARU DARI TO-KIZHOO**\n\n👤 **Nama:** {}\n💬 **Pesan:** {}\n\n🕒 **Dikirim:** {}",
            self.username, self.message, sent_at
        )
    }

    /// Text-only notification: the full caption plus the signature footer.
    #[must_use]
    pub fn text_notification(&self, sent_at: &str) -> String {
        format!(
            "{}\n\n💝 *Pesan ini dikirim melalui To-Kizhoo*",
            self.full_caption(sent_at)
        )
    }

    /// Short caption for secondary photos, numbered from one.
    #[must_use]
    pub fn photo_caption(&self, index: usize) -> String {
        format!("📸 Foto {} dari {}", index + 1, self.username)
    }
}

/// Jakarta-local send timestamp embedded in captions.
#[must_use]
pub fn caption_timestamp() -> String {
    Utc::now()
        .with_timezone(&Jakarta)
        .format("%-d/%-m/%Y, %H.%M.%S")
        .to_string()
}
