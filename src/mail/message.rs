//! src/mail/message.rs

/// A rendered email. The sender address is always the relay's SMTP account; only the display
/// name changes between messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub sender_name: &'static str,
    pub to: String,
    pub reply_to: Option<String>,
    pub subject: String,
    pub html_body: String,
}
