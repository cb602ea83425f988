//! Outbound mail: the transport seam, the SMTP implementation and the
//! HTML bodies rendered for each enquiry.

mod message;
mod smtp;
pub mod templates;

pub use message::OutgoingEmail;
pub use smtp::SmtpMailer;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("invalid email address: {0}")]
    InvalidAddress(String),

    #[error("failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// Delivers a single email and resolves once the transport has accepted or refused it.
///
/// The relay holds one `Arc<dyn Mailer>` for the whole process, so tests can swap the SMTP
/// transport for an in-memory recorder.
#[async_trait]
pub trait Mailer: Send + Sync + 'static {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError>;
}
