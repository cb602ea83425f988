//! src/mail/smtp.rs

use lettre::message::{Mailbox, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::transport::smtp::client::{Tls, TlsParameters};
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

use async_trait::async_trait;

use crate::config::SmtpSettings;

use super::{MailError, Mailer, OutgoingEmail};

/// Authenticated SMTP relay built once at startup and shared by every request.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    account: Address,
}

impl SmtpMailer {
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let account = parse_address(&settings.username)?;

        let tls_parameters = TlsParameters::new(settings.host.clone())?;
        let tls = if settings.implicit_tls() {
            Tls::Wrapper(tls_parameters)
        } else {
            Tls::Opportunistic(tls_parameters)
        };

        let transport = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&settings.host)
            .port(settings.port)
            .tls(tls)
            .credentials(Credentials::new(
                settings.username.clone(),
                settings.password.expose_secret().clone(),
            ))
            .build();

        Ok(Self { transport, account })
    }

    /// Opens a connection and authenticates without sending anything.
    #[tracing::instrument(name = "Verifying SMTP connection", skip(self))]
    pub async fn verify(&self) -> Result<bool, MailError> {
        Ok(self.transport.test_connection().await?)
    }

    fn build_message(&self, email: &OutgoingEmail) -> Result<Message, MailError> {
        let mut builder = Message::builder()
            .from(Mailbox::new(
                Some(email.sender_name.to_string()),
                self.account.clone(),
            ))
            .to(Mailbox::new(None, parse_address(&email.to)?))
            .subject(&email.subject);

        // Only the recipient must be deliverable; an unusable Reply-To is dropped.
        if let Some(reply_to) = &email.reply_to {
            match parse_address(reply_to) {
                Ok(address) => builder = builder.reply_to(Mailbox::new(None, address)),
                Err(e) => tracing::warn!(error.message = %e, "Sending without a Reply-To header"),
            }
        }

        Ok(builder.singlepart(SinglePart::html(email.html_body.clone()))?)
    }
}

fn parse_address(address: &str) -> Result<Address, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[tracing::instrument(name = "Sending email over SMTP", skip(self, email), fields(subject = %email.subject))]
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = self.build_message(email)?;
        self.transport.send(message).await?;
        Ok(())
    }
}
