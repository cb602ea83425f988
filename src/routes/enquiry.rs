use std::fmt::Formatter;

use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse, ResponseError};
use anyhow::Context;

use crate::domain::application::OperatorAddress;
use crate::domain::enquiry::{Enquiry, EnquiryForm, MissingFields};
use crate::mail::templates::{auto_reply_html, notification_html};
use crate::mail::{Mailer, OutgoingEmail};
use crate::utils::error_helpers::error_chain_fmt;

pub const NOTIFICATION_SENDER: &str = "Codebar Website";
pub const AUTO_REPLY_SENDER: &str = "Team Codebar";

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct EnquiryAccepted {
    pub success: bool,
    pub message: String,
}

#[derive(serde::Serialize, serde::Deserialize, Debug)]
pub struct EnquiryRejected {
    pub error: String,
}

#[derive(thiserror::Error)]
pub enum EnquiryError {
    #[error("Missing required fields")]
    ValidationError(#[source] MissingFields),

    // Emails sent before the failure stay sent, there is nothing to roll back.
    #[error("Failed to send emails. Please try again later.")]
    TransportError(#[from] anyhow::Error),
}

impl std::fmt::Debug for EnquiryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for EnquiryError {
    fn status_code(&self) -> StatusCode {
        match self {
            EnquiryError::ValidationError(_) => StatusCode::BAD_REQUEST,
            EnquiryError::TransportError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Display carries only the public message, the cause chain stays in the logs.
        HttpResponse::build(self.status_code()).json(EnquiryRejected {
            error: self.to_string(),
        })
    }
}

/// Notification for the operator's own mailbox; replying goes straight to the enquirer.
pub fn notification_email(enquiry: &Enquiry, operator: &OperatorAddress) -> OutgoingEmail {
    OutgoingEmail {
        sender_name: NOTIFICATION_SENDER,
        to: operator.as_ref().to_string(),
        reply_to: Some(enquiry.email.clone()),
        subject: format!("New Lead: {} - {}", enquiry.service, enquiry.name),
        html_body: notification_html(enquiry),
    }
}

pub fn auto_reply_email(enquiry: &Enquiry) -> OutgoingEmail {
    OutgoingEmail {
        sender_name: AUTO_REPLY_SENDER,
        to: enquiry.email.clone(),
        reply_to: None,
        subject: format!("Request Received: {} @ Codebar", enquiry.service),
        html_body: auto_reply_html(enquiry),
    }
}

/// Relays one enquiry as two emails, the operator notification first.
///
/// There is no deduplication: a client retrying after a timeout produces a second pair.
#[tracing::instrument(
    name = "Submitting a new enquiry",
    skip(body, mailer, operator),
    fields(
        enquirer_email = tracing::field::Empty,
        service = tracing::field::Empty,
    )
)]
pub async fn submit_enquiry(
    body: web::Json<EnquiryForm>,
    mailer: web::Data<dyn Mailer>,
    operator: web::Data<OperatorAddress>,
) -> Result<HttpResponse, EnquiryError> {
    let enquiry = Enquiry::try_from(body.0).map_err(|e| {
        tracing::warn!("Rejected enquiry: {}", e);
        EnquiryError::ValidationError(e)
    })?;

    tracing::Span::current()
        .record("enquirer_email", &tracing::field::display(&enquiry.email))
        .record("service", &tracing::field::display(&enquiry.service));

    let notification = notification_email(&enquiry, &operator);
    let auto_reply = auto_reply_email(&enquiry);

    mailer
        .send(&notification)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send operator notification: {:?}", e);
            e
        })
        .context("Failed to send the operator notification")?;

    mailer
        .send(&auto_reply)
        .await
        .map_err(|e| {
            tracing::error!("Failed to send auto-reply: {:?}", e);
            e
        })
        .with_context(|| format!("Failed to send the auto-reply to {}", enquiry.email))?;

    tracing::info!("Enquiry relayed");

    Ok(HttpResponse::Ok().json(EnquiryAccepted {
        success: true,
        message: "Enquiry submitted successfully".into(),
    }))
}
