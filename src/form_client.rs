//! Client side of the enquiry form.
//!
//! [`FormClient`] mirrors what the website does when a visitor presses the submit button:
//! the button is disabled and relabelled before the request goes out, a single POST is made,
//! and the form either gives way to a success panel or returns to an editable state with a
//! blocking alert. There is no retry; the visitor decides whether to submit again.

use std::collections::HashMap;

use reqwest::{Client, StatusCode};

pub const BUSY_LABEL: &str = "Sending...";

pub const FAILURE_ALERT: &str = "Oops! Something went wrong while sending your request. \
Please try again later or contact us directly via email/phone.";

pub const SUCCESS_HEADING: &str = "Request Submitted!";

pub const SUCCESS_MESSAGE: &str = "Thank you for your enquiry. We have received your request \
and our team will reach out to you within 24 hours.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitControl {
    pub label: String,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    /// The form is visible and the submit control accepts a gesture.
    Editable(SubmitControl),
    /// A submission is in flight; the control is disabled and shows the busy label.
    Busy(SubmitControl),
    /// The form is hidden and the success panel is shown in its place.
    Submitted,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("failed to reach the enquiry endpoint")]
    Network(#[from] reqwest::Error),

    #[error("server responded with {0}")]
    Rejected(StatusCode),
}

/// A request that has been started but not yet sent.
#[must_use]
pub struct Submission {
    http_client: Client,
    endpoint: String,
    fields: HashMap<String, String>,
}

impl Submission {
    /// Performs the single POST. Only the status code decides the outcome.
    #[tracing::instrument(name = "Posting enquiry form", skip(self), fields(endpoint = %self.endpoint))]
    pub async fn send(self) -> Result<(), ClientError> {
        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&self.fields)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(ClientError::Rejected(status))
        }
    }
}

pub struct FormClient {
    http_client: Client,
    endpoint: String,
    submit_label: String,
    state: FormState,
    alert: Option<&'static str>,
}

impl FormClient {
    pub fn new(base_url: &str, submit_label: impl Into<String>) -> Self {
        let submit_label = submit_label.into();
        Self {
            http_client: Client::new(),
            endpoint: format!("{}/api/enquiry", base_url.trim_end_matches('/')),
            state: FormState::Editable(SubmitControl {
                label: submit_label.clone(),
                disabled: false,
            }),
            submit_label,
            alert: None,
        }
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Heading and text of the panel shown in place of a submitted form.
    pub fn success_panel(&self) -> Option<(&'static str, &'static str)> {
        match self.state {
            FormState::Submitted => Some((SUCCESS_HEADING, SUCCESS_MESSAGE)),
            _ => None,
        }
    }

    /// Takes the pending alert, if any. Showing it is up to the caller.
    pub fn take_alert(&mut self) -> Option<&'static str> {
        self.alert.take()
    }

    /// Switches to the busy state and hands back the request to send.
    ///
    /// Returns `None` unless the form is editable: a disabled control cannot be pressed twice.
    pub fn begin(&mut self, fields: HashMap<String, String>) -> Option<Submission> {
        if !matches!(self.state, FormState::Editable(_)) {
            return None;
        }

        self.alert = None;
        self.state = FormState::Busy(SubmitControl {
            label: BUSY_LABEL.to_string(),
            disabled: true,
        });

        Some(Submission {
            http_client: self.http_client.clone(),
            endpoint: self.endpoint.clone(),
            fields,
        })
    }

    /// Applies the outcome of a [`Submission`].
    pub fn complete(&mut self, outcome: Result<(), ClientError>) {
        match outcome {
            Ok(()) => {
                tracing::info!("Enquiry submitted");
                self.state = FormState::Submitted;
            }
            Err(e) => {
                tracing::warn!(error.message = %e, "Enquiry submission failed");
                self.restore();
                self.alert = Some(FAILURE_ALERT);
            }
        }
    }

    /// `begin`, `send` and `complete` in one go.
    pub async fn submit(&mut self, fields: HashMap<String, String>) -> &FormState {
        if let Some(submission) = self.begin(fields) {
            let outcome = submission.send().await;
            self.complete(outcome);
        }
        &self.state
    }

    /// The success panel's "Send Another" action.
    pub fn reset(&mut self) {
        self.alert = None;
        self.restore();
    }

    fn restore(&mut self) {
        self.state = FormState::Editable(SubmitControl {
            label: self.submit_label.clone(),
            disabled: false,
        });
    }
}
