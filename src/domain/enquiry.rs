//! src/domain/enquiry.rs

use std::fmt::{Display, Formatter};

/// Contact form submission exactly as it arrives over the wire.
#[derive(serde::Deserialize, serde::Serialize, Debug, Clone, Default)]
pub struct EnquiryForm {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: Option<String>,
    pub industry: Option<String>,
    pub budget: Option<String>,
    pub message: Option<String>,
}

/// An enquiry whose required fields are all present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Enquiry {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub service: String,
    pub industry: Option<String>,
    pub budget: Option<String>,
    pub message: String,
}

/// Names of the required fields that were absent or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingFields(pub Vec<&'static str>);

impl Display for MissingFields {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing required fields: {}", self.0.join(", "))
    }
}

impl std::error::Error for MissingFields {}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl TryFrom<EnquiryForm> for Enquiry {
    type Error = MissingFields;

    fn try_from(form: EnquiryForm) -> Result<Self, Self::Error> {
        let name = present(form.name);
        let email = present(form.email);
        let service = present(form.service);
        let message = present(form.message);

        let missing: Vec<&'static str> = [
            ("name", name.is_none()),
            ("email", email.is_none()),
            ("service", service.is_none()),
            ("message", message.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then(|| field))
        .collect();

        match (name, email, service, message) {
            (Some(name), Some(email), Some(service), Some(message)) => Ok(Self {
                name,
                email,
                phone: present(form.phone),
                company: present(form.company),
                service,
                industry: present(form.industry),
                budget: present(form.budget),
                message,
            }),
            _ => Err(MissingFields(missing)),
        }
    }
}
