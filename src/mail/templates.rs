//! HTML bodies for the two emails sent per enquiry.
//!
//! Every submitted value is escaped before it is embedded.

use htmlescape::encode_minimal;

use crate::domain::enquiry::Enquiry;

pub const NOT_PROVIDED: &str = "Not provided";

const HEADER: &str = r#"<div style="background-color: #ffffff; padding: 20px; text-align: center; border-bottom: 1px solid #eee;">
    <span style="font-family: 'Inter', sans-serif; font-weight: 700; font-size: 40px; letter-spacing: -0.05em;"><span style="color: #000000;">cod&#8801;</span><span style="color: #2563eb;">bar</span></span>
</div>"#;

const CONTAINER_STYLE: &str = "font-family: Arial, sans-serif; color: #333; max-width: 600px; margin: 0 auto; border: 1px solid #eee; border-radius: 8px; overflow: hidden;";

const FOOTER_STYLE: &str =
    "background-color: #f1f1f1; padding: 15px; text-align: center; font-size: 12px; color: #666;";

fn optional(value: &Option<String>) -> String {
    match value {
        Some(v) => encode_minimal(v),
        None => NOT_PROVIDED.to_string(),
    }
}

/// Internal notification listing every field of the enquiry.
pub fn notification_html(enquiry: &Enquiry) -> String {
    let message = encode_minimal(&enquiry.message).replace('\n', "<br>");
    format!(
        r#"<div style="{container}">
{header}
<div style="padding: 30px;">
    <p><strong>Name:</strong> {name}</p>
    <p><strong>Email:</strong> {email}</p>
    <p><strong>Phone:</strong> {phone}</p>
    <p><strong>Company:</strong> {company}</p>
    <p><strong>Service:</strong> {service}</p>
    <p><strong>Industry:</strong> {industry}</p>
    <p><strong>Budget:</strong> {budget}</p>
    <div style="margin-top: 20px; background-color: #f9f9f9; padding: 15px; border-left: 4px solid #bf5af2;">
        <strong>Message:</strong><br><br>
        {message}
    </div>
</div>
<div style="{footer}">
    This email was sent from the Codebar website enquiry form.
</div>
</div>"#,
        container = CONTAINER_STYLE,
        header = HEADER,
        footer = FOOTER_STYLE,
        name = encode_minimal(&enquiry.name),
        email = encode_minimal(&enquiry.email),
        phone = optional(&enquiry.phone),
        company = optional(&enquiry.company),
        service = encode_minimal(&enquiry.service),
        industry = optional(&enquiry.industry),
        budget = optional(&enquiry.budget),
        message = message,
    )
}

/// Acknowledgement sent back to the person who filled in the form.
pub fn auto_reply_html(enquiry: &Enquiry) -> String {
    format!(
        r#"<div style="{container}">
{header}
<div style="padding: 30px;">
    <h3 style="margin-top: 0;">Hi {name},</h3>
    <p>Thank you for reaching out to Codebar! We have received your enquiry regarding <strong>{service}</strong>.</p>
    <p>Our team is reviewing your project details and will get back to you within 24 hours with a tailored response or to schedule a consultation.</p>
    <p>In the meantime, feel free to explore <a href="https://codebar.in/#story" style="color: #2997ff;">Our Story</a> or read about <a href="https://codebar.in/#why-us" style="color: #2997ff;">Why Codebar</a>.</p>
    <br>
    <p>Best regards,<br><strong>Team Codebar</strong></p>
</div>
<div style="{footer}">
    Codebar Creative Technology Studio, Chennai<br>
    <a href="https://codebar.in" style="color: #666; text-decoration: none;">codebar.in</a> | <a href="mailto:support@codebar.in" style="color: #2997ff; text-decoration: none;">support@codebar.in</a><br>
    <a href="tel:+919940195863" style="color: #666; text-decoration: none;">+91 - 9940195863</a>
</div>
</div>"#,
        container = CONTAINER_STYLE,
        header = HEADER,
        footer = FOOTER_STYLE,
        name = encode_minimal(&enquiry.name),
        service = encode_minimal(&enquiry.service),
    )
}

#[cfg(test)]
mod tests {
    use crate::domain::enquiry::Enquiry;

    use super::{auto_reply_html, notification_html, NOT_PROVIDED};

    fn enquiry() -> Enquiry {
        Enquiry {
            name: "Jane Doe".into(),
            email: "jane@x.com".into(),
            phone: None,
            company: Some("Acme Corp".into()),
            service: "Web Development".into(),
            industry: None,
            budget: None,
            message: "Need a site".into(),
        }
    }

    #[test]
    fn omitted_optional_fields_render_the_placeholder() {
        let html = notification_html(&enquiry());

        assert!(html.contains(&format!("<strong>Phone:</strong> {}", NOT_PROVIDED)));
        assert!(html.contains(&format!("<strong>Industry:</strong> {}", NOT_PROVIDED)));
        assert!(html.contains(&format!("<strong>Budget:</strong> {}", NOT_PROVIDED)));
        assert!(html.contains("<strong>Company:</strong> Acme Corp"));
    }

    #[test]
    fn notification_embeds_every_required_field() {
        let html = notification_html(&enquiry());

        assert!(html.contains("<strong>Name:</strong> Jane Doe"));
        assert!(html.contains("<strong>Email:</strong> jane@x.com"));
        assert!(html.contains("<strong>Service:</strong> Web Development"));
        assert!(html.contains("Need a site"));
    }

    #[test]
    fn message_line_breaks_become_br_tags() {
        let enquiry = Enquiry {
            message: "first line\nsecond line".into(),
            ..enquiry()
        };
        assert!(notification_html(&enquiry).contains("first line<br>second line"));
    }

    #[test]
    fn submitted_markup_is_escaped() {
        let enquiry = Enquiry {
            name: "<script>alert(1)</script>".into(),
            ..enquiry()
        };

        let notification = notification_html(&enquiry);
        let reply = auto_reply_html(&enquiry);

        assert!(!notification.contains("<script>"));
        assert!(!reply.contains("<script>"));
        assert!(reply.contains("&lt;script&gt;"));
    }

    #[test]
    fn auto_reply_greets_by_name_and_names_the_service() {
        let html = auto_reply_html(&enquiry());

        assert!(html.contains("Hi Jane Doe,"));
        assert!(html.contains("<strong>Web Development</strong>"));
    }
}
