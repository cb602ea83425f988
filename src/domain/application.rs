/// Mailbox that receives the notification for every enquiry.
#[derive(Debug, Clone)]
pub struct OperatorAddress(pub String);

impl AsRef<str> for OperatorAddress {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
