pub mod enquiry;
pub mod health;
