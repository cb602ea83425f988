pub mod application;
pub mod enquiry;
