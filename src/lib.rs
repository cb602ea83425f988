pub mod config;
pub mod domain;
pub mod form_client;
pub mod mail;
pub mod routes;
pub mod run;
pub mod startup;
pub mod telemetry;
pub mod utils;
