use std::net::TcpListener;
use std::sync::Arc;

use actix_web::dev::Server;

use crate::config::Configuration;
use crate::mail::{Mailer, SmtpMailer};
use crate::run::run;

pub struct AppServer {
    port: u16,
    address: String,
    server: Server,
}

impl AppServer {
    /// Builds the relay around a real SMTP transport.
    ///
    /// The transport is verified once; a failed check is logged, not fatal.
    pub async fn build(configuration: Configuration) -> Result<Self, anyhow::Error> {
        let mailer = SmtpMailer::new(&configuration.smtp)?;

        match mailer.verify().await {
            Ok(_) => tracing::info!("SMTP server is ready to take our messages"),
            Err(e) => tracing::error!(error.cause_chain = ?e, "SMTP connection check failed"),
        }

        Ok(Self::build_with_mailer(configuration, Arc::new(mailer))?)
    }

    /// Builds the relay around any transport, used by tests to observe outgoing mail.
    pub fn build_with_mailer(
        configuration: Configuration,
        mailer: Arc<dyn Mailer>,
    ) -> Result<Self, std::io::Error> {
        let listener = TcpListener::bind(format!(
            "{}:{}",
            configuration.app.host, configuration.app.port
        ))?;

        let local_addr = listener.local_addr()?;
        tracing::info!("Starting service on address: {}", local_addr);

        let address = configuration.app.host.clone();
        let port = local_addr.port();
        let server = run(listener, mailer, configuration.smtp.operator())?;

        Ok(Self {
            port,
            address,
            server,
        })
    }

    pub fn to_server_address(&self) -> String {
        format!("{}:{}", self.address, self.port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}
