use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use secrecy::Secret;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

use enquiry_relay::config::{AppConfig, Configuration, SmtpSettings};
use enquiry_relay::mail::{MailError, Mailer, OutgoingEmail};
use enquiry_relay::startup::AppServer;
use enquiry_relay::telemetry::{get_subscriber, init_subscriber};

pub const OPERATOR: &str = "hello@codebar.test";

static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber(
            "test".into(),
            "debug".into(),
            std::io::stdout,
        ));
    } else {
        init_subscriber(get_subscriber("test".into(), "debug".into(), std::io::sink));
    }
});

/// Keeps every email handed to it, failing on the given attempt if asked to.
#[derive(Default)]
pub struct RecordingMailer {
    attempts: Mutex<Vec<OutgoingEmail>>,
    fail_on_attempt: Option<usize>,
}

impl RecordingMailer {
    pub fn failing_on_attempt(attempt: usize) -> Self {
        Self {
            fail_on_attempt: Some(attempt),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let mut attempts = self.attempts.lock().unwrap();
        attempts.push(email.clone());
        if Some(attempts.len()) == self.fail_on_attempt {
            return Err(MailError::InvalidAddress(email.to.clone()));
        }
        Ok(())
    }
}

pub struct TestApp {
    pub addr: String,
    pub port: u16,
    pub mailer: Arc<RecordingMailer>,
    pub api_client: reqwest::Client,
}

impl TestApp {
    pub async fn post_enquiry(&self, body: &serde_json::Value) -> reqwest::Response {
        self.api_client
            .post(&format!("{}/api/enquiry", &self.addr))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn configuration(smtp: SmtpSettings) -> Configuration {
    Configuration {
        app: AppConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        smtp,
    }
}

pub fn smtp_settings(host: &str, port: u16) -> SmtpSettings {
    SmtpSettings {
        host: host.into(),
        port,
        username: OPERATOR.into(),
        password: Secret::new("wrong-password".into()),
    }
}

/// Starts the relay on a random port and returns its base url and port.
pub fn launch(configuration: Configuration, mailer: Arc<dyn Mailer>) -> (String, u16) {
    Lazy::force(&TRACING);

    let server =
        AppServer::build_with_mailer(configuration, mailer).expect("should have created server");
    let addr = format!("http://{}", server.to_server_address());
    let port = server.port();
    let _ = tokio::spawn(server.run_until_stopped());
    (addr, port)
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(RecordingMailer::default()).await
}

pub async fn spawn_app_with(mailer: RecordingMailer) -> TestApp {
    let mailer = Arc::new(mailer);
    let (addr, port) = launch(
        configuration(smtp_settings("localhost", 2525)),
        mailer.clone(),
    );

    TestApp {
        addr,
        port,
        mailer,
        api_client: reqwest::Client::new(),
    }
}

/// A port nothing listens on.
pub fn closed_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind to random port");
    listener.local_addr().unwrap().port()
}

/// A plaintext SMTP server that refuses every login attempt with `535`.
pub async fn spawn_rejecting_smtp_server() -> u16 {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind to random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let (reader, mut writer) = stream.into_split();
                let mut lines = BufReader::new(reader).lines();

                if writer.write_all(b"220 smtp.codebar.test ESMTP\r\n").await.is_err() {
                    return;
                }
                while let Ok(Some(line)) = lines.next_line().await {
                    let command = line.to_ascii_uppercase();
                    let reply: &[u8] = if command.starts_with("EHLO") {
                        b"250-smtp.codebar.test\r\n250 AUTH PLAIN LOGIN\r\n"
                    } else if command.starts_with("AUTH") {
                        b"535 5.7.8 Authentication credentials invalid\r\n"
                    } else if command.starts_with("QUIT") {
                        let _ = writer.write_all(b"221 Bye\r\n").await;
                        return;
                    } else {
                        b"502 5.5.2 Command not recognized\r\n"
                    };
                    if writer.write_all(reply).await.is_err() {
                        return;
                    }
                }
            });
        }
    });

    port
}
