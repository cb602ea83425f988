use enquiry_relay::config::get_configuration;
use enquiry_relay::startup::AppServer;
use enquiry_relay::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    init_subscriber(get_subscriber(
        "enquiry-relay".into(),
        "info".into(),
        std::io::stdout,
    ));

    let configuration = get_configuration().expect("Should have loaded configuration");
    let server = AppServer::build(configuration).await?;

    server.run_until_stopped().await?;

    Ok(())
}
