use anyhow::Context;
use contact_dispatcher::{app::App, config::get_configuration, telemetry::get_subscriber};
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = get_configuration().context("Failed to read configuration.")?;

    get_subscriber(&config.log_level, std::io::stderr).init();

    let environment = config.application.environment;
    let app = App::with(config).await?;

    tracing::info!(port = app.port()?, %environment, "starting server");
    app.serve()
        .await
        .context("The server should be running")?;

    Ok(())
}
