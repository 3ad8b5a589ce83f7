use rsvp::config::Config;
use rsvp::error::StartupError;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[rocket::main]
async fn main() -> Result<(), StartupError> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load()?;
    info!("Starting server...");
    let _rocket = rsvp::build(config)?.launch().await?;

    info!("Server shut down");
    Ok(())
}
