use portal::{app, config::Config};
use tracing_subscriber::{fmt, EnvFilter};

/// Main entry point for the CME certificate portal.
///
/// Initializes logging from the environment, loads the runtime
/// configuration, and runs the web server until shutdown.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = Config::load();

    app::run(config).await
}
