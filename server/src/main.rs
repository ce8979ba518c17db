use anyhow::Result;
use tracing::info;

use rideboard_server::config::Config;
use rideboard_server::logging::init_logging;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    init_logging(config.log_level.into());

    info!("Starting rideboard server");
    rideboard_server::run(config).await
}
