use std::path::Path;

use anyhow::{Context, Result};
use dotenvy::dotenv;

use reelcore::core::{init_logger, log_session_configuration};
use reelcore::instagram::media_id_from_shortcode;
use reelcore::{Config, ReelResolver};
use reelweb::cli::{Cli, Commands};
use reelweb::start_server;

/// Main entry point for the reelgrab server
///
/// Parses CLI arguments and dispatches to the subcommand (`serve` by default).
///
/// # Errors
/// Returns an error if configuration, logging or server startup fails.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    // .env must be applied before config extraction reads the environment
    let _ = dotenv();

    let command = cli.command.unwrap_or(Commands::Serve {
        config: None,
        port: None,
        host: None,
    });

    match command {
        Commands::Serve { config, port, host } => {
            let mut config = load_config(config.as_deref())?;
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(host) = host {
                config.server.host = host;
            }
            log_session_configuration(&config);

            let resolver = ReelResolver::from_config(&config).context("Failed to build HTTP client")?;
            start_server(&config, resolver).await
        }
        Commands::Resolve { url, config } => {
            let config = load_config(config.as_deref())?;
            log_session_configuration(&config);

            let resolver = ReelResolver::from_config(&config).context("Failed to build HTTP client")?;
            let resolution = resolver.resolve(&url).await?;
            tracing::info!(strategy = resolution.strategy, shortcode = %resolution.shortcode, "Resolved");
            println!("{}", resolution.video_url);
            Ok(())
        }
        Commands::MediaId { shortcode } => {
            let id = media_id_from_shortcode(&shortcode)?;
            println!("{}", id);
            Ok(())
        }
    }
}

/// Load config and install the logger with its filter.
fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = Config::load(path).context("Failed to load configuration")?;
    init_logger(&config.log.filter)?;
    Ok(config)
}
