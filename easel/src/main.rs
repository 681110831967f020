#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;
mod commands;
mod output;

use args::{Args, Command};
use clap::Parser;
use easel_config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging();

    // Load configuration
    let config = Config::load(&args.config)?;

    tracing::debug!(
        config_path = %args.config.display(),
        platform = %config.platform.base_url,
        "configuration loaded"
    );

    match args.command {
        Command::Show(show) => commands::show(&config, &show).await,
        Command::Attach(attach) => commands::attach(&config, &attach).await,
        Command::Detach(detach) => commands::detach(&config, &detach).await,
        Command::Catalog(catalog) => commands::catalog(&config, &catalog).await,
        Command::Inspect(inspect) => commands::inspect(&config, &inspect).await,
    }
}

/// Logs go to stderr so stdout stays parseable under `--json`.
fn init_logging() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}
