mod cli;
mod ui;

use std::sync::Arc;

use anyhow::Result;
use casegen_app::Pipeline;
use casegen_config::Config;
use casegen_provider::GeminiClient;
use clap::Parser;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::Cli;
use crate::ui::UI;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout only carries command output
    let default_filter = if cli.verbose { "casegen=debug" } else { "casegen=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = Config::from_env()?;
    if let Some(output_dir) = cli.output_dir.clone() {
        config = config.output_dir(output_dir);
    }

    let client = Arc::new(GeminiClient::from_env(&config)?);
    tracing::debug!(model = client.model(), "Generation client ready");

    let mut pipeline = Pipeline::new(config, client).bundle(cli.command.bundle());
    if let Some(context) = cli.context {
        pipeline = pipeline.context_path(context);
    }
    if let Some(count) = cli.count {
        pipeline = pipeline.count(count);
    }
    if let Some(temperature) = cli.temperature {
        pipeline = pipeline.temperature(temperature);
    }

    UI::new(pipeline).run(cli.command).await
}
