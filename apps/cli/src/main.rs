use clap::Parser;
use poolkb_cli::application::commands::{Cli, run};
use poolkb_cli::infra::{
    config::CliConfig,
    setup::{init_app, init_tracing},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let config = CliConfig::from_env();
    init_tracing(config.log_json);

    let app = init_app(config, cli.lang)?;
    tracing::debug!(language = %app.language, "starting");

    run(&app, cli.command).await
}
