use clap::Parser;

use expense_rs::cli::{self, Cli};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    cli::init_logger_from_settings(&settings)?;

    if let Err(e) = cli::execute_command(&cli, settings).await {
        tracing::error!(error = ?e, "Command failed");
        return Err(e);
    }

    Ok(())
}
