use anyhow::Result;
use clap::Parser;
use forecast_charts::cli::{Cli, Commands, RenderCommandHandler, TableCommandHandler};
use forecast_charts::settings::AppConfig;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { source, output, width, svg_dir } => {
            RenderCommandHandler::new(config)
                .handle_render(source, output, width, svg_dir)
                .await?;
        }
        Commands::Summary { source } => {
            RenderCommandHandler::new(config).handle_summary(source).await?;
        }
        Commands::Table { input, output } => {
            TableCommandHandler::new(config).handle_table(input, output).await?;
        }
    }

    Ok(())
}
