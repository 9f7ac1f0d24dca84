use clap::Parser;
use colored::Colorize;

use privalytics::cli::{Cli, Commands};
use privalytics::config::AppConfig;
use privalytics::errors::PrivalyticsError;
use privalytics::runtime::modes::{run_config_command, run_server};
use privalytics::system::init_logging;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { action }) => run_config_command(action),
        Some(Commands::Serve) | None => {
            let config = match AppConfig::load(cli.config.as_deref()) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("{} {}", "[ERROR]".red().bold(), e);
                    std::process::exit(1);
                }
            };

            let guard = init_logging(&config.logging)?;
            if let Err(e) = run_server(config).await {
                tracing::error!("Fatal: {:#}", e);
                match e.downcast_ref::<PrivalyticsError>() {
                    Some(err) => eprintln!("{}", err.format_colored()),
                    None => eprintln!("{} {:#}", "[ERROR]".red().bold(), e),
                }
                drop(guard);
                std::process::exit(1);
            }
            drop(guard);
            Ok(())
        }
    }
}
