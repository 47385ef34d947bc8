mod cli;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{CatalogCommands, Cli, Commands};

use ussd_sim::{Engine, UssdService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ussd_sim=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    let cli = Cli::parse();
    let catalog = cli::load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Commands::Dial { history } => {
            let service = UssdService::new(Engine::new(catalog), cli.service_config());
            cli::dial(&service, history).await?;
        }
        Commands::Run {
            ref tokens,
            no_start,
            ref format,
        } => {
            let service = UssdService::new(Engine::new(catalog), cli.service_config());
            cli::run_script(&service, tokens, no_start, format).await?;
        }
        Commands::Catalog { ref command } => match command {
            CatalogCommands::List => {
                cli::list_keys(&catalog);
            }
            CatalogCommands::Show { key, format } => {
                cli::show_screen(&catalog, key, format)?;
            }
            CatalogCommands::Validate => {
                if cli::validate_catalog(&catalog) {
                    std::process::exit(1);
                }
            }
            CatalogCommands::Export => {
                cli::export_catalog(&catalog)?;
            }
        },
    }

    Ok(())
}
