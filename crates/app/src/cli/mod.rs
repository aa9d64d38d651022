use clap::{Parser, Subcommand};

use boxcart_app::{config::AppConfig, context::AppContext, observability::init_subscriber};

mod cart;
mod ship;

#[derive(Debug, Parser)]
#[command(name = "boxcart", about = "Cart and shipping box CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Cart(cart::CartCommand),
    Ship(ship::ShipCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        init_subscriber(&self.config.logging).map_err(|error| error.to_string())?;

        let ctx = AppContext::open(&self.config)
            .await
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Cart(command) => cart::run(command, &ctx).await,
            Commands::Ship(command) => ship::run(command, &ctx).await,
        }
    }
}
