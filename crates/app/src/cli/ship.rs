use std::io;

use clap::{Args, Subcommand};

use boxcart::summary::write_shipping_plan;
use boxcart_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ShipCommand {
    #[command(subcommand)]
    command: ShipSubcommand,
}

#[derive(Debug, Subcommand)]
enum ShipSubcommand {
    /// Choose a shipping box for the cart
    Quote,
}

pub(crate) async fn run(command: ShipCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        ShipSubcommand::Quote => quote(ctx).await,
    }
}

async fn quote(ctx: &AppContext) -> Result<(), String> {
    let view = ctx
        .reconciler
        .merged_view()
        .await
        .map_err(|error| format!("failed to read cart: {error}"))?;

    let quote = ctx
        .shipping
        .quote(&view)
        .await
        .map_err(|error| format!("failed to quote shipping: {error}"))?;

    match quote {
        Some(quote) => write_shipping_plan(io::stdout().lock(), &quote.as_plan())
            .map_err(|error| format!("failed to print quote: {error}")),
        None if view.is_empty() => {
            println!("Cart is empty");
            Ok(())
        }
        None => {
            println!("No active shipping box");
            Ok(())
        }
    }
}
