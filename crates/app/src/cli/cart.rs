use std::io;

use clap::{Args, Subcommand};

use boxcart::summary::write_cart;
use boxcart_app::{context::AppContext, domain::carts::SyncOutcome};

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Show the cart
    Show,

    /// Add a catalog product to the cart
    Add(AddArgs),

    /// Change the quantity of a product already in the cart
    Set(SetArgs),

    /// Copy lines only on this device to the account cart
    Sync,
}

#[derive(Debug, Args)]
struct AddArgs {
    /// Catalog product code
    #[arg(long)]
    code: String,

    /// How many to add
    #[arg(long, default_value_t = 1)]
    quantity: u32,
}

#[derive(Debug, Args)]
struct SetArgs {
    /// Catalog product code
    #[arg(long)]
    code: String,

    /// New quantity; zero or less removes the line
    #[arg(long, allow_negative_numbers = true)]
    quantity: i64,
}

pub(crate) async fn run(command: CartCommand, ctx: &AppContext) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => show(ctx).await,
        CartSubcommand::Add(args) => add(args, ctx).await,
        CartSubcommand::Set(args) => set(args, ctx).await,
        CartSubcommand::Sync => sync(ctx).await,
    }
}

async fn show(ctx: &AppContext) -> Result<(), String> {
    let view = ctx
        .reconciler
        .merged_view()
        .await
        .map_err(|error| format!("failed to read cart: {error}"))?;

    write_cart(io::stdout().lock(), &view, ctx.currency)
        .map_err(|error| format!("failed to print cart: {error}"))
}

async fn add(args: AddArgs, ctx: &AppContext) -> Result<(), String> {
    let item = ctx
        .catalog
        .line_item(&args.code, args.quantity)
        .map_err(|error| error.to_string())?;

    let outcome = ctx
        .reconciler
        .add_item(&item, args.quantity)
        .await
        .map_err(|error| format!("failed to add {}: {error}", args.code))?;

    println!("{}", describe(outcome));

    write_cart(io::stdout().lock(), &ctx.reconciler.current_view(), ctx.currency)
        .map_err(|error| format!("failed to print cart: {error}"))
}

async fn set(args: SetArgs, ctx: &AppContext) -> Result<(), String> {
    let view = ctx
        .reconciler
        .merged_view()
        .await
        .map_err(|error| format!("failed to read cart: {error}"))?;

    let line = view
        .find_code(&args.code)
        .ok_or_else(|| format!("{} is not in the cart", args.code))?;

    let outcome = ctx
        .reconciler
        .set_quantity(&line.item, args.quantity)
        .await
        .map_err(|error| format!("failed to update {}: {error}", args.code))?;

    println!("{}", describe(outcome));

    write_cart(io::stdout().lock(), &ctx.reconciler.current_view(), ctx.currency)
        .map_err(|error| format!("failed to print cart: {error}"))
}

async fn sync(ctx: &AppContext) -> Result<(), String> {
    if !ctx.reconciler.session().is_authenticated() {
        println!("not signed in; set BOXCART_USER to sync");
        return Ok(());
    }

    let pushed = ctx
        .reconciler
        .push_local_only()
        .await
        .map_err(|error| format!("failed to read cart: {error}"))?;

    println!("copied {pushed} line(s) to the account cart");

    show(ctx).await
}

fn describe(outcome: SyncOutcome) -> &'static str {
    match outcome {
        SyncOutcome::LocalOnly => "saved on this device",
        SyncOutcome::Applied => "saved to your account",
        SyncOutcome::Superseded => "skipped; a newer change is pending",
        SyncOutcome::Failed => "saved on this device; account cart not updated",
    }
}
