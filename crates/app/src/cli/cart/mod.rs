use clap::{Args, Subcommand};
use rusty_money::Money;
use voltcart::pricing::calculate_totals;
use voltcart_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct CartCommand {
    #[command(subcommand)]
    command: CartSubcommand,
}

#[derive(Debug, Subcommand)]
enum CartSubcommand {
    /// Print the stored cart and its summary totals
    Show,

    /// Empty the stored cart
    Clear,
}

pub(crate) fn run(context: &AppContext, command: CartCommand) -> Result<(), String> {
    match command.command {
        CartSubcommand::Show => show(context),
        CartSubcommand::Clear => context
            .cart_store()
            .clear()
            .map_err(|error| format!("failed to clear cart: {error}")),
    }
}

fn show(context: &AppContext) -> Result<(), String> {
    let store = context.cart_store();
    let cart = store.cart();

    if cart.is_empty() {
        println!("cart is empty");
        return Ok(());
    }

    let money = |minor: u64| {
        Money::from_minor(i64::try_from(minor).unwrap_or(i64::MAX), context.currency)
    };

    for item in cart.items() {
        let line = item.line_total().unwrap_or(u64::MAX);

        println!(
            "{}\t{} x {}\t{}{}",
            item.id,
            item.quantity,
            money(*item.unit_price),
            money(line),
            if item.exceeds_stock() { "\t(exceeds stock)" } else { "" }
        );
    }

    let totals = calculate_totals(
        cart,
        context.currency,
        None,
        None,
        &context.checkout.pricing,
    )
    .map_err(|error| format!("failed to price cart: {error}"))?;

    println!("items: {}", cart.item_count());
    println!("subtotal: {}", totals.subtotal);
    println!("shipping: {}", totals.shipping);
    println!("tax: {}", totals.tax);
    println!("total: {}", totals.total);

    Ok(())
}
