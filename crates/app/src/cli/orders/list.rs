use clap::Args;
use rusty_money::Money;
use voltcart_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ListArgs {
    /// Only show orders placed by this buyer
    #[arg(long)]
    user: Option<String>,
}

pub(crate) async fn run(context: &AppContext, args: ListArgs) -> Result<(), String> {
    let board = context.order_board(super::user(args.user));

    let orders = board
        .load()
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;

    if orders.is_empty() {
        println!("no orders");
        return Ok(());
    }

    for order in orders {
        let tracking = order
            .tracking()
            .map(|tracking| format!("\t{} {}", tracking.carrier, tracking.number))
            .unwrap_or_default();

        println!(
            "{}\t{}\t{}\t{}{tracking}",
            order.id,
            order.status,
            Money::from_decimal(order.price, context.currency),
            order.product_name,
        );
    }

    Ok(())
}
