use clap::Args;
use voltcart::orders::OrderId;
use voltcart_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ReorderArgs {
    /// Order to buy again
    id: String,

    /// Buyer who placed the order
    #[arg(long)]
    user: String,
}

pub(crate) async fn run(context: &AppContext, args: ReorderArgs) -> Result<(), String> {
    let board = context.order_board(super::user(Some(args.user)));

    board
        .load()
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;

    let order = board
        .get(&OrderId::new(args.id.clone()))
        .ok_or_else(|| format!("order {} not found", args.id))?;

    let mut store = context.cart_store();

    store
        .reorder(&order)
        .map_err(|error| format!("failed to add order to cart: {error}"))?;

    println!("added {} to cart ({} items)", order.product_name, store.cart().item_count());

    Ok(())
}
