use clap::Args;
use voltcart::orders::OrderId;
use voltcart_app::{contact::seller_mailto, context::AppContext};

#[derive(Debug, Args)]
pub(crate) struct ContactArgs {
    /// Order to ask about
    id: String,

    /// Seller's email address
    #[arg(long)]
    seller_email: String,
}

pub(crate) async fn run(context: &AppContext, args: ContactArgs) -> Result<(), String> {
    let board = context.order_board(None);

    board
        .load()
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;

    let order = board
        .get(&OrderId::new(args.id.clone()))
        .ok_or_else(|| format!("order {} not found", args.id))?;

    let url = seller_mailto(&order, &args.seller_email).map_err(|error| error.to_string())?;

    println!("{url}");

    Ok(())
}
