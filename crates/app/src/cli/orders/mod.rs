use clap::{Args, Subcommand};
use voltcart::users::UserId;
use voltcart_app::context::AppContext;

mod contact;
mod list;
mod reorder;
mod transition;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// List orders, for one buyer or every order
    List(list::ListArgs),

    #[command(flatten)]
    Transition(transition::TransitionSubcommand),

    /// Print a mailto link for contacting an order's seller
    Contact(contact::ContactArgs),

    /// Put a past order's product back in the cart
    Reorder(reorder::ReorderArgs),
}

pub(crate) async fn run(context: &AppContext, command: OrdersCommand) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::List(args) => list::run(context, args).await,
        OrdersSubcommand::Transition(command) => transition::run(context, command).await,
        OrdersSubcommand::Contact(args) => contact::run(context, args).await,
        OrdersSubcommand::Reorder(args) => reorder::run(context, args).await,
    }
}

fn user(id: Option<String>) -> Option<UserId> {
    id.filter(|id| !id.trim().is_empty()).map(UserId::new)
}
