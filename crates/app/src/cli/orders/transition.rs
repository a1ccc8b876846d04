use clap::{Args, Subcommand};
use jiff::Timestamp;
use rust_decimal::Decimal;
use voltcart::orders::{CancelReason, OrderAction, OrderId};
use voltcart_app::{context::AppContext, notifications::Toast};

#[derive(Debug, Args)]
pub(crate) struct Targets {
    /// Orders to update
    #[arg(required = true, num_args = 1..)]
    ids: Vec<String>,
}

#[derive(Debug, Subcommand)]
pub(crate) enum TransitionSubcommand {
    /// Approve orders awaiting review; payment is confirmed
    Approve(Targets),

    /// Reject orders
    Reject {
        #[command(flatten)]
        targets: Targets,

        /// Reason shown to the buyer
        #[arg(long)]
        reason: String,
    },

    /// Mark orders as shipped
    Ship {
        #[command(flatten)]
        targets: Targets,

        #[arg(long)]
        tracking_number: String,

        #[arg(long)]
        carrier: String,
    },

    /// Mark shipped orders as delivered
    Deliver(Targets),

    /// Refund an order
    Refund {
        /// Order to refund
        id: String,

        /// Amount to refund, no more than the order total
        #[arg(long)]
        amount: Decimal,

        #[arg(long)]
        reason: String,

        /// How the refund is paid out
        #[arg(long)]
        method: String,
    },

    /// Cancel an order on behalf of its buyer
    Cancel {
        /// Order to cancel
        id: String,

        /// Buyer who placed the order
        #[arg(long)]
        user: String,

        /// One of: changed-mind, better-price, ordered-by-mistake, delivery-too-slow,
        /// payment-issue, other
        #[arg(long, value_parser = parse_cancel_reason)]
        reason: CancelReason,

        /// Optional details
        #[arg(long)]
        details: Option<String>,
    },
}

fn parse_cancel_reason(value: &str) -> Result<CancelReason, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unknown cancel reason: {value}"))
}

pub(crate) async fn run(context: &AppContext, command: TransitionSubcommand) -> Result<(), String> {
    let (ids, action, buyer) = match command {
        TransitionSubcommand::Approve(targets) => (targets.ids, OrderAction::Approve, None),
        TransitionSubcommand::Reject { targets, reason } => {
            (targets.ids, OrderAction::Reject { reason }, None)
        }
        TransitionSubcommand::Ship {
            targets,
            tracking_number,
            carrier,
        } => (
            targets.ids,
            OrderAction::Ship {
                tracking_number,
                carrier,
            },
            None,
        ),
        TransitionSubcommand::Deliver(targets) => (
            targets.ids,
            OrderAction::Deliver {
                at: Timestamp::now(),
            },
            None,
        ),
        TransitionSubcommand::Refund {
            id,
            amount,
            reason,
            method,
        } => (
            vec![id],
            OrderAction::Refund {
                reason,
                amount,
                method,
            },
            None,
        ),
        TransitionSubcommand::Cancel {
            id,
            user,
            reason,
            details,
        } => (
            vec![id],
            OrderAction::Cancel { reason, details },
            super::user(Some(user)),
        ),
    };

    let board = context.order_board(buyer);

    board
        .load()
        .await
        .map_err(|error| format!("failed to load orders: {error}"))?;

    let ids: Vec<OrderId> = ids.into_iter().map(OrderId::new).collect();

    let toast = if let [id] = ids.as_slice() {
        let outcome = board
            .apply_action(id, &action)
            .await
            .map_err(|error| error.to_string())?;

        Toast::from(&outcome)
    } else {
        let outcome = board
            .bulk_update(&ids, &action)
            .await
            .map_err(|error| error.to_string())?;

        for (id, reason) in &outcome.failed {
            eprintln!("{id}: {reason}");
        }

        Toast::from(&outcome)
    };

    if toast.is_error() {
        return Err(toast.message);
    }

    println!("{toast}");

    Ok(())
}
