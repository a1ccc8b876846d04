use clap::{Parser, Subcommand};
use voltcart_app::{config::AppConfig, context::AppContext, observability};

mod cart;
mod orders;

#[derive(Debug, Parser)]
#[command(name = "voltcart", about = "Voltcart storefront CLI", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    config: AppConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Orders(orders::OrdersCommand),
    Cart(cart::CartCommand),
}

impl Cli {
    pub(crate) async fn run(self) -> Result<(), String> {
        observability::init_logging(&self.config.logging)
            .map_err(|error| format!("failed to initialise logging: {error}"))?;

        let context = AppContext::from_config(&self.config)
            .map_err(|error| format!("failed to start: {error}"))?;

        match self.command {
            Commands::Orders(command) => orders::run(&context, command).await,
            Commands::Cart(command) => cart::run(&context, command),
        }
    }
}
