use anyhow::Result;
use booking_gateway::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
