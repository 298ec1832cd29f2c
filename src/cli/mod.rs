use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod serve;
pub mod verify;

#[derive(Subcommand)]
enum Command {
    /// Run the API server (default)
    Serve {
        /// Set the server host address
        #[arg(long, default_value = "0.0.0.0")]
        host: String,

        /// Set the server port, overrides PORT
        #[arg(long)]
        port: Option<String>,
    },
    /// Fetch an access token to check the service account credentials
    Verify {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Handle each sub command
    match args.command {
        Some(Command::Serve { host, port }) => {
            serve::run(host, port).await?;
        }
        Some(Command::Verify {}) => {
            verify::run().await?;
        }
        None => {
            serve::run(String::from("0.0.0.0"), None).await?;
        }
    }

    Ok(())
}
