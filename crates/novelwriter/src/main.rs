//! novelwriter CLI binary.
//!
//! - Generate a story idea document
//! - Outline an idea chapter by chapter
//! - List the genre catalog

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, list_genres, run_idea, run_outline};

    // Pick up credentials from a local .env file, if any
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    novelwriter::init_logging(&cli.log_options())?;

    match cli.command {
        Commands::Idea(args) => {
            let path = run_idea(args).await?;
            println!("{}", path);
        }
        Commands::Outline(args) => {
            let path = run_outline(args).await?;
            println!("{}", path.display());
        }
        Commands::Genres { config } => {
            list_genres(config.as_deref())?;
        }
    }

    Ok(())
}
