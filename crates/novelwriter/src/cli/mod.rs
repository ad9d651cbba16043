//! Command-line interface for the novelwriter binary.

mod commands;
mod genres;
mod idea;
mod outline;

pub use commands::{Cli, Commands, IdeaArgs, OutlineArgs};
pub use genres::list_genres;
pub use idea::run_idea;
pub use outline::run_outline;
