//! CLI command definitions.

use clap::{Args, Parser, Subcommand};
use novelwriter::{LogLevel, LogOptions};
use std::path::PathBuf;

/// novelwriter - story ideas generated, critiqued and selected by a language model
#[derive(Parser, Debug)]
#[command(name = "novelwriter")]
#[command(about = "Generate, critique and select story ideas", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Log verbosity; SUPERDEBUG also records prompts and raw replies
    #[arg(long, value_enum, ignore_case = true, default_value_t = LogLevel::Info, global = true)]
    pub log_level: LogLevel,

    /// Append detailed logs to this file
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    /// Show detailed logs on the console; progress lines are always shown
    #[arg(long, global = true)]
    pub console_log: bool,
}

impl Cli {
    /// Logging choices made on the command line.
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.log_level,
            file: self.log_file.clone(),
            console: self.console_log,
        }
    }
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the idea workflow and write the winning pitch to a document
    Idea(IdeaArgs),

    /// Expand an idea document into a chapter-by-chapter outline
    Outline(OutlineArgs),

    /// List the genre catalog
    Genres {
        /// Configuration file layered over the defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Options for a single idea run
#[derive(Args, Debug)]
pub struct IdeaArgs {
    /// Genre or subgenre to write in; random when omitted
    #[arg(long)]
    pub genre: Option<String>,

    /// Tone of the story
    #[arg(long)]
    pub tone: Option<String>,

    /// Comma-separated themes
    #[arg(long)]
    pub themes: Option<String>,

    /// Directory for the idea document
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Options for outlining an existing idea
#[derive(Args, Debug)]
pub struct OutlineArgs {
    /// Idea document written by the `idea` command
    #[arg(long)]
    pub idea_path: PathBuf,

    /// Outline file; defaults to `outlines/<title>/<title>-outline_<timestamp>.md`
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Configuration file layered over the defaults
    #[arg(long)]
    pub config: Option<PathBuf>,
}
