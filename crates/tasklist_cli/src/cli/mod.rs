use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "tasklist", version, about = "A small local task list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Color theme for list output (overrides the config file)
    #[arg(long, global = true, value_name = "NAME")]
    pub theme: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add a new task
    ///
    /// Example: tasklist add "Buy milk" --deadline "2026-09-01 09:00"
    Add {
        text: Option<String>,
        /// Deadline: RFC3339, "YYYY-MM-DD HH:MM[:SS]", or "YYYY-MM-DD"
        #[arg(long, value_name = "DATETIME")]
        deadline: Option<String>,
    },
    /// Flip a task between open and completed
    ///
    /// Example: tasklist toggle 0b54b49e-...
    Toggle {
        id: String,
    },
    /// Delete a task
    ///
    /// Example: tasklist delete 0b54b49e-...
    Delete {
        id: String,
    },
    /// List all tasks, newest first
    ///
    /// Example: tasklist list
    List,
}
