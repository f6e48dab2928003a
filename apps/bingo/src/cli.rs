//! Command-line interface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Party bingo: host a game or join one on the local network
#[derive(Parser, Debug)]
#[command(name = "bingo")]
#[command(version)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Host a game and play your own card
    Host(HostArgs),

    /// Join a game hosted elsewhere
    Join {
        /// Host name or IP address
        host: String,

        /// Port the host listens on (defaults to the configured port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// List the configured templates
    Templates,
}

#[derive(Args, Debug)]
pub struct HostArgs {
    /// Game title (defaults to the template name when using --template)
    #[arg(short, long)]
    pub title: Option<String>,

    /// File with one item per line
    #[arg(short, long, conflicts_with = "template", required_unless_present = "template")]
    pub items: Option<PathBuf>,

    /// Use a configured template as the item list
    #[arg(long)]
    pub template: Option<String>,

    /// Port to listen on (defaults to the configured port)
    #[arg(short, long)]
    pub port: Option<u16>,
}
