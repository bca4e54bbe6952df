use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "reelgrab")]
#[command(author, version, about = "Resolve Instagram reel/post URLs to direct video URLs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Run the HTTP server (default)
    Serve {
        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Override the configured listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the configured listen host
        #[arg(long)]
        host: Option<String>,
    },

    /// Resolve one URL and print the video URL
    Resolve {
        /// Instagram reel/post URL
        url: String,

        /// Path to a TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the numeric media id of a shortcode
    MediaId {
        shortcode: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
