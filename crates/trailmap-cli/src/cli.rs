use crate::theme::Theme;
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "trailmap", version, about = "Validate and walk ASCII trail maps")]
pub struct Cli {
    /// More log output (-v info, -vv debug, -vvv trace). TRAILMAP_LOG overrides.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Walk a map and print the collected letters and path
    Solve {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
        #[arg(long, help = "Abandon the walk after this many moves")]
        max_steps: Option<usize>,
    },
    /// Check a map for structural defects
    Validate {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// List the built-in sample maps
    Samples {
        #[arg(long, help = "List the invalid samples instead")]
        invalid: bool,
        #[arg(long, help = "Output machine-readable JSON")]
        json: bool,
    },
    /// Print a map with the walked trail highlighted
    Show {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
        theme: ThemeName,
        #[arg(long)]
        max_steps: Option<usize>,
    },
    /// Step through the walk interactively
    Play {
        #[command(flatten)]
        map: MapArgs,
        #[arg(long, value_enum, default_value_t = ThemeName::Dark)]
        theme: ThemeName,
        #[arg(long, default_value_t = 150, help = "Milliseconds between steps")]
        delay_ms: u64,
        #[arg(long)]
        max_steps: Option<usize>,
    },
}

/// Where a map comes from: a file, stdin (`-` or nothing) or the catalogue
#[derive(Args, Debug, Clone)]
pub struct MapArgs {
    /// Map file, `-` for stdin
    #[arg(conflicts_with = "sample")]
    pub file: Option<PathBuf>,
    /// Use a built-in sample by id (see `trailmap samples`)
    #[arg(long)]
    pub sample: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeName {
    Dark,
    Light,
    Plain,
}

impl ThemeName {
    /// Colours to use, `None` for uncoloured output
    pub fn theme(self) -> Option<Theme> {
        match self {
            ThemeName::Dark => Some(Theme::dark()),
            ThemeName::Light => Some(Theme::light()),
            ThemeName::Plain => None,
        }
    }
}
