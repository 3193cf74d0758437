//! CLI argument definitions for songconv.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "songconv")]
#[command(about = "Convert dance map folders into Best JSON records", version)]
pub struct Args {
    /// Log debug output (ignored when RUST_LOG is set)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Report which map layout a folder contains
    Detect {
        /// Map folder
        input: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert one or more map folders
    Convert {
        /// Map folders
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
        /// Output folder; each map gets a lower-case sub-folder
        #[arg(short, long)]
        output: PathBuf,
        /// TOML file with conversion settings
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Fixed seed for clip ids and clip order
        #[arg(long, env = "SONGCONV_SEED")]
        seed: Option<u64>,
        /// Sample rate override, in Hz
        #[arg(long, value_name = "HZ")]
        sample_rate: Option<u32>,
        /// Write indented JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Dump a script file as JSON
    Parse {
        /// `.tpl`, `.trk`, `.dtape`, `.ktape` or `.tape` file
        file: PathBuf,
        /// Write indented JSON
        #[arg(long)]
        pretty: bool,
    },
    /// Print marker count and average BPM of a track file
    Bpm {
        /// `.trk` file
        track: PathBuf,
        /// Sample rate override, in Hz
        #[arg(long, value_name = "HZ")]
        sample_rate: Option<u32>,
    },
}
