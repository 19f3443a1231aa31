//! OxiHuff CLI - Pure Rust Huffman compression
//!
//! Compresses single files into self-describing `.huff` streams and back.

mod commands;
mod logger;
mod utils;

use clap::{ArgAction, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use commands::{cmd_compress, cmd_decompress, cmd_info, cmd_table, cmd_test};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "oxihuff")]
#[command(author, version, about = "Pure Rust byte-oriented Huffman compression")]
#[command(long_about = "
OxiHuff compresses a file with a Huffman code built from its own byte
frequencies. The tree travels in front of the payload, so a .huff file can
be decompressed without any other input.

Examples:
  oxihuff compress notes.txt
  oxihuff compress notes.txt -o notes.huff
  oxihuff decompress notes.txt.huff
  oxihuff test notes.txt.huff
  oxihuff info notes.txt.huff --json
  oxihuff table notes.txt --tree
  oxihuff completions bash > oxihuff.bash
")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress a file
    #[command(alias = "c")]
    Compress {
        /// File to compress
        input: PathBuf,

        /// Output file (default: <input>.huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,

        /// Output statistics as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Decompress a .huff file
    #[command(alias = "x")]
    Decompress {
        /// File to decompress
        input: PathBuf,

        /// Output file (default: <input> without .huff)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Overwrite the output file if it exists
        #[arg(short, long)]
        force: bool,
    },

    /// Test integrity of a .huff file
    #[command(alias = "t")]
    Test {
        /// Files to test
        #[arg(required = true)]
        inputs: Vec<PathBuf>,
    },

    /// Show the header of a .huff file
    #[command(alias = "i")]
    Info {
        /// File to inspect
        input: PathBuf,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Show the code table an uncompressed file would get
    Table {
        /// File to analyze
        input: PathBuf,

        /// Also print the tree
        #[arg(long)]
        tree: bool,

        /// Output as JSON (machine-readable)
        #[arg(short, long)]
        json: bool,
    },

    /// Generate shell completions
    Completions {
        /// Target shell
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    let result = match cli.command {
        Commands::Compress {
            input,
            output,
            force,
            json,
        } => cmd_compress(&input, output, force, json),
        Commands::Decompress {
            input,
            output,
            force,
        } => cmd_decompress(&input, output, force),
        Commands::Test { inputs } => cmd_test(&inputs),
        Commands::Info { input, json } => cmd_info(&input, json),
        Commands::Table { input, tree, json } => cmd_table(&input, tree, json),
        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "oxihuff",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
