use clap::{Parser, Subcommand};

/// asmident - parse and normalize .NET assembly display names
#[derive(Debug, Parser)]
#[command(name = "asmident", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Options controlling how each input is parsed.
#[derive(Debug, Parser)]
pub struct ParseArgs {
    /// Treat each input as a generic type argument: `]` ends the name.
    #[arg(long)]
    pub generic_argument: bool,

    /// Byte offset at which parsing starts in every input.
    #[arg(long, default_value_t = 0, value_name = "OFFSET")]
    pub start: usize,

    /// Reject names with unrecognized components instead of skipping them.
    #[arg(long)]
    pub reject_unknown: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse display names and show their components.
    Parse {
        /// Assembly display names, e.g. "mscorlib, Version=4.0.0.0, Culture=neutral".
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        #[command(flatten)]
        args: ParseArgs,
    },

    /// Print the canonical spelling of each display name.
    Canonical {
        /// Assembly display names to normalize.
        #[arg(value_name = "NAME", required = true)]
        names: Vec<String>,

        #[command(flatten)]
        args: ParseArgs,
    },
}
