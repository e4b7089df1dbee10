use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "strand-cmd")]
#[command(about = "Command-line utility for querying JSON arrays as Strand collections")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a debug dump of the elements
    Show {
        /// JSON file holding an array of elements
        file: String,
    },

    /// Group elements and print the group sizes and the grouped structure
    Group {
        /// Field to group by (groups by the whole element if not specified)
        #[arg(long)]
        by: Option<String>,

        /// JSON file holding an array of elements
        file: String,
    },

    /// Split elements into chunks of a fixed size, one JSON array per line
    Chunk {
        /// Number of elements per chunk
        #[arg(short, long, allow_negative_numbers = true)]
        size: i64,

        /// JSON file holding an array of elements
        file: String,
    },

    /// Average of the numeric elements or of a numeric field
    Average {
        /// Field to average (averages the elements themselves if not specified)
        #[arg(long)]
        by: Option<String>,

        /// JSON file holding an array of elements
        file: String,
    },

    /// Print the first element, optionally the first whose field equals a value
    First {
        /// Field to compare
        #[arg(long, requires = "equals")]
        field: Option<String>,

        /// JSON value the field must equal
        #[arg(long, requires = "field")]
        equals: Option<String>,

        /// JSON file holding an array of elements
        file: String,
    },

    /// Convert elements to their plain structure and print it as JSON
    Convert {
        /// Conversion mode: json or native (defaults to native)
        #[arg(short, long)]
        mode: Option<String>,

        /// JSON file holding an array of elements
        file: String,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { file } => commands::show::run(file),
        Commands::Group { by, file } => commands::group::run(by, file),
        Commands::Chunk { size, file } => commands::chunk::run(size, file),
        Commands::Average { by, file } => commands::average::run(by, file),
        Commands::First {
            field,
            equals,
            file,
        } => commands::first::run(field, equals, file),
        Commands::Convert { mode, file } => commands::convert::run(mode, file),
    }
}
