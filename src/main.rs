use clap::{Parser as ClapParser, Subcommand};
use scim_filter::ParseOptions;
use scim_filter::cli::{self, CliError, CompileOptions};
use std::io::{self, Read};
use tracing::Level;

#[derive(ClapParser)]
#[command(name = "scim2mongo")]
#[command(about = "scim2mongo - Compile SCIM filter expressions into MongoDB queries")]
#[command(version)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, global = true, default_value = "warn")]
    log_level: Level,

    /// Maximum nesting of parentheses, array filters and and/or switches
    #[arg(long, global = true, default_value_t = ParseOptions::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a filter into a MongoDB query
    Compile {
        /// The SCIM filter (reads from stdin if not provided)
        filter: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Validate a filter and print its normalised form
    Check {
        /// The SCIM filter (reads from stdin if not provided)
        filter: Option<String>,
    },

    /// Print the tokens of a filter, one per line
    Tokens {
        /// The SCIM filter (reads from stdin if not provided)
        filter: Option<String>,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'scim2mongo docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(io::stderr)
        .init();

    let parse = ParseOptions {
        max_depth: cli.max_depth,
    };

    let result = match cli.command {
        Commands::Compile { filter, pretty } => run_compile(filter, pretty, false, parse),
        Commands::Check { filter } => run_compile(filter, false, true, parse),
        Commands::Tokens { filter } => run_tokens(filter),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => cli::get_doc_category(&category).map(|content| {
            print!("{}", content);
        }),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn read_filter(filter: Option<String>) -> Result<Option<String>, CliError> {
    match filter {
        Some(s) => Ok(Some(s)),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}

fn run_compile(
    filter: Option<String>,
    pretty: bool,
    syntax_only: bool,
    parse: ParseOptions,
) -> Result<(), CliError> {
    let options = CompileOptions {
        filter: read_filter(filter)?,
        pretty,
        syntax_only,
        parse,
    };

    let result = cli::execute_compile(&options)?;
    println!("{}", result.render(options.pretty)?);
    Ok(())
}

fn run_tokens(filter: Option<String>) -> Result<(), CliError> {
    let options = CompileOptions {
        filter: read_filter(filter)?,
        ..Default::default()
    };

    for token in cli::execute_tokens(&options)? {
        println!("{}", token);
    }
    Ok(())
}
