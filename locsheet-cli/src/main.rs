use std::{path::Path, process::ExitCode};

use clap::{Parser, Subcommand};
use locsheet::{Documents, Error, codec};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Log debug events (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    commands: Commands,
}

/// Supported subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Create placeholder documents to fill in by hand.
    ///
    /// Appends to OUTPUT when it already exists.
    New {
        /// Comma-separated language codes, e.g. `en,fr,de` (`,fr` for an Android default locale)
        languages: String,

        /// Comma-separated document (sheet) names
        doc_names: String,

        /// The file to write (`.xlsx`, `.json` or `.yaml`)
        #[arg(default_value = "Localizable.xlsx")]
        output: String,
    },

    /// Export every document to its platform resource files.
    Export {
        /// The input file (`.xlsx`, `.json` or `.yaml`)
        input: String,

        /// Root directory the exported files are written under
        export_dir: String,
    },

    /// Convert a document set between spreadsheet, JSON and YAML.
    Convert {
        /// The input file to read
        input: String,

        /// The output file to write; its extension selects the format
        output: String,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Splits a comma-separated list into trimmed entries.
///
/// Empty entries are kept: an empty language code is Android's default locale.
fn split_list(list: &str) -> Vec<&str> {
    list.split(',').map(str::trim).collect()
}

fn run_new_command(languages: &str, doc_names: &str, output: &str) -> Result<(), Error> {
    let mut docs = if Path::new(output).exists() {
        codec::read_documents(output)?
    } else {
        Documents::default()
    };
    let mut names = split_list(doc_names);
    names.retain(|name| !name.is_empty());
    docs.append_scaffold(&split_list(languages), &names);
    codec::write_documents(&docs, output)
}

fn run(commands: Commands) -> Result<(), Error> {
    match commands {
        Commands::New {
            languages,
            doc_names,
            output,
        } => run_new_command(&languages, &doc_names, &output),
        Commands::Export { input, export_dir } => codec::export(input, export_dir),
        Commands::Convert { input, output } => codec::convert(input, output),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    match run(args.commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("en, fr"), ["en", "fr"]);
        assert_eq!(split_list(",fr"), ["", "fr"]);
    }

    #[test]
    fn test_args_parse_new_with_default_output() {
        let args = Args::try_parse_from(["locsheet", "new", "en,fr", "Main"]).unwrap();
        match args.commands {
            Commands::New {
                languages,
                doc_names,
                output,
            } => {
                assert_eq!(languages, "en,fr");
                assert_eq!(doc_names, "Main");
                assert_eq!(output, "Localizable.xlsx");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
