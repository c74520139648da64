use anyhow::Result;
use clap::{Parser, Subcommand};
use kakeibo_ingest::{ALL_FORMATS, StatementFormat};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod config;
mod import_cmd;
mod settle_cmd;
mod state;

use import_cmd::ImportArgs;

#[derive(Parser, Debug)]
#[command(name = "kakeibo", version, about = "Household statement import and expense settlement")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a bank or card statement export and list the rows not yet imported
    Import {
        /// Statement CSV (UTF-8 or Shift_JIS)
        file: PathBuf,

        /// Statement layout; sniffed from the file when omitted
        #[arg(long, value_parser = parse_format)]
        format: Option<StatementFormat>,

        /// File of already-stored hash keys, one per line
        #[arg(long)]
        seen: Option<PathBuf>,

        /// Append the new rows' hash keys to the --seen file
        #[arg(long, requires = "seen")]
        record: bool,

        /// Print new rows as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Work out who owes whom from a `payer,amount` CSV of shared expenses
    Settle {
        file: PathBuf,

        /// Display name for a payer id (repeatable)
        #[arg(long = "name", value_name = "ID=NAME")]
        names: Vec<String>,
    },

    /// Manage ~/.kakeibo/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default configuration if none exists
    Init,
    /// Print the effective configuration
    Show,
}

fn parse_format(key: &str) -> Result<StatementFormat, String> {
    StatementFormat::from_key(key).ok_or_else(|| {
        let known: Vec<_> = ALL_FORMATS.iter().map(|f| f.key()).collect();
        format!("unknown format {key:?} (expected one of: {})", known.join(", "))
    })
}

fn init_logging(default_filter: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config()?;
    init_logging(&cfg.log.filter);

    match cli.command {
        Command::Import {
            file,
            format,
            seen,
            record,
            json,
        } => {
            import_cmd::run_import(
                ImportArgs {
                    file,
                    format,
                    seen,
                    record,
                    json,
                },
                &cfg.parser,
            )?;
        }

        Command::Settle { file, names } => {
            settle_cmd::run_settle(&file, &names)?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => config::show_config()?,
        },
    }

    Ok(())
}
