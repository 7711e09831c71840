use log::{error, LevelFilter};
use simplelog::{Config, SimpleLogger};
use clap::{Parser, Subcommand, ValueEnum};
use clap_num::maybe_hex;
use gbop_core::{Catalog, Namespace};
use crate::browser_error::BrowserError;
use crate::op_code_browser::OpCodeBrowser;
use crate::view_config::{ViewConfig, DEFAULT_RESULT_LIMIT};

mod browser_error;
mod view_config;
mod table_view;
mod details_view;
mod results_view;
mod op_code_browser;
#[cfg(test)]
pub mod tests;

#[derive(Parser, Debug)]
#[command(author, version, about = "Game Boy CPU opcode reference", long_about = None)]
pub struct Args {
    #[arg(
        short = 'd',
        long = "debug",
        help = "debug mode",
        default_value_t = 0,
        global = true
    )]
    debug: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the opcode tables
    Table {
        #[arg(long = "only", value_enum, help = "print a single table")]
        only: Option<GridChoice>,

        #[arg(short = 'q', long = "query", help = "mark cells matching this search")]
        query: Option<String>,

        #[arg(long = "hide-non-matches", help = "blank out cells not matching the query")]
        hide_non_matches: bool,

        #[arg(short = 's', long = "select", help = "highlight the row and column of this opcode")]
        select: Option<String>,
    },

    /// Search by mnemonic, opcode (3e / 0x3e / cb11) or category
    Search {
        #[arg(required = true)]
        query: Vec<String>,

        #[arg(
            short = 'l',
            long = "limit",
            help = "maximum number of results shown",
            default_value_t = DEFAULT_RESULT_LIMIT
        )]
        limit: usize,

        #[arg(long = "json", help = "print matching records as JSON")]
        json: bool,
    },

    /// Print the details of one instruction
    Show {
        op_code: Option<String>,

        #[arg(
            short = 'x',
            long = "byte",
            help = "opcode byte value, decimal or hex",
            value_parser = maybe_hex::<u8>,
            conflicts_with = "op_code"
        )]
        byte: Option<u8>,

        #[arg(long = "cb", help = "read --byte in the CB-prefixed table")]
        cb: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum GridChoice {
    Primary,
    Cb,
}

impl From<GridChoice> for Namespace {
    fn from(choice: GridChoice) -> Self {
        match choice {
            GridChoice::Primary => Namespace::Primary,
            GridChoice::Cb => Namespace::Extended,
        }
    }
}

fn logger_init(debug: u8) {

    let log_level = match debug {
        1 => LevelFilter::Debug,
        2 => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let _ = SimpleLogger::init(log_level, Config::default());
}

fn run(command: Command, catalog: &Catalog) -> Result<String, BrowserError> {
    match command {
        Command::Table { only, query, hide_non_matches, select } => {
            let config = ViewConfig::default().with_hide_non_matches(hide_non_matches);
            let browser = OpCodeBrowser::new(catalog, config);
            let namespaces: Vec<Namespace> = match only {
                Some(choice) => vec![choice.into()],
                None => vec![Namespace::Primary, Namespace::Extended],
            };

            Ok(browser.tables(&namespaces, query.as_deref(), select.as_deref()))
        }

        Command::Search { query, limit, json } => {
            let browser = OpCodeBrowser::new(catalog, ViewConfig::default().with_result_limit(limit));
            browser.results(&query.join(" "), json)
        }

        Command::Show { op_code, byte, cb } => {
            let browser = OpCodeBrowser::new(catalog, ViewConfig::default());
            browser.details(op_code.as_deref(), byte, cb)
        }
    }
}

fn main() -> Result<(), BrowserError> {
    let args: Args = Args::parse();

    logger_init(args.debug);

    let catalog = Catalog::shared().map_err(|e| {
        error!("fatal error while generating the opcode catalog: {}", e);
        e
    })?;

    let output = run(args.command, catalog).map_err(|e| {
        error!("{}", e);
        e
    })?;
    print!("{}", output);

    Ok(())
}
