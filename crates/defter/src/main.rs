//! defter - fuzzy-search a KeePass database and copy the password
//!
//! Built with Ratatui and crossterm.

mod cli;
mod handlers;
mod output;
mod selector;
mod session;
mod terminal;
mod ui;

use anyhow::Result;
use clap::Parser;
use defter_core::{ConfigStore, EntryProjector, Error, KeepassLoader};
use std::io::{self, IsTerminal};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use cli::{Args, Texts};
use output::{Presenter, SystemClipboard};

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("defter=warn,defter_core=warn")),
        )
        .with_writer(io::stderr) // Keep stdout for the entry printout
        .init();

    let args = Args::parse();
    let styled = io::stdout().is_terminal();
    let mut texts = Texts::new(io::stdout(), styled);

    let result = if args.serve_clipboard {
        output::serve_clipboard(io::stdin().lock())
    } else if args.version {
        texts.version().map_err(Into::into)
    } else if args.help {
        texts.help().map_err(Into::into)
    } else if args.init {
        run_init(&mut texts, args)
    } else {
        run_lookup(args, styled)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!("Flow failed: {err:?}");
            let (summary, cause) = match err.downcast_ref::<Error>() {
                Some(e) => (e.to_string(), e.cause()),
                None => (err.to_string(), format!("{err:#}")),
            };
            let _ = texts.error(&summary, &cause);
            ExitCode::FAILURE
        }
    }
}

fn run_init(texts: &mut Texts<io::Stdout>, args: Args) -> Result<()> {
    texts.setting_config()?;
    let store = ConfigStore::default_location().map_err(Error::ConfigWriteFailed)?;
    session::init(&store, args.db, args.password, args.key)?;
    Ok(())
}

fn run_lookup(args: Args, styled: bool) -> Result<()> {
    let store = ConfigStore::default_location().map_err(Error::ConfigMissingOrInvalid)?;
    let initial_query = args.initial_query();
    let mut presenter = Presenter::new(io::stdout(), SystemClipboard, styled);

    session::lookup(
        &store,
        &KeepassLoader::new(),
        &EntryProjector::default(),
        terminal::select,
        &mut presenter,
        initial_query.as_deref(),
    )
}
