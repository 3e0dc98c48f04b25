//! The two flows behind the command line: writing the config and looking up
//! an entry.

use crate::output::{Clipboard, Presenter};
use crate::selector::Selection;
use anyhow::Result;
use defter_core::{Config, ConfigStore, DatabaseLoader, EntryProjector, Error};
use std::io::Write;

/// Write a new config from the `--init` flags. Nothing is written unless all
/// three are given.
pub fn init(
    store: &ConfigStore,
    db: Option<String>,
    password: Option<String>,
    key: Option<String>,
) -> Result<(), Error> {
    let db = db.ok_or(Error::ArgumentMissing("db"))?;
    let password = password.ok_or(Error::ArgumentMissing("password"))?;
    let key = key.ok_or(Error::ArgumentMissing("key"))?;

    store
        .save(&Config::new(password, key, db))
        .map_err(Error::ConfigWriteFailed)
}

/// Load the config, open the database, let the user pick an entry and
/// present it. A cancelled prompt or an unknown title ends quietly.
pub fn lookup<L, S, W, C>(
    store: &ConfigStore,
    loader: &L,
    projector: &EntryProjector,
    select: S,
    presenter: &mut Presenter<W, C>,
    initial_query: Option<&str>,
) -> Result<()>
where
    L: DatabaseLoader,
    S: FnOnce(Vec<String>, Option<&str>) -> Result<Selection>,
    W: Write,
    C: Clipboard,
{
    let config = store.load().map_err(Error::ConfigMissingOrInvalid)?;
    let raw = loader.open(&config).map_err(Error::DatabaseOpenFailed)?;
    let index = projector.project_all(&raw);
    tracing::debug!("Indexed {} entries", index.len());

    let title = match select(index.titles(), initial_query)? {
        Selection::Chosen(title) => title,
        Selection::Cancelled => {
            tracing::debug!("Selection cancelled");
            return Ok(());
        }
    };

    match index.find_by_title(&title) {
        Some(entry) => presenter.present(entry)?,
        None => tracing::debug!("No entry titled {:?}", title),
    }
    Ok(())
}
