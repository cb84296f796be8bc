//! Clear the stored posts and login state

use anyhow::Result;

use crate::Folio;

/// Remove the storage file, dropping every post and the login flag
pub fn run(folio: &Folio) -> Result<()> {
    let storage = folio.storage();
    if !storage.destroy()? {
        tracing::info!("Nothing to clean at {:?}", storage.path());
    }
    Ok(())
}
