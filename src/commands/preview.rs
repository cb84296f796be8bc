//! Render a markdown file without storing it

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::content::Render;
use crate::Folio;

/// Print the HTML for the markdown in `file`
pub fn run(folio: &Folio, file: &Path) -> Result<()> {
    println!("{}", render_file(folio, file)?);
    Ok(())
}

pub fn render_file(folio: &Folio, file: &Path) -> Result<String> {
    let markdown =
        fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    Ok(folio.renderer().render(&markdown))
}
