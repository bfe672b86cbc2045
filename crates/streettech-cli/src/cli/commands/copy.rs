//! `streettech copy <n>` – copy a history entry's URL to the clipboard.

use anyhow::{anyhow, Result};
use streettech_core::session::Session;

pub fn run_copy(session: &Session, index: usize) -> Result<()> {
    let entry = index
        .checked_sub(1)
        .and_then(|i| session.history().get(i))
        .ok_or_else(|| anyhow!("no history entry #{index}"))?;
    session.copy_url(&entry)?;
    println!();
    println!("{}", entry.url);
    Ok(())
}
