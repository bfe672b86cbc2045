//! `streettech clear-history` – remove all history.

use anyhow::Result;
use streettech_core::session::Session;

pub fn run_clear_history(session: &Session) -> Result<()> {
    let n = session.history().len();
    session.clear_history()?;
    println!("Removed {n} history entr{}.", if n == 1 { "y" } else { "ies" });
    Ok(())
}
