//! `streettech history` – list past downloads.

use anyhow::Result;
use streettech_core::session::Session;

pub fn run_history(session: &Session) -> Result<()> {
    let entries = session.history().entries();
    if entries.is_empty() {
        println!("No downloads in history.");
        return Ok(());
    }
    println!("{:<4} {:<20} {:<8} {:<32} {}", "#", "WHEN", "QUALITY", "TITLE", "URL");
    for (i, e) in entries.iter().enumerate() {
        println!(
            "{:<4} {:<20} {:<8} {:<32} {}",
            i + 1,
            e.timestamp.format("%Y-%m-%d %H:%M:%S"),
            e.quality,
            e.title,
            e.url
        );
    }
    Ok(())
}
