//! `streettech qualities` – list quality tiers.

use anyhow::Result;
use streettech_core::quality::{Quality, QUALITY_OPTIONS};

/// One line per tier, marking the configured default.
pub(crate) fn quality_rows(default: Quality) -> Vec<String> {
    QUALITY_OPTIONS
        .iter()
        .map(|o| {
            let marker = if o.value == default { " (default)" } else { "" };
            format!("{:<6} {:<12} {}{}", o.value, o.label, o.resolution, marker)
        })
        .collect()
}

pub fn run_qualities(default: Quality) -> Result<()> {
    for row in quality_rows(default) {
        println!("{row}");
    }
    Ok(())
}
