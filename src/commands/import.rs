use std::path::Path;

use agenda_core::controller::{Agenda, Intent, Outcome};
use agenda_core::slot::KeyValueStore;
use agenda_core::Event;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use crate::prompt::TerminalPrompter;

pub fn run<S: KeyValueStore>(agenda: &mut Agenda<S>, file: &Path, yes: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let events: Vec<Event> = serde_json::from_str(&content)
        .with_context(|| format!("{} is not a JSON array of events", file.display()))?;

    println!(
        "  {} stored events will be replaced by {} from {}",
        agenda.store().list().len(),
        events.len(),
        file.display()
    );

    let outcome = agenda
        .dispatch(Intent::Import(events), &mut TerminalPrompter::new(yes))
        .context("Import failed, stored events are unchanged")?;

    match outcome {
        Outcome::Imported(count) => println!("{}", format!("  Imported {} events", count).green()),
        _ => println!("{}", "  Nothing imported".dimmed()),
    }

    Ok(())
}
