use std::path::Path;

use agenda_core::controller::Agenda;
use agenda_core::ics::generate_ics;
use agenda_core::slot::KeyValueStore;
use anyhow::{Context, Result};
use chrono::Utc;

pub fn run<S: KeyValueStore>(agenda: &Agenda<S>, output: Option<&Path>, name: &str) -> Result<()> {
    let ics = generate_ics(agenda.store().list(), name, Utc::now());

    match output {
        Some(path) => {
            std::fs::write(path, &ics)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!(
                "Exported {} events to {}",
                agenda.store().list().len(),
                path.display()
            );
        }
        None => print!("{}", ics),
    }

    Ok(())
}
