use agenda_core::controller::Agenda;
use agenda_core::slot::KeyValueStore;
use agenda_core::Event;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::render::render_event;

pub fn run<S: KeyValueStore>(agenda: &Agenda<S>) -> Result<()> {
    let mut events: Vec<&Event> = agenda.store().list().iter().collect();

    if events.is_empty() {
        println!("{}", "No events".dimmed());
        return Ok(());
    }

    events.sort_by_key(|e| (e.date, e.start_time));

    // Group by day
    let mut current_date = None;
    for event in events {
        if current_date != Some(event.date) {
            if current_date.is_some() {
                println!();
            }
            println!("{}", event.date.format("%a %Y-%m-%d").to_string().bold());
            current_date = Some(event.date);
        }
        println!("{}", render_event(event));
    }

    Ok(())
}
