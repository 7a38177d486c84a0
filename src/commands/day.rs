use agenda_core::controller::Agenda;
use agenda_core::slot::KeyValueStore;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::dates::parse_date;
use crate::render::{render_event, render_event_details};

pub fn run<S: KeyValueStore>(agenda: &Agenda<S>, date: Option<&str>) -> Result<()> {
    let date = match date {
        Some(d) => parse_date(d, agenda.today())?,
        None => agenda.today(),
    };

    println!("{}", date.format("%A, %Y-%m-%d").to_string().bold());

    let events = agenda.store().for_date(date);
    if events.is_empty() {
        println!("  {}", "No events".dimmed());
        return Ok(());
    }

    for event in events {
        println!("{}", render_event(event));
        for line in render_event_details(event) {
            println!("{}", line);
        }
    }

    Ok(())
}
