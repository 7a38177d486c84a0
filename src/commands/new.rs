use std::io::IsTerminal;

use agenda_core::controller::Agenda;
use agenda_core::slot::KeyValueStore;
use anyhow::Result;

use crate::dates::parse_date;
use crate::form::{self, EventArgs};

pub fn run<S: KeyValueStore>(agenda: &mut Agenda<S>, date: Option<&str>, fields: EventArgs) -> Result<()> {
    let date = match date {
        Some(d) => parse_date(d, agenda.today())?,
        None => agenda.today(),
    };

    // Prompt only when required fields are missing and someone can answer
    let missing = fields.title.is_none() || fields.client.is_none();
    let interactive = missing && std::io::stdin().is_terminal();

    agenda.on_date_click(date);
    let event = form::submit(agenda, &fields, interactive)?;

    if interactive {
        println!();
    }
    form::print_saved("Created", &event);
    Ok(())
}
