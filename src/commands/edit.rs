use std::io::IsTerminal;

use agenda_core::controller::{Agenda, Outcome};
use agenda_core::slot::KeyValueStore;
use anyhow::Result;

use crate::commands::resolve_id;
use crate::dates::parse_date;
use crate::form::{self, EventArgs};

pub fn run<S: KeyValueStore>(
    agenda: &mut Agenda<S>,
    id: &str,
    date: Option<&str>,
    mut fields: EventArgs,
) -> Result<()> {
    let id = resolve_id(agenda.store(), id)?;
    if let Some(d) = date {
        fields.move_to = Some(parse_date(d, agenda.today())?);
    }

    // With no flags there is nothing to change except through the prompts
    let interactive = fields.is_empty() && std::io::stdin().is_terminal();
    if fields.is_empty() && !interactive {
        anyhow::bail!("Nothing to change. Pass field flags or run in a terminal.");
    }

    if !matches!(agenda.on_event_click(&id), Outcome::FormOpened(_)) {
        anyhow::bail!("No event with id '{}'", id);
    }

    let event = form::submit(agenda, &fields, interactive)?;
    form::print_saved("Updated", &event);
    Ok(())
}
