use agenda_core::controller::{Agenda, Outcome};
use agenda_core::slot::KeyValueStore;
use anyhow::Result;
use owo_colors::OwoColorize;

use crate::commands::resolve_id;
use crate::prompt::TerminalPrompter;
use crate::render::render_event;

pub fn run<S: KeyValueStore>(agenda: &mut Agenda<S>, id: &str, yes: bool) -> Result<()> {
    let id = resolve_id(agenda.store(), id)?;

    if let Some(event) = agenda.store().get(&id) {
        println!("{}", render_event(event));
    }

    match agenda.on_delete(&id, &mut TerminalPrompter::new(yes))? {
        Outcome::Deleted(_) => println!("{}", "  Deleted".red()),
        _ => println!("{}", "  Kept".dimmed()),
    }

    Ok(())
}
