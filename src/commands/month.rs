use agenda_core::controller::{Agenda, Intent};
use agenda_core::month::MonthCursor;
use agenda_core::slot::KeyValueStore;
use anyhow::Result;

use crate::prompt::TerminalPrompter;
use crate::render::render_month;

pub fn run<S: KeyValueStore>(agenda: &mut Agenda<S>, month: Option<&str>) -> Result<()> {
    let intent = match month {
        Some(m) => Intent::ShowMonth(m.parse::<MonthCursor>()?),
        None => Intent::Today,
    };
    agenda.dispatch(intent, &mut TerminalPrompter::new(false))?;

    println!("{}", render_month(&agenda.view()));
    Ok(())
}
