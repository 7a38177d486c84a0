//! The event form: command-line flags plus interactive prompts.

use agenda_core::controller::{Agenda, Outcome};
use agenda_core::slot::KeyValueStore;
use agenda_core::{Event, EventDraft, EventType};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Args;
use dialoguer::{Input, Select};
use owo_colors::OwoColorize;

use crate::dates::{end_after, parse_time};
use crate::prompt::TerminalPrompter;

/// Event fields that can be given as flags.
#[derive(Args, Debug, Default, Clone)]
pub struct EventArgs {
    /// Start time (HH:MM)
    #[arg(short, long)]
    pub start: Option<String>,

    /// End time (HH:MM)
    #[arg(short, long, conflicts_with = "duration")]
    pub end: Option<String>,

    /// Duration instead of an end time (e.g. "30m", "1h30m")
    #[arg(short, long, conflicts_with = "end")]
    pub duration: Option<String>,

    /// Event title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Client name
    #[arg(short, long)]
    pub client: Option<String>,

    /// Event type: Reunião, Consulta, Ligação, Apresentação, Outro, or any other label
    #[arg(long = "type")]
    pub event_type: Option<String>,

    /// Free-text notes
    #[arg(short, long)]
    pub notes: Option<String>,

    /// Phone number or email (pass "" to clear)
    #[arg(long)]
    pub contact: Option<String>,

    /// Date to move the event to; set by `edit --date`
    #[arg(skip)]
    pub move_to: Option<NaiveDate>,
}

impl EventArgs {
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.duration.is_none()
            && self.title.is_none()
            && self.client.is_none()
            && self.event_type.is_none()
            && self.notes.is_none()
            && self.contact.is_none()
            && self.move_to.is_none()
    }

    /// Overlay the given flags on `draft`.
    ///
    /// A duration is measured from the resulting start time, so `--start`
    /// alone keeps the end, while `--start` with `--duration` moves both.
    pub fn apply(&self, mut draft: EventDraft) -> Result<EventDraft> {
        if let Some(date) = self.move_to {
            draft.date = date;
        }
        if let Some(start) = &self.start {
            draft.start_time = parse_time(start)?;
        }
        if let Some(end) = &self.end {
            draft.end_time = parse_time(end)?;
        }
        if let Some(duration) = &self.duration {
            draft.end_time = end_after(draft.start_time, duration)?;
        }
        if let Some(title) = &self.title {
            draft.title = title.trim().to_string();
        }
        if let Some(client) = &self.client {
            draft.client_name = client.trim().to_string();
        }
        if let Some(event_type) = &self.event_type {
            draft.event_type = EventType::from(event_type.trim());
        }
        if let Some(notes) = &self.notes {
            draft.notes = notes.clone();
        }
        if let Some(contact) = &self.contact {
            draft.contact = Some(contact.clone());
        }
        Ok(draft)
    }
}

/// Fill the open form and save it.
///
/// Interactively, a rejected save re-opens the prompts with the values the
/// user typed, the same way the form stays open on a conflict. Otherwise the
/// rejection is reported and the form is closed.
pub fn submit<S: KeyValueStore>(
    agenda: &mut Agenda<S>,
    args: &EventArgs,
    interactive: bool,
) -> Result<Event> {
    let form = agenda
        .form()
        .form()
        .cloned()
        .context("No event form is open")?;

    let mut draft = args.apply(form.initial_draft())?;
    let mut prompter = TerminalPrompter::new(false);

    loop {
        if interactive {
            draft = prompt_fields(draft)?;
        }

        match agenda.on_save(draft.clone(), &mut prompter)? {
            Outcome::Saved(event) => return Ok(event),
            Outcome::Rejected(_) if interactive => continue,
            Outcome::Rejected(rejection) => {
                agenda.on_close();
                return Err(rejection).context("Event was not saved");
            }
            other => anyhow::bail!("Unexpected result while saving: {:?}", other),
        }
    }
}

/// Prompt for every field, pre-filled with the draft's current values.
fn prompt_fields(draft: EventDraft) -> Result<EventDraft> {
    let title: String = Input::new()
        .with_prompt("  Título do evento")
        .with_initial_text(draft.title)
        .interact_text()?;

    let client_name: String = Input::new()
        .with_prompt("  Nome do cliente")
        .with_initial_text(draft.client_name)
        .interact_text()?;

    let start_time = parse_time(
        &Input::<String>::new()
            .with_prompt("  Hora de início")
            .with_initial_text(draft.start_time.to_string())
            .validate_with(|s: &String| parse_time(s).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?,
    )?;

    let end_time = parse_time(
        &Input::<String>::new()
            .with_prompt("  Hora de fim")
            .with_initial_text(draft.end_time.to_string())
            .validate_with(|s: &String| parse_time(s).map(|_| ()).map_err(|e| e.to_string()))
            .interact_text()?,
    )?;

    let event_type = prompt_event_type(draft.event_type)?;

    let contact: String = Input::new()
        .with_prompt("  Contato (telefone/email)")
        .with_initial_text(draft.contact.unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    let notes: String = Input::new()
        .with_prompt("  Notas adicionais")
        .with_initial_text(draft.notes)
        .allow_empty(true)
        .interact_text()?;

    Ok(EventDraft {
        date: draft.date,
        start_time,
        end_time,
        title: title.trim().to_string(),
        client_name: client_name.trim().to_string(),
        event_type,
        notes,
        contact: Some(contact),
    })
}

fn prompt_event_type(current: EventType) -> Result<EventType> {
    let mut choices: Vec<EventType> = EventType::BUILTIN.to_vec();
    if !choices.contains(&current) {
        choices.push(current.clone());
    }
    let default = choices.iter().position(|t| *t == current).unwrap_or(0);

    let labels: Vec<&str> = choices.iter().map(EventType::as_str).collect();
    let selection = Select::new()
        .with_prompt("  Tipo de evento")
        .items(&labels)
        .default(default)
        .interact()?;

    Ok(choices[selection].clone())
}

pub fn print_saved(verb: &str, event: &Event) {
    println!("{}", format!("  {}: {}", verb, event).green());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank() -> EventDraft {
        EventDraft::blank(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
    }

    #[test]
    fn apply_without_flags_keeps_draft() {
        assert!(EventArgs::default().is_empty());
        assert_eq!(EventArgs::default().apply(blank()).unwrap(), blank());
    }

    #[test]
    fn apply_overrides_fields() {
        let args = EventArgs {
            start: Some("14:00".to_string()),
            end: Some("15:30".to_string()),
            title: Some("  Revisão  ".to_string()),
            client: Some("Ana".to_string()),
            event_type: Some("Consulta".to_string()),
            contact: Some("ana@example.com".to_string()),
            ..Default::default()
        };
        let draft = args.apply(blank()).unwrap();
        assert_eq!(draft.start_time.to_string(), "14:00");
        assert_eq!(draft.end_time.to_string(), "15:30");
        assert_eq!(draft.title, "Revisão");
        assert_eq!(draft.event_type, EventType::Consultation);
        assert_eq!(draft.contact.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn apply_duration_is_measured_from_new_start() {
        let args = EventArgs {
            start: Some("16:00".to_string()),
            duration: Some("45m".to_string()),
            ..Default::default()
        };
        let draft = args.apply(blank()).unwrap();
        assert_eq!(draft.end_time.to_string(), "16:45");
    }

    #[test]
    fn apply_custom_type() {
        let args = EventArgs {
            event_type: Some("Workshop".to_string()),
            ..Default::default()
        };
        let draft = args.apply(blank()).unwrap();
        assert_eq!(draft.event_type, EventType::Custom("Workshop".to_string()));
    }

    #[test]
    fn apply_moves_date() {
        let target = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        let args = EventArgs {
            move_to: Some(target),
            ..Default::default()
        };
        assert!(!args.is_empty());
        assert_eq!(args.apply(blank()).unwrap().date, target);
    }

    #[test]
    fn apply_rejects_bad_time() {
        let args = EventArgs {
            start: Some("25:00".to_string()),
            ..Default::default()
        };
        assert!(args.apply(blank()).is_err());
    }
}
