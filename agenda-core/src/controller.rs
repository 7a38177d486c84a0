//! Application controller.
//!
//! [`Agenda`] owns the event store, the month cursor and the form state. UI
//! collaborators read immutable snapshots ([`MonthView`], [`FormState`]) and
//! send [`Intent`]s back; they never touch the store themselves.

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{AgendaResult, Rejection};
use crate::event::{Event, EventDraft};
use crate::month::MonthCursor;
use crate::slot::KeyValueStore;
use crate::store::EventStore;
use crate::validate::validate;

pub const DELETE_CONFIRMATION: &str = "Tem certeza que deseja excluir este evento?";
pub const IMPORT_CONFIRMATION: &str = "Substituir todos os eventos pelos eventos importados?";

/// Blocking user interaction the controller needs from the UI.
pub trait Prompter {
    /// Show a message the user has to acknowledge.
    fn alert(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// What the event form was opened for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Form {
    Create { date: NaiveDate },
    Edit { event: Event },
}

impl Form {
    pub fn date(&self) -> NaiveDate {
        match self {
            Form::Create { date } => *date,
            Form::Edit { event } => event.date,
        }
    }

    /// Id of the event being edited, None when creating.
    pub fn editing_id(&self) -> Option<&str> {
        match self {
            Form::Create { .. } => None,
            Form::Edit { event } => Some(&event.id),
        }
    }

    /// The fields the form starts with.
    pub fn initial_draft(&self) -> EventDraft {
        match self {
            Form::Create { date } => EventDraft::blank(*date),
            Form::Edit { event } => event.to_draft(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Closed,
    Open(Form),
}

impl FormState {
    pub fn is_open(&self) -> bool {
        matches!(self, FormState::Open(_))
    }

    pub fn form(&self) -> Option<&Form> {
        match self {
            FormState::Closed => None,
            FormState::Open(form) => Some(form),
        }
    }
}

/// Requests from the calendar view and the event form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    DateClicked(NaiveDate),
    EventClicked(String),
    Save(EventDraft),
    Delete(String),
    Import(Vec<Event>),
    Close,
    PrevMonth,
    NextMonth,
    ShowMonth(MonthCursor),
    Today,
}

/// What handling an intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    FormOpened(Form),
    Saved(Event),
    Rejected(Rejection),
    Deleted(String),
    DeleteDeclined,
    Imported(usize),
    ImportDeclined,
    Closed,
    MonthShown(MonthCursor),
    /// The intent did not apply in the current state
    Ignored,
}

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Ordered by start time
    pub events: Vec<Event>,
}

/// Snapshot of everything the month grid renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub cursor: MonthCursor,
    /// Leading blanks are None
    pub cells: Vec<Option<DayCell>>,
}

pub struct Agenda<S: KeyValueStore> {
    store: EventStore<S>,
    cursor: MonthCursor,
    form: FormState,
    today: NaiveDate,
}

impl<S: KeyValueStore> Agenda<S> {
    pub fn new(store: EventStore<S>, today: NaiveDate) -> Self {
        Agenda {
            store,
            cursor: MonthCursor::containing(today),
            form: FormState::Closed,
            today,
        }
    }

    pub fn store(&self) -> &EventStore<S> {
        &self.store
    }

    pub fn cursor(&self) -> MonthCursor {
        self.cursor
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn view(&self) -> MonthView {
        let cells = self
            .cursor
            .cells()
            .into_iter()
            .map(|cell| {
                cell.map(|date| DayCell {
                    date,
                    is_today: date == self.today,
                    events: self.store.for_date(date).into_iter().cloned().collect(),
                })
            })
            .collect();

        MonthView {
            cursor: self.cursor,
            cells,
        }
    }

    pub fn dispatch(&mut self, intent: Intent, prompter: &mut dyn Prompter) -> AgendaResult<Outcome> {
        debug!("Dispatching {:?}", intent);

        match intent {
            Intent::DateClicked(date) => Ok(self.on_date_click(date)),
            Intent::EventClicked(id) => Ok(self.on_event_click(&id)),
            Intent::Save(draft) => self.on_save(draft, prompter),
            Intent::Delete(id) => self.on_delete(&id, prompter),
            Intent::Import(events) => self.on_import(events, prompter),
            Intent::Close => {
                self.on_close();
                Ok(Outcome::Closed)
            }
            Intent::PrevMonth => Ok(self.show_month(self.cursor.prev())),
            Intent::NextMonth => Ok(self.show_month(self.cursor.next())),
            Intent::ShowMonth(cursor) => Ok(self.show_month(cursor)),
            Intent::Today => Ok(self.show_month(MonthCursor::containing(self.today))),
        }
    }

    /// Open the form in create mode for `date`.
    pub fn on_date_click(&mut self, date: NaiveDate) -> Outcome {
        let form = Form::Create { date };
        self.form = FormState::Open(form.clone());
        Outcome::FormOpened(form)
    }

    /// Open the form in edit mode, seeded from the stored event.
    pub fn on_event_click(&mut self, id: &str) -> Outcome {
        let Some(event) = self.store.get(id) else {
            debug!("Click on unknown event {} ignored", id);
            return Outcome::Ignored;
        };

        let form = Form::Edit {
            event: event.clone(),
        };
        self.form = FormState::Open(form.clone());
        Outcome::FormOpened(form)
    }

    /// Validate and commit the open form.
    ///
    /// A rejection is shown through `prompter` and leaves both the store and
    /// the form untouched. Storage errors are returned with the form still
    /// open so the save can be retried.
    pub fn on_save(&mut self, draft: EventDraft, prompter: &mut dyn Prompter) -> AgendaResult<Outcome> {
        let Some(form) = self.form.form() else {
            debug!("Save with no open form ignored");
            return Ok(Outcome::Ignored);
        };
        let editing = form.editing_id().map(str::to_string);

        let same_day = self.store.for_date(draft.date);
        let verdict = draft
            .check()
            .and_then(|_| validate(&draft, &same_day, editing.as_deref()));

        if let Err(rejection) = verdict {
            debug!("Save rejected: {:?}", rejection);
            prompter.alert(&rejection.to_string());
            return Ok(Outcome::Rejected(rejection));
        }

        let event = self.store.upsert(editing.as_deref(), draft)?;
        self.form = FormState::Closed;
        Ok(Outcome::Saved(event))
    }

    /// Delete after explicit confirmation. Unknown ids change nothing.
    pub fn on_delete(&mut self, id: &str, prompter: &mut dyn Prompter) -> AgendaResult<Outcome> {
        if !prompter.confirm(DELETE_CONFIRMATION) {
            return Ok(Outcome::DeleteDeclined);
        }

        self.store.remove(id)?;
        self.form = FormState::Closed;
        Ok(Outcome::Deleted(id.to_string()))
    }

    /// Replace every stored event after confirmation. The imported set is
    /// held to the same rules as single saves.
    pub fn on_import(&mut self, events: Vec<Event>, prompter: &mut dyn Prompter) -> AgendaResult<Outcome> {
        if !prompter.confirm(IMPORT_CONFIRMATION) {
            return Ok(Outcome::ImportDeclined);
        }

        let count = events.len();
        self.store.replace_all(events)?;
        self.form = FormState::Closed;
        Ok(Outcome::Imported(count))
    }

    pub fn on_close(&mut self) {
        self.form = FormState::Closed;
    }

    fn show_month(&mut self, cursor: MonthCursor) -> Outcome {
        self.cursor = cursor;
        Outcome::MonthShown(cursor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slot::MemoryStore;
    use crate::store::DEFAULT_STORAGE_KEY;

    #[derive(Default)]
    struct ScriptedPrompter {
        alerts: Vec<String>,
        answer: bool,
        asked: usize,
    }

    impl Prompter for ScriptedPrompter {
        fn alert(&mut self, message: &str) {
            self.alerts.push(message.to_string());
        }

        fn confirm(&mut self, _message: &str) -> bool {
            self.asked += 1;
            self.answer
        }
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn draft(d: &str, start: &str, end: &str) -> EventDraft {
        EventDraft {
            start_time: start.parse().unwrap(),
            end_time: end.parse().unwrap(),
            title: "Atendimento".to_string(),
            client_name: "Ana".to_string(),
            ..EventDraft::blank(date(d))
        }
    }

    fn make_agenda() -> Agenda<MemoryStore> {
        let slot = MemoryStore::with_value(DEFAULT_STORAGE_KEY, "[]");
        let store = EventStore::load(slot, DEFAULT_STORAGE_KEY, date("2024-06-01"));
        Agenda::new(store, date("2024-06-01"))
    }

    fn create(agenda: &mut Agenda<MemoryStore>, d: &str, start: &str, end: &str) -> Outcome {
        let mut prompter = ScriptedPrompter::default();
        agenda.on_date_click(date(d));
        agenda.on_save(draft(d, start, end), &mut prompter).unwrap()
    }

    #[test]
    fn test_date_click_opens_create_form_with_defaults() {
        let mut agenda = make_agenda();
        let outcome = agenda.on_date_click(date("2024-06-05"));

        let form = Form::Create {
            date: date("2024-06-05"),
        };
        assert_eq!(outcome, Outcome::FormOpened(form.clone()));
        assert_eq!(agenda.form(), &FormState::Open(form.clone()));
        assert_eq!(form.initial_draft(), EventDraft::blank(date("2024-06-05")));
    }

    #[test]
    fn test_scenario_overlap_then_touching_then_bad_range() {
        let mut agenda = make_agenda();
        assert!(matches!(create(&mut agenda, "2024-06-01", "10:00", "11:00"), Outcome::Saved(_)));

        let mut prompter = ScriptedPrompter::default();
        agenda.on_date_click(date("2024-06-01"));

        let outcome = agenda.on_save(draft("2024-06-01", "10:30", "11:30"), &mut prompter).unwrap();
        assert!(matches!(outcome, Outcome::Rejected(Rejection::Overlap { .. })));
        assert!(agenda.form().is_open());
        assert_eq!(prompter.alerts, vec!["Erro: Já existe um evento neste horário."]);

        let outcome = agenda.on_save(draft("2024-06-01", "09:00", "08:00"), &mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Rejected(Rejection::InvalidRange));
        assert!(agenda.form().is_open());
        assert_eq!(agenda.store().list().len(), 1);

        let outcome = agenda.on_save(draft("2024-06-01", "11:00", "12:00"), &mut prompter).unwrap();
        assert!(matches!(outcome, Outcome::Saved(_)));
        assert_eq!(agenda.form(), &FormState::Closed);
        assert_eq!(agenda.store().list().len(), 2);
    }

    #[test]
    fn test_edit_without_changes_is_accepted() {
        let mut agenda = make_agenda();
        let Outcome::Saved(event) = create(&mut agenda, "2024-06-01", "10:00", "11:00") else {
            panic!("expected save");
        };

        let Outcome::FormOpened(form) = agenda.on_event_click(&event.id) else {
            panic!("expected form");
        };
        assert_eq!(form.editing_id(), Some(event.id.as_str()));
        assert_eq!(form.date(), event.date);

        let mut prompter = ScriptedPrompter::default();
        let outcome = agenda.on_save(form.initial_draft(), &mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Saved(event));
        assert!(prompter.alerts.is_empty());
        assert_eq!(agenda.store().list().len(), 1);
    }

    #[test]
    fn test_edit_can_move_event_to_another_day() {
        let mut agenda = make_agenda();
        let Outcome::Saved(event) = create(&mut agenda, "2024-06-01", "10:00", "11:00") else {
            panic!("expected save");
        };
        create(&mut agenda, "2024-06-02", "10:00", "11:00");

        let mut prompter = ScriptedPrompter::default();
        agenda.on_event_click(&event.id);
        let outcome = agenda.on_save(draft("2024-06-02", "10:30", "11:30"), &mut prompter).unwrap();
        assert!(matches!(outcome, Outcome::Rejected(Rejection::Overlap { .. })));

        let outcome = agenda.on_save(draft("2024-06-02", "11:00", "11:30"), &mut prompter).unwrap();
        let Outcome::Saved(moved) = outcome else {
            panic!("expected save");
        };
        assert_eq!(moved.id, event.id);
        assert!(agenda.store().for_date(date("2024-06-01")).is_empty());
    }

    #[test]
    fn test_empty_title_is_rejected_before_validation() {
        let mut agenda = make_agenda();
        let mut prompter = ScriptedPrompter::default();
        agenda.on_date_click(date("2024-06-01"));

        let mut bad = draft("2024-06-01", "10:00", "11:00");
        bad.title.clear();
        let outcome = agenda.on_save(bad, &mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Rejected(Rejection::EmptyField("title")));
        assert_eq!(prompter.alerts.len(), 1);
    }

    #[test]
    fn test_save_without_open_form_is_ignored() {
        let mut agenda = make_agenda();
        let mut prompter = ScriptedPrompter::default();
        let outcome = agenda.on_save(draft("2024-06-01", "10:00", "11:00"), &mut prompter).unwrap();
        assert_eq!(outcome, Outcome::Ignored);
        assert!(agenda.store().list().is_empty());
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let mut agenda = make_agenda();
        let Outcome::Saved(event) = create(&mut agenda, "2024-06-01", "10:00", "11:00") else {
            panic!("expected save");
        };
        agenda.on_event_click(&event.id);

        let mut refuse = ScriptedPrompter::default();
        assert_eq!(agenda.on_delete(&event.id, &mut refuse).unwrap(), Outcome::DeleteDeclined);
        assert_eq!(refuse.asked, 1);
        assert!(agenda.form().is_open());
        assert_eq!(agenda.store().list().len(), 1);

        let mut accept = ScriptedPrompter {
            answer: true,
            ..Default::default()
        };
        assert_eq!(
            agenda.on_delete(&event.id, &mut accept).unwrap(),
            Outcome::Deleted(event.id.clone())
        );
        assert!(!agenda.form().is_open());
        assert!(agenda.store().list().is_empty());
    }

    #[test]
    fn test_delete_unknown_id_leaves_store_unchanged() {
        let mut agenda = make_agenda();
        create(&mut agenda, "2024-06-01", "10:00", "11:00");
        let before = agenda.store().list().to_vec();

        let mut accept = ScriptedPrompter {
            answer: true,
            ..Default::default()
        };
        agenda.on_delete("nope", &mut accept).unwrap();
        assert_eq!(agenda.store().list(), before.as_slice());
    }

    #[test]
    fn test_event_click_on_unknown_id_is_ignored() {
        let mut agenda = make_agenda();
        assert_eq!(agenda.on_event_click("nope"), Outcome::Ignored);
        assert!(!agenda.form().is_open());
    }

    #[test]
    fn test_month_navigation_and_view() {
        let mut agenda = make_agenda();
        create(&mut agenda, "2024-06-01", "14:00", "15:00");
        create(&mut agenda, "2024-06-01", "08:00", "09:00");
        let mut prompter = ScriptedPrompter::default();

        let view = agenda.view();
        assert_eq!(view.cursor.to_string(), "2024-06");
        let first = view.cells.iter().flatten().next().unwrap();
        assert_eq!(first.date, date("2024-06-01"));
        assert!(first.is_today);
        let starts: Vec<String> = first.events.iter().map(|e| e.start_time.to_string()).collect();
        assert_eq!(starts, vec!["08:00", "14:00"]);

        agenda.dispatch(Intent::NextMonth, &mut prompter).unwrap();
        assert_eq!(agenda.cursor().to_string(), "2024-07");
        assert!(agenda.view().cells.iter().flatten().all(|c| c.events.is_empty()));

        agenda.dispatch(Intent::PrevMonth, &mut prompter).unwrap();
        agenda.dispatch(Intent::PrevMonth, &mut prompter).unwrap();
        assert_eq!(agenda.cursor().to_string(), "2024-05");

        agenda.dispatch(Intent::Today, &mut prompter).unwrap();
        assert_eq!(agenda.cursor().to_string(), "2024-06");
    }

    #[test]
    fn test_import_replaces_everything_after_confirmation() {
        let mut agenda = make_agenda();
        create(&mut agenda, "2024-06-01", "10:00", "11:00");

        let imported = vec![
            Event::from_draft("x", draft("2024-06-10", "10:00", "11:00")),
            Event::from_draft("y", draft("2024-06-10", "11:00", "12:00")),
        ];

        let mut refuse = ScriptedPrompter::default();
        let outcome = agenda.dispatch(Intent::Import(imported.clone()), &mut refuse).unwrap();
        assert_eq!(outcome, Outcome::ImportDeclined);
        assert_eq!(agenda.store().list().len(), 1);

        let mut accept = ScriptedPrompter {
            answer: true,
            ..Default::default()
        };
        let outcome = agenda.dispatch(Intent::Import(imported.clone()), &mut accept).unwrap();
        assert_eq!(outcome, Outcome::Imported(2));
        assert_eq!(agenda.store().list(), imported.as_slice());
    }

    #[test]
    fn test_import_with_overlap_is_refused() {
        let mut agenda = make_agenda();
        let clash = vec![
            Event::from_draft("x", draft("2024-06-10", "10:00", "11:00")),
            Event::from_draft("y", draft("2024-06-10", "10:30", "12:00")),
        ];
        let mut accept = ScriptedPrompter {
            answer: true,
            ..Default::default()
        };
        assert!(agenda.on_import(clash, &mut accept).is_err());
        assert!(agenda.store().list().is_empty());
    }

    #[test]
    fn test_dispatch_close_resets_form() {
        let mut agenda = make_agenda();
        let mut prompter = ScriptedPrompter::default();
        agenda
            .dispatch(Intent::DateClicked(date("2024-06-03")), &mut prompter)
            .unwrap();
        assert!(agenda.form().is_open());
        assert_eq!(agenda.dispatch(Intent::Close, &mut prompter).unwrap(), Outcome::Closed);
        assert_eq!(agenda.form(), &FormState::Closed);
    }
}
