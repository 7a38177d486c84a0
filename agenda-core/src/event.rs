//! The event record and the form record used to create or edit one.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::Rejection;
use crate::time::{TimeOfDay, hm};

const DEFAULT_START: TimeOfDay = hm(9, 0);
const DEFAULT_END: TimeOfDay = hm(10, 0);

/// A scheduled appointment.
///
/// The JSON field names are camelCase so existing slots keep loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    /// Wall-clock local date, serialized as YYYY-MM-DD
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub title: String,
    pub client_name: String,
    pub event_type: EventType,
    #[serde(default)]
    pub notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl Event {
    /// Build an event from a checked draft. Blank contact becomes None.
    pub fn from_draft(id: impl Into<String>, draft: EventDraft) -> Self {
        let contact = draft.contact.filter(|c| !c.trim().is_empty());

        Event {
            id: id.into(),
            date: draft.date,
            start_time: draft.start_time,
            end_time: draft.end_time,
            title: draft.title,
            client_name: draft.client_name,
            event_type: draft.event_type,
            notes: draft.notes,
            contact,
        }
    }

    /// The editable fields of this event, as the form would show them.
    pub fn to_draft(&self) -> EventDraft {
        EventDraft {
            date: self.date,
            start_time: self.start_time,
            end_time: self.end_time,
            title: self.title.clone(),
            client_name: self.client_name.clone(),
            event_type: self.event_type.clone(),
            notes: self.notes.clone(),
            contact: self.contact.clone(),
        }
    }

    /// Length of the event in minutes.
    pub fn duration_minutes(&self) -> i64 {
        i64::from(self.end_time.minutes()) - i64::from(self.start_time.minutes())
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} {}-{} {}",
            self.date.format("%Y-%m-%d"),
            self.start_time,
            self.end_time,
            self.title
        )
    }
}

/// The fields a user fills in when creating or editing an event.
///
/// Everything except the id. The controller decides whether a saved draft
/// creates a new event or replaces an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub title: String,
    pub client_name: String,
    pub event_type: EventType,
    pub notes: String,
    pub contact: Option<String>,
}

impl EventDraft {
    /// A blank form for `date`: 09:00-10:00, type Reunião.
    pub fn blank(date: NaiveDate) -> Self {
        EventDraft {
            date,
            start_time: DEFAULT_START,
            end_time: DEFAULT_END,
            title: String::new(),
            client_name: String::new(),
            event_type: EventType::Meeting,
            notes: String::new(),
            contact: None,
        }
    }

    /// Field checks done before the draft reaches the conflict validator.
    pub fn check(&self) -> Result<(), Rejection> {
        if self.title.trim().is_empty() {
            return Err(Rejection::EmptyField("title"));
        }
        if self.client_name.trim().is_empty() {
            return Err(Rejection::EmptyField("clientName"));
        }
        if self.event_type.as_str().trim().is_empty() {
            return Err(Rejection::EmptyField("eventType"));
        }
        Ok(())
    }
}

/// Event category.
///
/// The five built-in categories come from the form's select box. Anything
/// else read from storage or typed by the user is kept as `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EventType {
    Meeting,
    Consultation,
    Call,
    Presentation,
    Other,
    Custom(String),
}

impl EventType {
    /// Built-in categories in the order the form lists them.
    pub const BUILTIN: [EventType; 5] = [
        EventType::Meeting,
        EventType::Consultation,
        EventType::Call,
        EventType::Presentation,
        EventType::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            EventType::Meeting => "Reunião",
            EventType::Consultation => "Consulta",
            EventType::Call => "Ligação",
            EventType::Presentation => "Apresentação",
            EventType::Other => "Outro",
            EventType::Custom(s) => s,
        }
    }
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Reunião" => EventType::Meeting,
            "Consulta" => EventType::Consultation,
            "Ligação" => EventType::Call,
            "Apresentação" => EventType::Presentation,
            "Outro" => EventType::Other,
            _ => EventType::Custom(s),
        }
    }
}

impl From<&str> for EventType {
    fn from(s: &str) -> Self {
        EventType::from(s.to_string())
    }
}

impl From<EventType> for String {
    fn from(t: EventType) -> Self {
        match t {
            EventType::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
