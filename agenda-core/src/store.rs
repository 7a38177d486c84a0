//! The authoritative event collection and its durable mirror.

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::error::{AgendaError, AgendaResult};
use crate::event::{Event, EventDraft, EventType};
use crate::slot::KeyValueStore;
use crate::time::hm;
use crate::validate::validate;

/// Key the event array is stored under unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "calendarEvents";

/// Id of the record used when no valid persisted data exists.
pub const SEED_ID: &str = "1";

/// Why the slot could not be used on load. Never surfaced to the user;
/// the store falls back to the seed record and logs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadIssue {
    Absent,
    Unreadable(String),
    Corrupt(String),
}

/// In-memory event list, written through to a [`KeyValueStore`] on every
/// mutation.
///
/// Mutations are applied to a copy first and only committed once the slot
/// write succeeded, so memory and slot never disagree after an error.
pub struct EventStore<S: KeyValueStore> {
    slot: S,
    key: String,
    events: Vec<Event>,
    load_issue: Option<LoadIssue>,
}

impl<S: KeyValueStore> EventStore<S> {
    /// Load events from `slot`. An absent, unreadable or malformed slot
    /// yields the seed record dated `today` instead of an error.
    pub fn load(slot: S, key: impl Into<String>, today: NaiveDate) -> Self {
        let key = key.into();

        let (events, load_issue) = match read_events(&slot, &key) {
            Ok(events) => {
                debug!("Loaded {} events from slot '{}'", events.len(), key);
                (events, None)
            }
            Err(LoadIssue::Absent) => {
                debug!("Slot '{}' is empty, starting from seed event", key);
                (vec![seed_event(today)], Some(LoadIssue::Absent))
            }
            Err(issue) => {
                warn!("Slot '{}' could not be loaded ({:?}), starting from seed event", key, issue);
                (vec![seed_event(today)], Some(issue))
            }
        };

        EventStore {
            slot,
            key,
            events,
            load_issue,
        }
    }

    /// What went wrong when loading, if the seed record was used.
    pub fn load_issue(&self) -> Option<&LoadIssue> {
        self.load_issue.as_ref()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// All events in insertion order. Callers sort as they need.
    pub fn list(&self) -> &[Event] {
        &self.events
    }

    pub fn get(&self, id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Events on `date`, ordered by start time. Ties keep insertion order.
    pub fn for_date(&self, date: NaiveDate) -> Vec<&Event> {
        let mut events: Vec<&Event> = self.events.iter().filter(|e| e.date == date).collect();
        events.sort_by_key(|e| e.start_time);
        events
    }

    /// Replace the event named by `id` in place, or append a new event with
    /// a freshly generated id when `id` is None or unknown.
    ///
    /// No validation happens here; the controller validates before calling.
    pub fn upsert(&mut self, id: Option<&str>, draft: EventDraft) -> AgendaResult<Event> {
        let mut next = self.events.clone();

        let position = id.and_then(|id| next.iter().position(|e| e.id == id));

        let event = match position {
            Some(i) => {
                let event = Event::from_draft(next[i].id.clone(), draft);
                next[i] = event.clone();
                event
            }
            None => {
                let event = Event::from_draft(self.generate_id(), draft);
                next.push(event.clone());
                event
            }
        };

        self.commit(next)?;
        debug!("Saved event {} ({})", event.id, event);
        Ok(event)
    }

    /// Drop the event with `id`. Returns false, without writing, if there
    /// was no such event.
    pub fn remove(&mut self, id: &str) -> AgendaResult<bool> {
        if self.get(id).is_none() {
            debug!("Remove of unknown event {} ignored", id);
            return Ok(false);
        }

        let next: Vec<Event> = self.events.iter().filter(|e| e.id != id).cloned().collect();
        self.commit(next)?;
        debug!("Removed event {}", id);
        Ok(true)
    }

    /// Replace the whole collection, for imports.
    ///
    /// The new set must satisfy the same rules single saves do: unique ids,
    /// required fields present, start before end and no same-day overlaps.
    pub fn replace_all(&mut self, events: Vec<Event>) -> AgendaResult<()> {
        for (i, event) in events.iter().enumerate() {
            if events[..i].iter().any(|e| e.id == event.id) {
                return Err(AgendaError::Invalid(format!("Duplicate event id '{}'", event.id)));
            }

            let draft = event.to_draft();
            let others: Vec<&Event> = events[..i].iter().collect();
            draft
                .check()
                .and_then(|_| validate(&draft, &others, None))
                .map_err(|rejection| {
                    AgendaError::Invalid(format!("Event '{}' ({}): {}", event.id, event, rejection))
                })?;
        }

        self.commit(events)?;
        debug!("Replaced store contents with {} events", self.events.len());
        Ok(())
    }

    fn commit(&mut self, next: Vec<Event>) -> AgendaResult<()> {
        let json = serde_json::to_string(&next)?;
        self.slot.save(&self.key, &json)?;
        self.events = next;
        self.load_issue = None;
        Ok(())
    }

    fn generate_id(&self) -> String {
        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn read_events<S: KeyValueStore>(slot: &S, key: &str) -> Result<Vec<Event>, LoadIssue> {
    let raw = slot
        .load(key)
        .map_err(|e| LoadIssue::Unreadable(e.to_string()))?
        .ok_or(LoadIssue::Absent)?;

    serde_json::from_str(&raw).map_err(|e| LoadIssue::Corrupt(e.to_string()))
}

/// The record a fresh or unreadable store starts with.
pub fn seed_event(today: NaiveDate) -> Event {
    Event {
        id: SEED_ID.to_string(),
        date: today,
        start_time: hm(10, 0),
        end_time: hm(11, 0),
        title: "Reunião de Equipe".to_string(),
        client_name: "Equipe Interna".to_string(),
        event_type: EventType::Meeting,
        notes: "Discutir o progresso do projeto.".to_string(),
        contact: None,
    }
}
