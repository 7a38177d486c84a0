//! ICS export.
//!
//! Turns stored events into an RFC 5545 calendar so they can be opened in
//! other calendar applications. Times are written as floating local times,
//! matching how the store keeps them.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::event::Event;
use crate::time::TimeOfDay;

const PRODID: &str = "PRODID:-//agenda//agenda//PT";

/// Generate one VCALENDAR holding every event in `events`.
///
/// `stamp` becomes each event's DTSTAMP so repeated exports of the same data
/// are byte-identical.
pub fn generate_ics(events: &[Event], calendar_name: &str, stamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.id);
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        ics_event.add_property("DTSTART", floating(event, event.start_time));
        ics_event.add_property("DTEND", floating(event, event.end_time));
        ics_event.add_property("CATEGORIES", event.event_type.as_str());
        ics_event.description(&description(event));

        cal.push(ics_event.done());
    }

    strip_ics_bloat(&cal.done().to_string())
}

fn floating(event: &Event, time: TimeOfDay) -> String {
    format!(
        "{}T{:02}{:02}00",
        event.date.format("%Y%m%d"),
        time.hour(),
        time.minute()
    )
}

/// Client, contact and notes folded into one description.
fn description(event: &Event) -> String {
    let mut lines = vec![format!("Cliente: {}", event.client_name)];
    if let Some(contact) = &event.contact {
        lines.push(format!("Contato: {}", contact));
    }
    if !event.notes.is_empty() {
        lines.push(event.notes.clone());
    }
    lines.join("\n")
}

/// Replace the icalendar crate's PRODID and drop CALSCALE:GREGORIAN, which is
/// the default anyway.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}
