//! Same-day conflict validation.
//!
//! Every save goes through [`validate`]. It is a pure decision: it never
//! touches the store, so a rejected draft can be corrected and resubmitted.

use crate::error::Rejection;
use crate::event::{Event, EventDraft};
use crate::time::TimeOfDay;

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
///
/// Touching endpoints do not overlap. The test is symmetric in its arguments.
pub fn overlaps(
    a_start: TimeOfDay,
    a_end: TimeOfDay,
    b_start: TimeOfDay,
    b_end: TimeOfDay,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// Decide whether `candidate` may be committed next to `existing`.
///
/// `existing` is normally the store's events for the candidate's date; events
/// on other dates are skipped so passing a wider slice is harmless. The event
/// whose id is `replacing` is left out, so an edit never conflicts with its
/// own previous version.
pub fn validate(
    candidate: &EventDraft,
    existing: &[&Event],
    replacing: Option<&str>,
) -> Result<(), Rejection> {
    if candidate.start_time >= candidate.end_time {
        return Err(Rejection::InvalidRange);
    }

    let conflict = existing
        .iter()
        .filter(|e| e.date == candidate.date)
        .filter(|e| Some(e.id.as_str()) != replacing)
        .find(|e| overlaps(candidate.start_time, candidate.end_time, e.start_time, e.end_time));

    match conflict {
        Some(e) => Err(Rejection::Overlap {
            id: e.id.clone(),
            title: e.title.clone(),
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use chrono::NaiveDate;

    fn t(s: &str) -> TimeOfDay {
        s.parse().unwrap()
    }

    fn draft(date: &str, start: &str, end: &str) -> EventDraft {
        EventDraft {
            start_time: t(start),
            end_time: t(end),
            title: "Sessão".to_string(),
            client_name: "Cliente".to_string(),
            event_type: EventType::Meeting,
            ..EventDraft::blank(NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap())
        }
    }

    fn event(id: &str, date: &str, start: &str, end: &str) -> Event {
        Event::from_draft(id, draft(date, start, end))
    }

    #[test]
    fn test_scenario_from_existing_morning_event() {
        let existing = event("a", "2024-06-01", "10:00", "11:00");
        let store = [&existing];

        assert_eq!(
            validate(&draft("2024-06-01", "10:30", "11:30"), &store, None),
            Err(Rejection::Overlap {
                id: "a".to_string(),
                title: "Sessão".to_string()
            })
        );
        assert_eq!(validate(&draft("2024-06-01", "11:00", "12:00"), &store, None), Ok(()));
        assert_eq!(
            validate(&draft("2024-06-01", "09:00", "08:00"), &store, None),
            Err(Rejection::InvalidRange)
        );
    }

    #[test]
    fn test_touching_boundaries_are_allowed() {
        let existing = event("a", "2024-06-01", "09:00", "10:00");
        assert_eq!(validate(&draft("2024-06-01", "10:00", "10:30"), &[&existing], None), Ok(()));
        assert_eq!(validate(&draft("2024-06-01", "08:00", "09:00"), &[&existing], None), Ok(()));
    }

    #[test]
    fn test_range_checked_before_overlap() {
        // Would also overlap, but the range problem is reported.
        let existing = event("a", "2024-06-01", "09:00", "12:00");
        for (start, end) in [("10:00", "10:00"), ("11:00", "10:00")] {
            assert_eq!(
                validate(&draft("2024-06-01", start, end), &[&existing], None),
                Err(Rejection::InvalidRange)
            );
        }
        assert_eq!(validate(&draft("2024-06-01", "10:00", "10:00"), &[], None), Err(Rejection::InvalidRange));
    }

    #[test]
    fn test_edit_never_conflicts_with_itself() {
        let existing = event("a", "2024-06-01", "10:00", "11:00");
        let unchanged = existing.to_draft();
        assert_eq!(validate(&unchanged, &[&existing], Some("a")), Ok(()));

        let widened = draft("2024-06-01", "09:30", "11:30");
        assert_eq!(validate(&widened, &[&existing], Some("a")), Ok(()));
    }

    #[test]
    fn test_edit_still_conflicts_with_others() {
        let a = event("a", "2024-06-01", "10:00", "11:00");
        let b = event("b", "2024-06-01", "11:00", "12:00");
        let moved = draft("2024-06-01", "10:30", "11:30");
        assert!(matches!(
            validate(&moved, &[&a, &b], Some("a")),
            Err(Rejection::Overlap { id, .. }) if id == "b"
        ));
    }

    #[test]
    fn test_other_dates_are_ignored() {
        let other_day = event("a", "2024-06-02", "10:00", "11:00");
        assert_eq!(validate(&draft("2024-06-01", "10:00", "11:00"), &[&other_day], None), Ok(()));
    }

    #[test]
    fn test_containment_overlaps() {
        let outer = event("a", "2024-06-01", "08:00", "18:00");
        assert!(validate(&draft("2024-06-01", "12:00", "12:15"), &[&outer], None).is_err());

        let inner = event("b", "2024-06-01", "12:00", "12:15");
        assert!(validate(&draft("2024-06-01", "08:00", "18:00"), &[&inner], None).is_err());
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let slots = ["08:00", "09:00", "09:30", "10:00", "11:00", "12:00"];
        for &a0 in &slots {
            for &a1 in &slots {
                for &b0 in &slots {
                    for &b1 in &slots {
                        if t(a0) >= t(a1) || t(b0) >= t(b1) {
                            continue;
                        }
                        assert_eq!(
                            overlaps(t(a0), t(a1), t(b0), t(b1)),
                            overlaps(t(b0), t(b1), t(a0), t(a1)),
                            "{a0}-{a1} vs {b0}-{b1}"
                        );
                    }
                }
            }
        }
    }
}
