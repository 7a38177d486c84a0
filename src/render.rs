//! Terminal rendering of the calendar view.

use agenda_core::controller::{DayCell, MonthView};
use agenda_core::month::WEEKDAYS;
use agenda_core::Event;
use owo_colors::OwoColorize;

/// Width of one grid column, in characters
const CELL_WIDTH: usize = 14;

/// Events listed per day before collapsing into "+N"
const MAX_EVENTS_PER_CELL: usize = 3;

/// Length of the id prefix shown next to events
pub const SHORT_ID_LEN: usize = 8;

pub fn render_month(view: &MonthView) -> String {
    let mut lines = Vec::new();

    let title = view.cursor.title();
    let grid_width = CELL_WIDTH * WEEKDAYS.len();
    lines.push(format!("{:^width$}", title, width = grid_width).bold().blue().to_string());

    let header: String = WEEKDAYS.iter().map(|d| pad(d, CELL_WIDTH)).collect();
    lines.push(header.dimmed().to_string());

    for week in view.cells.chunks(WEEKDAYS.len()) {
        lines.extend(render_week(week));
    }

    lines.join("\n")
}

fn render_week(week: &[Option<DayCell>]) -> Vec<String> {
    let rows = week
        .iter()
        .flatten()
        .map(|cell| 1 + visible_events(cell.events.len()))
        .max()
        .unwrap_or(1);

    (0..rows)
        .map(|row| {
            week.iter()
                .map(|cell| match cell {
                    Some(cell) => render_cell_row(cell, row),
                    None => " ".repeat(CELL_WIDTH),
                })
                .collect::<String>()
                .trim_end()
                .to_string()
        })
        .collect()
}

/// One line of one day cell. Row 0 is the day number, later rows are events.
/// Padding is applied before colouring so columns stay aligned.
fn render_cell_row(cell: &DayCell, row: usize) -> String {
    if row == 0 {
        let day = pad(&cell.date.format("%-d").to_string(), CELL_WIDTH);
        return if cell.is_today {
            day.reversed().bold().to_string()
        } else {
            day.bold().to_string()
        };
    }

    let index = row - 1;
    let shown = visible_events(cell.events.len());
    let overflow = cell.events.len() > MAX_EVENTS_PER_CELL;

    if overflow && index == shown - 1 {
        let more = cell.events.len() - (shown - 1);
        return pad(&format!("+{}", more), CELL_WIDTH).dimmed().to_string();
    }

    match cell.events.get(index) {
        Some(event) if index < shown => {
            let label = format!("{} {}", event.start_time, event.title);
            pad(&label, CELL_WIDTH).cyan().to_string()
        }
        _ => " ".repeat(CELL_WIDTH),
    }
}

fn visible_events(count: usize) -> usize {
    count.min(MAX_EVENTS_PER_CELL)
}

/// Truncate or pad to exactly `width` characters, leaving one column gap.
fn pad(text: &str, width: usize) -> String {
    let max = width.saturating_sub(1);
    let truncated: String = if text.chars().count() > max {
        let mut s: String = text.chars().take(max.saturating_sub(1)).collect();
        s.push('…');
        s
    } else {
        text.to_string()
    };
    let fill = width.saturating_sub(truncated.chars().count());
    format!("{}{}", truncated, " ".repeat(fill))
}

/// One event as a list line: time range, title, type, client, short id.
pub fn render_event(event: &Event) -> String {
    let time = format!("{}-{}", event.start_time, event.end_time);
    let meta = format!("[{}] {}", event.event_type, event.client_name);
    format!(
        "  {} {} {} {}",
        time.bold(),
        event.title,
        meta.dimmed(),
        short_id(&event.id).dimmed()
    )
}

/// Notes and contact, indented under an event line.
pub fn render_event_details(event: &Event) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(contact) = &event.contact {
        lines.push(format!("      {}", contact.dimmed()));
    }
    if !event.notes.is_empty() {
        lines.push(format!("      {}", event.notes.dimmed()));
    }
    lines
}

pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(SHORT_ID_LEN) {
        Some((i, _)) => &id[..i],
        None => id,
    }
}
