pub mod day;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod month;
pub mod new;

use agenda_core::slot::KeyValueStore;
use agenda_core::store::EventStore;
use anyhow::Result;

/// Resolve a full id or a unique id prefix to a stored event id.
pub fn resolve_id<S: KeyValueStore>(store: &EventStore<S>, input: &str) -> Result<String> {
    if let Some(event) = store.get(input) {
        return Ok(event.id.clone());
    }

    let matches: Vec<&str> = store
        .list()
        .iter()
        .map(|e| e.id.as_str())
        .filter(|id| id.starts_with(input))
        .collect();

    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => anyhow::bail!("No event with id '{}'", input),
        _ => anyhow::bail!(
            "Id '{}' is ambiguous, it matches {} events. Use more characters.",
            input,
            matches.len()
        ),
    }
}
