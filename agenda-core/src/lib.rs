//! Core types for the agenda scheduling calendar.
//!
//! This crate holds everything below the terminal UI:
//! - `event` and `time` for the event record and time-of-day values
//! - `validate` for the same-day conflict check every save goes through
//! - `slot` and `store` for the durable event collection
//! - `month` for the month-grid model
//! - `controller` for turning UI intents into store mutations

pub mod config;
pub mod controller;
pub mod error;
pub mod event;
pub mod ics;
pub mod month;
pub mod slot;
pub mod store;
pub mod time;
pub mod validate;

pub use error::{AgendaError, AgendaResult, Rejection};
pub use event::{Event, EventDraft, EventType};
pub use time::TimeOfDay;
