//! # Listener Records
//!
//! A bus remembers, for every `on`, the handler the caller gave it and the
//! handler it actually registered with the dispatcher (the origin-checking
//! wrapper, when enforcement is on). `off` and `teardown` use the record to
//! unsubscribe the registered one.

use crate::message::{same_handler, Handler};

/// One `on` registration.
pub(crate) struct ListenerRecord {
    /// Event name, without namespace.
    pub event: String,
    /// Handler registered with the dispatcher.
    pub wrapped: Handler,
    /// Handler supplied by the caller.
    pub original: Handler,
}

/// Ordered registrations of one bus. Later registrations win on lookup.
#[derive(Default)]
pub(crate) struct ListenerList {
    records: Vec<ListenerRecord>,
}

impl ListenerList {
    pub fn push(&mut self, record: ListenerRecord) {
        self.records.push(record);
    }

    /// Remove and return the most recent record for `(event, original)`.
    pub fn take_latest(&mut self, event: &str, original: &Handler) -> Option<ListenerRecord> {
        let position = self
            .records
            .iter()
            .rposition(|r| r.event == event && same_handler(&r.original, original))?;
        Some(self.records.remove(position))
    }

    /// Remove and return every record, oldest first.
    pub fn drain(&mut self) -> Vec<ListenerRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}
