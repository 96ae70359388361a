//! Status notifications from generation to the caller.
//!
//! The core never prints. It reports [`Event`]s to a [`Reporter`] supplied by
//! the caller, which decides how (or whether) to show them.

use std::path::PathBuf;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    GenerationStarted { target: String, language: String },
    /// Flags dropped because the target cannot represent their type.
    FlagsSkipped { target: String, keys: Vec<String> },
    FileCreated { path: PathBuf },
    FileFailed { path: PathBuf, error: String },
    GenerationComplete { target: String, files: usize },
}

pub trait Reporter {
    fn report(&self, event: Event);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&self, _event: Event) {}
}

/// Keeps every event in order.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    events: Mutex<Vec<Event>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, event: Event) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}
